//! Integration testing helper functions.

#![allow(dead_code)]

use playlist_harvest::types::{Result, StringResult, UnitResult};
use playlist_harvest::{Config, Delays, Driver, Error, Launcher};
use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub const ROOT: &str = "https://music.amazon.com";

fn get_resource_path() -> PathBuf {
    PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap())
        .join("resources")
        .join("test")
}

/// # Parameters
/// - `filename`: just the name of a file in the `resources/test` directory
pub fn resource(filename: &str) -> String {
    fs::read_to_string(get_resource_path().join(filename)).unwrap()
}

/// Build a `Config` from CLI `args`, writing into `output_dir` and ignoring
/// any config file of the user running the tests.
pub fn setup(output_dir: &Path, mut args: Vec<&str>) -> Result<Config> {
    let conf = output_dir.join("harvest.conf");
    if !conf.exists() {
        fs::write(&conf, "").unwrap();
    }
    let mut full = vec![
        String::from("playlist-harvest"),
        String::from("-o"),
        output_dir.to_str().unwrap().to_string(),
        String::from("-c"),
        conf.to_str().unwrap().to_string(),
    ];
    full.extend(args.drain(..).map(String::from));
    Config::build(full.into_iter())
}

/// Run `config` against the scripted browser, confirming the login prompt.
pub fn run(config: &Config, launcher: ScriptedLauncher) -> UnitResult {
    let reader = BufReader::new(&b"\n"[..]);
    playlist_harvest::run_with(config, launcher, reader, &Delays::NONE)
}

pub fn read(path: PathBuf) -> String {
    fs::read_to_string(path).unwrap()
}

/// A browser that serves fixed renderings per URL. Scrolling and paging
/// advance to the next rendering, staying on the last one.
#[derive(Clone, Default)]
pub struct ScriptedLauncher {
    pages: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    no_paging: HashSet<String>,
}

impl ScriptedLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, path: &str, renderings: Vec<String>) -> Self {
        self.pages.insert(format!("{}{}", ROOT, path), renderings);
        self
    }

    pub fn fail(mut self, path: &str) -> Self {
        self.failing.insert(format!("{}{}", ROOT, path));
        self
    }

    /// Load `path` normally but fail every page-down on it.
    pub fn fail_paging(mut self, path: &str) -> Self {
        self.no_paging.insert(format!("{}{}", ROOT, path));
        self
    }
}

impl Launcher for ScriptedLauncher {
    type Driver = ScriptedDriver;

    fn launch(&self) -> Result<ScriptedDriver> {
        Ok(ScriptedDriver {
            script: self.clone(),
            url: String::new(),
            renderings: Vec::new(),
            index: 0,
        })
    }
}

pub struct ScriptedDriver {
    script: ScriptedLauncher,
    url: String,
    renderings: Vec<String>,
    index: usize,
}

impl ScriptedDriver {
    fn advance(&mut self) {
        self.index = (self.index + 1).min(self.renderings.len().saturating_sub(1));
    }
}

impl Driver for ScriptedDriver {
    fn navigate(&mut self, url: &str) -> UnitResult {
        if self.script.failing.contains(url) {
            return Err(Error::Browser(format!("net::ERR_NAME_NOT_RESOLVED {}", url)));
        }
        self.renderings = self.script.pages.get(url).cloned().unwrap_or_default();
        self.url = url.to_string();
        self.index = 0;
        Ok(())
    }

    fn scroll_to_bottom(&mut self) -> UnitResult {
        self.advance();
        Ok(())
    }

    fn page_down(&mut self) -> UnitResult {
        if self.script.no_paging.contains(&self.url) {
            return Err(Error::Browser(String::from(
                "Inspected target navigated or closed",
            )));
        }
        self.advance();
        Ok(())
    }

    fn scroll_height(&mut self) -> Result<i64> {
        Ok(self.content()?.len() as i64)
    }

    fn content(&mut self) -> StringResult {
        Ok(self
            .renderings
            .get(self.index)
            .cloned()
            .unwrap_or_default())
    }
}
