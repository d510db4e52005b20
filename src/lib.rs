mod accumulator;
pub mod browser;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod info;
pub mod logging;
pub mod output;
pub mod progress;
pub mod records;
#[cfg(test)]
mod testing;
pub mod types;
mod util;

pub use accumulator::TrackAccumulator;
pub use browser::{ChromeLauncher, ChromeOptions, Driver, Launcher, Session};
pub use error::{Error, Field};
pub use progress::Delays;
pub use records::{PlaylistRecord, TrackRecord};

use clap::Parser;
use std::fs;
use std::io::BufRead;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_ROOT_URL: &str = "https://music.amazon.com";
pub const LISTING_PATH: &str = "/my/playlists/all";

#[derive(Parser, Debug)]
#[command(
    name = "playlist-harvest",
    version,
    about = "Export your Amazon Music playlists and their tracks to CSV files"
)]
struct Cli {
    /// Account name, used as the output subdirectory
    account: String,

    /// Verbosely show what is being processed
    #[arg(short, long)]
    verbose: bool,

    /// Do not scrape the playlist listing, reuse the existing playlists.csv
    #[arg(long)]
    no_playlists: bool,

    /// Do not scrape the tracks of each playlist
    #[arg(long)]
    no_tracks: bool,

    /// Directory the account subdirectory is created in
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Chrome profile holding the login cookies
    #[arg(long, value_name = "NAME")]
    profile: Option<String>,

    /// Chrome user-data directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<PathBuf>,

    /// Config file, defaults to harvest.conf in the playlist-harvest config directory
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub account: String,

    // Steps
    pub playlists: bool,
    pub tracks: bool,

    pub verbose: bool,

    // Paths
    pub output_dir: PathBuf,
    pub conf_path: Option<PathBuf>,

    pub root_url: Url,
    pub chrome: ChromeOptions,
}

impl Config {
    fn new(account: String) -> types::ConfigResult {
        Ok(Config {
            account,
            playlists: true,
            tracks: true,
            verbose: false,
            output_dir: PathBuf::from("."),
            conf_path: None,
            root_url: Url::parse(DEFAULT_ROOT_URL)?,
            chrome: ChromeOptions::default(),
        })
    }

    /// The config file to read: the one given on the CLI, which must exist,
    /// else the default one if present.
    fn find_conf_path(cli_path: Option<PathBuf>) -> types::Result<Option<PathBuf>> {
        if let Some(path) = cli_path {
            if fs::metadata(&path).is_err() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok(Some(path));
        }

        Ok(default_conf_path().filter(|path| path.is_file()))
    }

    /// Read options from the config file, if any.
    /// For any option that is not present in the file, the default is kept.
    ///
    /// # Errors
    /// - If a line does not follow the `option=value` format
    /// - If an option is not recognized or its value is invalid
    fn build_conf_options(&mut self) -> types::UnitResult {
        let Some(path) = self.conf_path.clone() else {
            return Ok(());
        };
        let contents = fs::read_to_string(&path)?;

        for line in contents.lines().map(|l| l.trim()) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(Error::Config(format!("Invalid config line: {}", line)));
            };
            let (key, value) = (key.trim().to_lowercase(), value.trim());
            match key.as_str() {
                "verbose" => self.verbose = util::parse_bool(&key, value)?,
                "playlists" => self.playlists = util::parse_bool(&key, value)?,
                "tracks" => self.tracks = util::parse_bool(&key, value)?,
                "output_dir" => self.output_dir = PathBuf::from(value),
                "profile" => self.chrome.profile = value.to_string(),
                "user_data_dir" => self.chrome.user_data_dir = Some(PathBuf::from(value)),
                "root_url" => self.root_url = Url::parse(value)?,
                _ => return Err(Error::Config(format!("Invalid config option: {}", key))),
            }
        }

        Ok(())
    }

    /// Override options with the ones given on the CLI.
    fn apply_cli_options(&mut self, cli: Cli) {
        if cli.verbose {
            self.verbose = true;
        }
        if cli.no_playlists {
            self.playlists = false;
        }
        if cli.no_tracks {
            self.tracks = false;
        }
        if let Some(dir) = cli.output_dir {
            self.output_dir = dir;
        }
        if let Some(profile) = cli.profile {
            self.chrome.profile = profile;
        }
        if let Some(dir) = cli.user_data_dir {
            self.chrome.user_data_dir = Some(dir);
        }
    }

    pub fn build(args: impl Iterator<Item = String>) -> types::ConfigResult {
        let mut cli = Cli::try_parse_from(args)?;

        if sanitize_filename::sanitize(&cli.account).is_empty() {
            return Err(Error::Config(format!(
                "Account name '{}' cannot be used as a directory name",
                cli.account
            )));
        }

        let mut config = Config::new(std::mem::take(&mut cli.account))?;
        config.conf_path = Config::find_conf_path(cli.config.take())?;
        config.build_conf_options()?; // override defaults with the config file
        config.apply_cli_options(cli); // override defaults/config file with CLI

        if !config.playlists && !config.tracks {
            return Err(Error::Config(String::from(
                "Both the playlist listing and the tracks are disabled, nothing to do",
            )));
        }

        Ok(config)
    }

    /// `OUTPUT_DIR/ACCOUNT`, with the account made safe for a directory name.
    pub fn account_dir(&self) -> PathBuf {
        self.output_dir
            .join(sanitize_filename::sanitize(&self.account))
    }

    pub fn playlists_path(&self) -> PathBuf {
        self.account_dir().join(output::PLAYLISTS_FILE)
    }

    pub fn tracks_path(&self) -> PathBuf {
        self.account_dir().join(output::TRACKS_FILE)
    }

    pub fn listing_url(&self) -> types::StringResult {
        Ok(self.root_url.join(LISTING_PATH)?.to_string())
    }

    /// The absolute URL of a playlist listed with a site-relative href.
    pub fn playlist_url(&self, playlist: &PlaylistRecord) -> types::StringResult {
        Ok(self.root_url.join(&playlist.url)?.to_string())
    }
}

pub fn default_conf_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("playlist-harvest").join("harvest.conf"))
}

/// Run the export with a local Chrome, reading the login confirmation from
/// `reader`.
pub fn run<R: BufRead>(config: Config, reader: R) -> types::UnitResult {
    let launcher = ChromeLauncher::new(config.chrome.clone());
    run_with(&config, launcher, reader, &Delays::default())
}

pub fn run_with<L: Launcher, R: BufRead>(
    config: &Config,
    launcher: L,
    reader: R,
    delays: &Delays,
) -> types::UnitResult {
    let mut session = Session::new(launcher);
    let result = export::run(config, &mut session, reader, delays);
    session.shutdown();
    result
}
