//! The browser session the scrapers drive.

use crate::error::Error;
use crate::types::{Result, StringResult, UnitResult};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";
const SCROLL_HEIGHT: &str = "document.body.scrollHeight";

/// One open browser tab.
pub trait Driver {
    fn navigate(&mut self, url: &str) -> UnitResult;
    fn scroll_to_bottom(&mut self) -> UnitResult;
    fn page_down(&mut self) -> UnitResult;
    fn scroll_height(&mut self) -> Result<i64>;
    /// The rendered document markup.
    fn content(&mut self) -> StringResult;
}

pub trait Launcher {
    type Driver: Driver;

    fn launch(&self) -> Result<Self::Driver>;
}

/// Owns the running browser, if any. Dropping the driver closes the browser.
pub struct Session<L: Launcher> {
    launcher: L,
    driver: Option<L::Driver>,
}

impl<L: Launcher> Session<L> {
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            driver: None,
        }
    }

    /// Launch the browser unless it is already running.
    pub fn start(&mut self) -> UnitResult {
        if self.driver.is_none() {
            info!("Starting browser");
            self.driver = Some(self.launcher.launch()?);
        }
        Ok(())
    }

    /// The running driver, launching the browser first if needed.
    pub fn driver(&mut self) -> Result<&mut L::Driver> {
        self.start()?;
        self.driver
            .as_mut()
            .ok_or_else(|| Error::Browser(String::from("browser not running")))
    }

    pub fn shutdown(&mut self) {
        if self.driver.take().is_some() {
            info!("Browser shut down");
        }
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_some()
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }
}

#[derive(Clone, Debug)]
pub struct ChromeOptions {
    /// Chrome user-data directory holding the login cookies.
    pub user_data_dir: Option<PathBuf>,
    pub profile: String,
    pub headless: bool,
}

impl Default for ChromeOptions {
    fn default() -> Self {
        Self {
            user_data_dir: default_user_data_dir(),
            profile: String::from("Default"),
            headless: false,
        }
    }
}

/// Launches a local Chrome through the DevTools protocol.
#[derive(Clone, Debug, Default)]
pub struct ChromeLauncher {
    pub options: ChromeOptions,
}

impl ChromeLauncher {
    pub fn new(options: ChromeOptions) -> Self {
        Self { options }
    }
}

impl Launcher for ChromeLauncher {
    type Driver = ChromeDriver;

    fn launch(&self) -> Result<ChromeDriver> {
        let profile = OsString::from(format!("--profile-directory={}", self.options.profile));
        let no_images = OsString::from("--blink-settings=imagesEnabled=false");
        let automation = OsString::from("--enable-automation");

        let options = LaunchOptions {
            headless: self.options.headless,
            user_data_dir: self.options.user_data_dir.clone(),
            args: vec![profile.as_os_str(), no_images.as_os_str()],
            ignore_default_args: vec![automation.as_os_str()],
            // The login prompt blocks for as long as the user needs
            idle_browser_timeout: Duration::from_secs(24 * 60 * 60),
            ..Default::default()
        };
        debug!("Launching Chrome with {:?}", self.options);

        let browser = Browser::new(options).map_err(Error::browser)?;
        let tab = browser.new_tab().map_err(Error::browser)?;
        Ok(ChromeDriver {
            _browser: browser,
            tab,
        })
    }
}

pub struct ChromeDriver {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl Driver for ChromeDriver {
    fn navigate(&mut self, url: &str) -> UnitResult {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(Error::browser)?;
        Ok(())
    }

    fn scroll_to_bottom(&mut self) -> UnitResult {
        self.tab
            .evaluate(SCROLL_TO_BOTTOM, false)
            .map_err(Error::browser)?;
        Ok(())
    }

    fn page_down(&mut self) -> UnitResult {
        self.tab.press_key("PageDown").map_err(Error::browser)?;
        Ok(())
    }

    fn scroll_height(&mut self) -> Result<i64> {
        let height = self
            .tab
            .evaluate(SCROLL_HEIGHT, false)
            .map_err(Error::browser)?;
        height
            .value
            .and_then(|v| v.as_i64())
            .ok_or_else(|| Error::Browser(String::from("scroll height is not a number")))
    }

    fn content(&mut self) -> StringResult {
        self.tab.get_content().map_err(Error::browser)
    }
}

/// Where Chrome keeps its profiles by default on this platform.
pub fn default_user_data_dir() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        dirs::data_dir().map(|d| d.join("Google").join("Chrome"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir().map(|d| d.join("Google").join("Chrome").join("User Data"))
    } else {
        dirs::config_dir().map(|d| d.join("google-chrome"))
    }
}
