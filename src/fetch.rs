use crate::browser::{Driver, Launcher, Session};
use crate::error::Error;
use crate::types::Result;
use scraper::Html;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Load `url` and return the rendered document.
///
/// When `scroll_to_end` is set, the page is scrolled to the bottom and given
/// `settle` to render the content loaded by the scroll.
///
/// # Errors
/// - `Error::Fetch` when navigation fails. The browser is shut down first,
///   so the next fetch starts a fresh one.
/// - `Error::Browser` when the browser cannot be launched.
pub fn fetch<L: Launcher>(
    session: &mut Session<L>,
    url: &str,
    scroll_to_end: bool,
    settle: Duration,
) -> Result<Html> {
    info!("Getting page {}", url);
    let driver = session.driver()?;

    match load(driver, url, scroll_to_end, settle) {
        Ok(html) => Ok(Html::parse_document(&html)),
        Err(e) => {
            warn!("Could not load {}: {}", url, e);
            session.shutdown();
            Err(Error::fetch(url, e))
        }
    }
}

fn load<D: Driver>(
    driver: &mut D,
    url: &str,
    scroll_to_end: bool,
    settle: Duration,
) -> Result<String> {
    driver.navigate(url)?;
    if scroll_to_end {
        driver.scroll_to_bottom()?;
        thread::sleep(settle);
    }
    driver.content()
}

/// Read the current document again without navigating.
pub fn refresh<L: Launcher>(session: &mut Session<L>, url: &str) -> Result<Html> {
    let driver = session.driver()?;
    match driver.content() {
        Ok(html) => Ok(Html::parse_document(&html)),
        Err(e) => {
            session.shutdown();
            Err(Error::fetch(url, e))
        }
    }
}
