//! Scripted browser used by the unit tests.

use crate::browser::{Driver, Launcher};
use crate::error::Error;
use crate::types::{Result, StringResult, UnitResult};
use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Successive renderings of each URL. Scrolling or paging down advances to
/// the next rendering and stays on the last one. The scroll height is the
/// length of the current rendering.
#[derive(Clone, Default)]
pub struct Script {
    pages: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    broken: HashMap<(String, Action), usize>,
    pub page_downs: Rc<Cell<usize>>,
    pub scrolls: Rc<Cell<usize>>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, renderings: Vec<String>) -> Self {
        self.pages.insert(url.to_string(), renderings);
        self
    }

    pub fn fail(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// Let `action` succeed `successes` times on `url`, then fail every time.
    pub fn fail_after(mut self, url: &str, action: Action, successes: usize) -> Self {
        self.broken.insert((url.to_string(), action), successes);
        self
    }
}

/// Driver calls that can be scripted to fail after navigation succeeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollToBottom,
    PageDown,
    ScrollHeight,
    Content,
}

pub struct FakeDriver {
    script: Script,
    url: Option<String>,
    index: usize,
    calls: HashMap<(String, Action), usize>,
}

impl FakeDriver {
    fn renderings(&self) -> &[String] {
        self.url
            .as_ref()
            .and_then(|url| self.script.pages.get(url))
            .map(|r| r.as_slice())
            .unwrap_or(&[])
    }

    fn current(&self) -> String {
        self.renderings()
            .get(self.index)
            .cloned()
            .unwrap_or_default()
    }

    fn advance(&mut self) {
        let last = self.renderings().len().saturating_sub(1);
        self.index = (self.index + 1).min(last);
    }

    fn attempt(&mut self, action: Action) -> UnitResult {
        let Some(url) = self.url.clone() else {
            return Ok(());
        };
        let key = (url, action);
        let Some(&successes) = self.script.broken.get(&key) else {
            return Ok(());
        };
        let calls = self.calls.entry(key).or_insert(0);
        *calls += 1;
        if *calls > successes {
            return Err(Error::Browser(format!("{:?} failed: target closed", action)));
        }
        Ok(())
    }
}

impl Driver for FakeDriver {
    fn navigate(&mut self, url: &str) -> UnitResult {
        if self.script.failing.contains(url) {
            return Err(Error::Browser(format!("net::ERR_FAILED {}", url)));
        }
        self.url = Some(url.to_string());
        self.index = 0;
        Ok(())
    }

    fn scroll_to_bottom(&mut self) -> UnitResult {
        self.attempt(Action::ScrollToBottom)?;
        self.script.scrolls.set(self.script.scrolls.get() + 1);
        self.advance();
        Ok(())
    }

    fn page_down(&mut self) -> UnitResult {
        self.attempt(Action::PageDown)?;
        self.script.page_downs.set(self.script.page_downs.get() + 1);
        self.advance();
        Ok(())
    }

    fn scroll_height(&mut self) -> Result<i64> {
        self.attempt(Action::ScrollHeight)?;
        Ok(self.current().len() as i64)
    }

    fn content(&mut self) -> StringResult {
        self.attempt(Action::Content)?;
        Ok(self.current())
    }
}

pub struct FakeLauncher {
    script: Script,
    launches: Cell<usize>,
}

impl FakeLauncher {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            launches: Cell::new(0),
        }
    }

    pub fn launches(&self) -> usize {
        self.launches.get()
    }
}

impl Launcher for FakeLauncher {
    type Driver = FakeDriver;

    fn launch(&self) -> Result<FakeDriver> {
        self.launches.set(self.launches.get() + 1);
        Ok(FakeDriver {
            script: self.script.clone(),
            url: None,
            index: 0,
            calls: HashMap::new(),
        })
    }
}
