//! Scroll through a page until it stops yielding new content.
//!
//! There is no pagination contract, so both loops stop on a heuristic: the
//! playlist listing when scrolling no longer grows the page, a playlist when
//! several page-downs in a row produce no new tracks.

use crate::browser::{Driver, Launcher, Session};
use crate::error::Error;
use crate::extract::{self, PlaylistListing, TrackState};
use crate::fetch;
use crate::records::PlaylistRecord;
use crate::types::{PlaylistsResult, Result, TracksResult};
use std::thread;
use std::time::Duration;
use tracing::info;

/// Idle passes tolerated before a playlist is considered fully loaded.
pub const IDLE_PASS_LIMIT: u32 = 3;

/// Fixed waits for the page to render after each browser action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delays {
    /// After the scroll-to-bottom done on first load.
    pub settle: Duration,
    /// After each scroll of the playlist listing.
    pub scroll: Duration,
    /// After each page-down on a playlist.
    pub page_down: Duration,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(5140),
            scroll: Duration::from_secs(5),
            page_down: Duration::from_millis(3140),
        }
    }
}

impl Delays {
    pub const NONE: Delays = Delays {
        settle: Duration::ZERO,
        scroll: Duration::ZERO,
        page_down: Duration::ZERO,
    };
}

/// Consecutive passes that committed nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdleStreak {
    count: u32,
}

impl IdleStreak {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pass that committed `new_records`.
    /// Returns true once the streak exceeds `IDLE_PASS_LIMIT`.
    pub fn record(&mut self, new_records: usize) -> bool {
        if new_records > 0 {
            self.count = 0;
        } else {
            self.count += 1;
        }
        self.count > IDLE_PASS_LIMIT
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// The listing is exhausted when a scroll did not change the page height.
pub fn height_unchanged(before: i64, after: i64) -> bool {
    before == after
}

/// Collect every playlist from the listing page at `url`.
///
/// # Errors
/// - `Error::Fetch` when the page could not be loaded or the browser failed
///   while scrolling
pub fn scrape_playlists<L: Launcher>(
    session: &mut Session<L>,
    url: &str,
    delays: &Delays,
) -> PlaylistsResult {
    let mut page = fetch::fetch(session, url, true, delays.settle)?;
    let mut listing = PlaylistListing::new();

    let mut page_num = 0;
    loop {
        let added = listing.extend(&page);
        info!(
            "page {}: got {} playlists, {} total",
            page_num,
            added,
            listing.len()
        );
        page_num += 1;

        let heights = guard(session, url, |driver| {
            let before = driver.scroll_height()?;
            driver.scroll_to_bottom()?;
            thread::sleep(delays.scroll);
            Ok((before, driver.scroll_height()?))
        })?;
        if height_unchanged(heights.0, heights.1) {
            break;
        }
        page = fetch::refresh(session, url)?;
    }

    Ok(listing.into_records())
}

/// Collect every track of `playlist`, loaded from `url`.
///
/// # Errors
/// - `Error::Fetch` when the page could not be loaded or the browser failed
///   while paging
/// - `Error::ProtocolViolation` when the track rows are not laid out as
///   expected. Nothing has been written for this playlist at that point.
pub fn scrape_tracks<L: Launcher>(
    session: &mut Session<L>,
    playlist: &PlaylistRecord,
    url: &str,
    delays: &Delays,
) -> TracksResult {
    let mut page = fetch::fetch(session, url, true, delays.settle)?;
    let mut state = TrackState::new();
    let mut idle = IdleStreak::new();
    let mut tracks = Vec::new();

    let mut page_num = 0;
    loop {
        let scraped = extract::extract_tracks(&page, playlist, &mut state)?;
        let new_records = scraped.len();
        tracks.extend(scraped);
        info!(
            "page {}: got {} tracks, {} total",
            page_num,
            new_records,
            tracks.len()
        );

        if idle.record(new_records) {
            break;
        }

        guard(session, url, |driver| driver.page_down())?;
        page_num += 1;
        thread::sleep(delays.page_down);
        page = fetch::refresh(session, url)?;
    }

    Ok(tracks)
}

/// Run a browser action, turning any failure into a fetch failure for `url`
/// and shutting the session down.
fn guard<L, T, F>(session: &mut Session<L>, url: &str, action: F) -> Result<T>
where
    L: Launcher,
    F: FnOnce(&mut L::Driver) -> Result<T>,
{
    let result = action(session.driver()?);
    result.map_err(|e| {
        session.shutdown();
        Error::fetch(url, e)
    })
}
