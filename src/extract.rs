//! Extract playlist and track rows from rendered pages.
//!
//! Playlist listing item:
//! `<music-vertical-item primary-text="Music To Code To" primary-href="/my/playlists/xxxx">`
//!
//! Track row (one playlist page), links in document order:
//! - track:  `<a href="/albums/B001E40DVW?trackAsin=B001E45LJQ">Ethnic Majority</a>`
//! - album:  `<a href="/albums/B001E40DVW">Carboot Soul</a>`
//! - artist: `<a href="/artists/B000QJP7YY/nightmares-on-wax">Nightmares On Wax</a>`
//!
//! The track length is the text of the element following the album link's
//! grandparent, e.g. `<div class="col4"><music-link title="06:20"><span> 06:20 </span>`.

use crate::accumulator::TrackAccumulator;
use crate::records::{PlaylistRecord, TrackKey};
use crate::types::TracksResult;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

static TRACK_ASIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\?trackAsin=").unwrap());
static ALBUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/albums/").unwrap());
static ARTIST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/artists/").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    Track,
    Album,
    Artist,
}

impl LinkKind {
    /// Classify a link by its href. Track links are album links carrying a
    /// `trackAsin` query parameter anywhere in the href, so they are checked
    /// first.
    pub fn classify(href: &str) -> Option<Self> {
        let album = ALBUM.is_match(href);
        if album && TRACK_ASIN.is_match(href) {
            Some(Self::Track)
        } else if album {
            Some(Self::Album)
        } else if ARTIST.is_match(href) {
            Some(Self::Artist)
        } else {
            None
        }
    }
}

/// All playlists listed in `document`, in document order, without exact
/// (title, url) duplicates. Items without an href are skipped.
pub fn extract_playlists(document: &Html) -> Vec<PlaylistRecord> {
    let selector = Selector::parse("music-vertical-item").unwrap();

    let mut seen = HashSet::new();
    let mut playlists = Vec::new();
    for item in document.select(&selector) {
        let Some(url) = item.value().attr("primary-href") else {
            debug!("Skipping playlist item without href");
            continue;
        };
        let title = item.value().attr("primary-text").unwrap_or_default();
        let playlist = PlaylistRecord::new(title, url);
        if seen.insert(playlist.clone()) {
            playlists.push(playlist);
        }
    }
    playlists
}

/// The playlists found so far across every pass of the listing loop.
#[derive(Debug, Default)]
pub struct PlaylistListing {
    records: Vec<PlaylistRecord>,
    seen: HashSet<PlaylistRecord>,
}

impl PlaylistListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rescan the whole `document`, keeping only unseen playlists.
    /// Returns the number of playlists added.
    pub fn extend(&mut self, document: &Html) -> usize {
        let before = self.records.len();
        for playlist in extract_playlists(document) {
            if self.seen.insert(playlist.clone()) {
                debug!("ADDING {} {}", playlist.title, playlist.url);
                self.records.push(playlist);
            } else {
                debug!("DUPLICATE {} {}", playlist.title, playlist.url);
            }
        }
        self.records.len() - before
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<PlaylistRecord> {
        self.records
    }
}

/// State carried across passes while scraping one playlist.
#[derive(Debug)]
pub struct TrackState {
    pub accumulator: TrackAccumulator,
    pub seen: HashSet<TrackKey>,
    pub next_track_num: u32,
}

impl Default for TrackState {
    fn default() -> Self {
        Self {
            accumulator: TrackAccumulator::new(),
            seen: HashSet::new(),
            next_track_num: 1,
        }
    }
}

impl TrackState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Scan every link of `document` and return the rows completed in this pass
/// that were not seen before.
///
/// # Errors
/// - `Error::ProtocolViolation` when a link starts a field group that is
///   already filled. Rows completed earlier in the same pass are discarded.
pub fn extract_tracks(
    document: &Html,
    playlist: &PlaylistRecord,
    state: &mut TrackState,
) -> TracksResult {
    let selector = Selector::parse("a").unwrap();

    let mut tracks = Vec::new();
    for link in document.select(&selector) {
        if let Some(href) = link.value().attr("href") {
            match LinkKind::classify(href) {
                Some(LinkKind::Track) => state.accumulator.begin_track(href, text_of(&link))?,
                Some(LinkKind::Album) => {
                    let length = track_length(&link).unwrap_or_default();
                    state.accumulator.set_album(href, text_of(&link), length)?
                }
                Some(LinkKind::Artist) => state.accumulator.set_artist(href, text_of(&link))?,
                None => {}
            }
        }

        if state.accumulator.is_complete() {
            let track = state.accumulator.take(playlist, state.next_track_num);
            let key = track.key();
            if state.seen.contains(&key) {
                debug!("DUPLICATE {} | {}", track.track_name, track.artist_name);
                continue;
            }
            debug!(
                "ADDING {} {} | {}",
                track.track_num, track.track_name, track.artist_name
            );
            state.seen.insert(key);
            state.next_track_num += 1;
            tracks.push(track);
        }
    }
    Ok(tracks)
}

fn text_of(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of the first element after the link's grandparent.
fn track_length(link: &ElementRef) -> Option<String> {
    let container = link.parent()?.parent()?;
    let sibling = container.next_siblings().find(|n| n.value().is_element())?;
    ElementRef::wrap(sibling).map(|e| text_of(&e))
}
