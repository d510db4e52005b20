//! CSV output tables.
//!
//! Each table is created with its header row first, rows are appended
//! afterwards without repeating it.

use crate::records::{PlaylistRecord, TrackRecord};
use crate::types::{PlaylistsResult, UnitResult};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::Path;
use tracing::debug;

pub const PLAYLISTS_FILE: &str = "playlists.csv";
pub const TRACKS_FILE: &str = "tracks.csv";

pub const PLAYLIST_FIELDS: [&str; 2] = ["playlistTitle", "playlistUrl"];
pub const TRACK_FIELDS: [&str; 10] = [
    "playlistUrl",
    "playlistTitle",
    "trackUrl",
    "trackNum",
    "trackName",
    "trackLength",
    "albumUrl",
    "albumName",
    "artistUrl",
    "artistName",
];

/// Create (or truncate) the file at `path` with only the header row.
fn create(path: &Path, header: &[&str]) -> UnitResult {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;
    writer.flush()?;
    Ok(())
}

fn append<T: Serialize>(path: &Path, rows: &[T]) -> UnitResult {
    let file = OpenOptions::new().append(true).create(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    debug!("Appended {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn create_playlists(path: &Path) -> UnitResult {
    create(path, &PLAYLIST_FIELDS)
}

pub fn append_playlists(path: &Path, playlists: &[PlaylistRecord]) -> UnitResult {
    append(path, playlists)
}

pub fn create_tracks(path: &Path) -> UnitResult {
    create(path, &TRACK_FIELDS)
}

pub fn append_tracks(path: &Path, tracks: &[TrackRecord]) -> UnitResult {
    append(path, tracks)
}

/// Read back a playlist table written by `create_playlists` and
/// `append_playlists`.
pub fn read_playlists(path: &Path) -> PlaylistsResult {
    let mut reader = csv::Reader::from_reader(File::open(path)?);
    let mut playlists = Vec::new();
    for row in reader.deserialize() {
        playlists.push(row?);
    }
    Ok(playlists)
}
