//! Rows written to the output tables.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistRecord {
    #[serde(rename = "playlistTitle")]
    pub title: String,
    #[serde(rename = "playlistUrl")]
    pub url: String,
}

impl PlaylistRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    pub playlist_url: String,
    pub playlist_title: String,
    pub track_url: String,
    pub track_num: String,
    pub track_name: String,
    pub track_length: String,
    pub album_url: String,
    pub album_name: String,
    pub artist_url: String,
    pub artist_name: String,
}

impl TrackRecord {
    /// The deduplication key. The track URL is deliberately not part of it:
    /// rows are considered equal when the displayed metadata is.
    pub fn key(&self) -> TrackKey {
        TrackKey {
            playlist_title: self.playlist_title.clone(),
            track_name: self.track_name.clone(),
            track_length: self.track_length.clone(),
            album_name: self.album_name.clone(),
            artist_name: self.artist_name.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TrackKey {
    pub playlist_title: String,
    pub track_name: String,
    pub track_length: String,
    pub album_name: String,
    pub artist_name: String,
}

/// Track numbers are 1-based and zero padded to four digits.
pub fn format_track_num(num: u32) -> String {
    format!("{:04}", num)
}
