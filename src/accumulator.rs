//! Field-by-field collection of a single track row.
//!
//! A playlist row renders as three links in document order: the track, its
//! album (with the track length next to it) and the artist. Each link fills
//! in its group of fields. A link whose group is already filled means a new
//! row started before the previous one completed, which is reported as a
//! protocol violation.

use crate::error::{Error, Field};
use crate::records::{format_track_num, PlaylistRecord, TrackRecord};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackAccumulator {
    track_url: Option<String>,
    track_name: Option<String>,
    track_length: Option<String>,
    album_url: Option<String>,
    album_name: Option<String>,
    artist_url: Option<String>,
    artist_name: Option<String>,
}

impl TrackAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_track(&mut self, href: &str, name: String) -> Result<(), Error> {
        if self.track_url.is_some() {
            return Err(violation(Field::Track, href));
        }
        self.track_url = Some(href.to_string());
        self.track_name = Some(name);
        Ok(())
    }

    pub fn set_album(&mut self, href: &str, name: String, length: String) -> Result<(), Error> {
        if self.album_url.is_some() || is_filled(&self.track_length) {
            return Err(violation(Field::Album, href));
        }
        self.album_url = Some(href.to_string());
        self.album_name = Some(name);
        self.track_length = Some(length);
        Ok(())
    }

    pub fn set_artist(&mut self, href: &str, name: String) -> Result<(), Error> {
        if self.artist_url.is_some() {
            return Err(violation(Field::Artist, href));
        }
        self.artist_url = Some(href.to_string());
        self.artist_name = Some(name);
        Ok(())
    }

    /// Name, length, album and artist are all present and non-empty.
    pub fn is_complete(&self) -> bool {
        is_filled(&self.track_name)
            && is_filled(&self.track_length)
            && is_filled(&self.album_name)
            && is_filled(&self.artist_name)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build the row for `playlist` from the collected fields and reset.
    /// Fields that were never seen are written as empty strings.
    pub fn take(&mut self, playlist: &PlaylistRecord, track_num: u32) -> TrackRecord {
        let fields = self.clone();
        self.reset();
        TrackRecord {
            playlist_url: playlist.url.clone(),
            playlist_title: playlist.title.clone(),
            track_url: fields.track_url.unwrap_or_default(),
            track_num: format_track_num(track_num),
            track_name: fields.track_name.unwrap_or_default(),
            track_length: fields.track_length.unwrap_or_default(),
            album_url: fields.album_url.unwrap_or_default(),
            album_name: fields.album_name.unwrap_or_default(),
            artist_url: fields.artist_url.unwrap_or_default(),
            artist_name: fields.artist_name.unwrap_or_default(),
        }
    }
}

fn is_filled(field: &Option<String>) -> bool {
    field.as_ref().is_some_and(|s| !s.is_empty())
}

fn violation(field: Field, href: &str) -> Error {
    Error::ProtocolViolation {
        field,
        href: href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> TrackAccumulator {
        let mut acc = TrackAccumulator::new();
        acc.begin_track("/albums/A?trackAsin=T", String::from("Song"))
            .unwrap();
        acc.set_album("/albums/A", String::from("Album"), String::from("03:30"))
            .unwrap();
        acc.set_artist("/artists/X/band", String::from("Band"))
            .unwrap();
        acc
    }

    #[test]
    fn completes_after_all_groups() {
        let mut acc = TrackAccumulator::new();
        assert!(!acc.is_complete());
        acc.begin_track("/albums/A?trackAsin=T", String::from("Song"))
            .unwrap();
        assert!(!acc.is_complete());
        acc.set_album("/albums/A", String::from("Album"), String::from("03:30"))
            .unwrap();
        assert!(!acc.is_complete());
        acc.set_artist("/artists/X/band", String::from("Band"))
            .unwrap();
        assert!(acc.is_complete());
    }

    #[test]
    fn rejects_second_track() {
        let mut acc = TrackAccumulator::new();
        acc.begin_track("/albums/A?trackAsin=1", String::from("One"))
            .unwrap();
        let err = acc
            .begin_track("/albums/A?trackAsin=2", String::from("Two"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ProtocolViolation {
                field: Field::Track,
                ..
            }
        ));
    }

    #[test]
    fn rejects_second_album_and_artist() {
        let mut acc = filled();
        assert!(acc
            .set_album("/albums/B", String::from("B"), String::from("01:00"))
            .is_err());
        assert!(acc
            .set_artist("/artists/Y/other", String::from("Other"))
            .is_err());
    }

    #[test]
    fn empty_length_blocks_completion() {
        let mut acc = TrackAccumulator::new();
        acc.begin_track("/albums/A?trackAsin=T", String::from("Song"))
            .unwrap();
        acc.set_album("/albums/A", String::from("Album"), String::new())
            .unwrap();
        acc.set_artist("/artists/X/band", String::from("Band"))
            .unwrap();
        assert!(!acc.is_complete());
        // A second album link is still refused since the album URL is set
        assert!(acc
            .set_album("/albums/A", String::from("Album"), String::from("03:30"))
            .is_err());
    }

    #[test]
    fn reset_discards_partial_row() {
        let mut acc = TrackAccumulator::default();
        acc.begin_track("/albums/A?trackAsin=1", String::from("First"))
            .unwrap();
        acc.reset();
        assert!(acc.is_empty());
        acc.begin_track("/albums/A?trackAsin=2", String::from("Second"))
            .unwrap();
        assert!(!acc.is_complete());
    }

    #[test]
    fn take_resets() {
        let mut acc = filled();
        let playlist = PlaylistRecord::new("Code", "/my/playlists/1");
        let row = acc.take(&playlist, 3);
        assert!(acc.is_empty());
        assert_eq!(row.track_num, "0003");
        assert_eq!(row.track_name, "Song");
        assert_eq!(row.track_length, "03:30");
        assert_eq!(row.album_url, "/albums/A");
        assert_eq!(row.artist_name, "Band");
        assert_eq!(row.playlist_title, "Code");
    }
}
