use crate::error::Error;
use crate::records::{PlaylistRecord, TrackRecord};
use crate::Config;

pub type Result<T> = std::result::Result<T, Error>;
pub type ConfigResult = Result<Config>;
pub type UnitResult = Result<()>;
pub type StringResult = Result<String>;
pub type PlaylistsResult = Result<Vec<PlaylistRecord>>;
pub type TracksResult = Result<Vec<TrackRecord>>;
