use std::fmt;
use thiserror::Error;

/// The accumulator field a link tried to populate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Track,
    Album,
    Artist,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Track => "track",
            Self::Album => "album",
            Self::Artist => "artist",
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Browser error: {0}")]
    Browser(String),

    /// Recoverable: the session is torn down and the work item skipped.
    #[error("Could not get page {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Fatal: the page layout no longer matches the expected row structure.
    #[error("New track row before getting previous: {field} link {href}")]
    ProtocolViolation { field: Field, href: String },

    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}

impl Error {
    pub fn browser(e: impl fmt::Display) -> Self {
        Self::Browser(e.to_string())
    }

    pub fn fetch(url: &str, reason: impl fmt::Display) -> Self {
        Self::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }
}
