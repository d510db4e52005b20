//! Informational output.

use crate::types;
use std::io::{self, Write};
use tabwriter::TabWriter;

/// Tracks written for one playlist, or why none were.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Written(usize),
    Failed(String),
}

/// Render the per-playlist results as an aligned table.
pub fn summary(results: &[(String, Outcome)]) -> types::StringResult {
    let mut tw = TabWriter::new(vec![]);
    writeln!(tw, "PLAYLIST\tTRACKS")?;
    for (title, outcome) in results {
        match outcome {
            Outcome::Written(count) => writeln!(tw, "{}\t{}", title, count)?,
            Outcome::Failed(reason) => writeln!(tw, "{}\tFAILED ({})", title, reason)?,
        }
    }
    let total: usize = results
        .iter()
        .map(|(_, outcome)| match outcome {
            Outcome::Written(count) => *count,
            Outcome::Failed(_) => 0,
        })
        .sum();
    writeln!(tw, "TOTAL\t{}", total)?;

    let bytes = tw
        .into_inner()
        .map_err(|e| io::Error::new(e.error().kind(), e.error().to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
