use crate::types;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Print `prompt` and read one line from `reader`, trimmed.
pub fn input<R: BufRead>(prompt: &str, reader: &mut R) -> types::StringResult {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    reader.read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Create the directory at `path` (and its parents) if it does not exist.
pub fn guarantee_dir_path(path: PathBuf) -> types::Result<PathBuf> {
    fs::create_dir_all(&path)?;
    Ok(path)
}

/// Parse a `true`/`false` config value.
pub fn parse_bool(key: &str, value: &str) -> types::Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(crate::error::Error::Config(format!(
            "Invalid value for '{}': {}",
            key, value
        ))),
    }
}
