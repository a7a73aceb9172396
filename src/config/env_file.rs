//! Plain-text `KEY=VALUE` env file parsing.
//!
//! - `#` starts a comment anywhere on a line
//! - Blank and comment-only lines are skipped
//! - The line is split on the first `=`; key and value are trimmed
//! - Lines without `=` or with an empty key are ignored
//! - No quoting, escaping or interpolation
//!
//! Files are merged in order and every assignment overwrites earlier ones, so
//! the last write wins both within a file and across files.

use crate::error::{ConfigError, Result};
use indexmap::IndexMap;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Merged mapping of variable name to raw string value.
pub type EnvFileMap = IndexMap<String, String>;

/// What a single line holds once comments are stripped.
enum Line {
    Blank,
    Assignment(String, String),
    /// Text without a usable `KEY=` assignment.
    Ignored,
}

fn classify(line: &str) -> Line {
    let content = match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    };
    let content = content.trim();
    if content.is_empty() {
        return Line::Blank;
    }

    match content.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Line::Assignment(key.trim().to_string(), value.trim().to_string())
        }
        _ => Line::Ignored,
    }
}

/// Parse one line into a key/value pair.
pub fn parse_line(line: &str) -> Option<(String, String)> {
    match classify(line) {
        Line::Assignment(key, value) => Some((key, value)),
        Line::Blank | Line::Ignored => None,
    }
}

/// Parse file contents, later lines overriding earlier ones.
pub fn parse_str(contents: &str) -> EnvFileMap {
    let mut map = EnvFileMap::new();
    for (idx, line) in contents.lines().enumerate() {
        match classify(line) {
            Line::Assignment(key, value) => {
                map.insert(key, value);
            }
            Line::Blank => {}
            Line::Ignored => {
                // Line text may hold secrets, log the position only.
                debug!(line = idx + 1, "Ignoring env file line without a key assignment");
            }
        }
    }
    map
}

/// Read and parse one env file. A missing file yields an empty map.
///
/// Bytes that are not valid UTF-8 are replaced rather than failing the file.
pub fn read_env_file(path: &Path) -> Result<EnvFileMap> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(parse_str(&String::from_utf8_lossy(&bytes))),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Env file not found, skipping");
            Ok(EnvFileMap::new())
        }
        Err(source) => Err(ConfigError::EnvFileRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read env files in order and merge them, later files taking precedence.
pub fn read_env_files<P: AsRef<Path>>(paths: &[P]) -> Result<EnvFileMap> {
    let mut merged = EnvFileMap::new();
    for path in paths {
        let path = path.as_ref();
        let parsed = read_env_file(path)?;
        debug!(path = %path.display(), entries = parsed.len(), "Read env file");
        merged.extend(parsed);
    }
    Ok(merged)
}
