//! JSON loading from files.
//!
//! Handles single documents and newline-delimited (NDJSON) document streams.

use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;

/// Load one JSON document from a file.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// or `LoadError::InvalidJson` if the file isn't valid JSON.
pub fn load_json(path: &Path) -> Result<Value, LoadError> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|source| LoadError::InvalidJson {
        path: path.to_path_buf(),
        line: source.line(),
        source,
    })
}

/// Load newline-delimited JSON documents from a file, in file order.
///
/// Blank lines are skipped.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` naming the first line that fails to parse.
pub fn load_documents(path: &Path) -> Result<Vec<Value>, LoadError> {
    let content = read(path)?;
    parse_documents(&content).map_err(|(line, source)| LoadError::InvalidJson {
        path: path.to_path_buf(),
        line,
        source,
    })
}

/// Parse NDJSON text. On failure returns the 1-based line number and error.
pub fn parse_documents(content: &str) -> Result<Vec<Value>, (usize, serde_json::Error)> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| serde_json::from_str(line).map_err(|e| (i + 1, e)))
        .collect()
}

fn read(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}
