//! JSON canonicalization.

use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter};
use serde_json::{Map, Value};

use crate::error::EncodeError;

/// Indentation used by [`IndentJsonFormatter`].
pub const INDENT: &[u8] = b"   ";

/// Re-emits JSON bytes in a canonical form.
pub trait JsonFormatter: Send + Sync {
    fn format_json(&self, json: &[u8]) -> Result<Vec<u8>, EncodeError>;
}

/// Sorts object keys and indents with three spaces. The default formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndentJsonFormatter;

/// Sorts object keys and emits a single line.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactJsonFormatter;

impl IndentJsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl CompactJsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl JsonFormatter for IndentJsonFormatter {
    fn format_json(&self, json: &[u8]) -> Result<Vec<u8>, EncodeError> {
        let value = parse_sorted(json)?;
        write_with(&value, PrettyFormatter::with_indent(INDENT))
    }
}

impl JsonFormatter for CompactJsonFormatter {
    fn format_json(&self, json: &[u8]) -> Result<Vec<u8>, EncodeError> {
        let value = parse_sorted(json)?;
        write_with(&value, CompactFormatter)
    }
}

fn parse_sorted(json: &[u8]) -> Result<Value, EncodeError> {
    let value: Value =
        serde_json::from_slice(json).map_err(|source| EncodeError::Format { source })?;
    Ok(sort_keys(value))
}

fn write_with<F: serde_json::ser::Formatter>(
    value: &Value,
    formatter: F,
) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut ser)
        .map_err(|source| EncodeError::Encoding {
            step: "format_json",
            source,
        })?;
    Ok(out)
}

/// Recursively rebuild objects with keys in lexicographic order.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k, sort_keys(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
