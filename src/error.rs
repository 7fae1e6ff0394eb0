//! Error types for mapping compilation, encoding and loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while compiling a record type into a schema tree.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(
        "field not supported: {field} ({kind}), use SchemaCompiler::omit_unsupported_types \
         to skip fields of unsupported types"
    )]
    UnsupportedFieldType { field: String, kind: &'static str },

    #[error(
        "field {field} uses {type_name} directly: use BasicDateTime, BasicDateTimeNoMillis, \
         BasicDate or a custom type implementing DateType with an OpenSearch date format"
    )]
    ReservedTemporalType {
        field: String,
        type_name: &'static str,
    },

    #[error("cannot transform field name {field}: {message}")]
    NameTransform { field: String, message: String },

    #[error("field {field} maps to name \"{name}\", which an earlier sibling already uses")]
    DuplicateFieldName { field: String, name: String },
}

/// Errors while turning a schema tree into JSON bytes.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("{step}: {source}")]
    Encoding {
        step: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("format_json: invalid JSON: {source}")]
    Format {
        #[source]
        source: serde_json::Error,
    },
}

/// A date wrapper received text that doesn't match its format.
#[derive(Debug, Error)]
#[error("cannot parse \"{input}\" as {format}: {source}")]
pub struct DateParseError {
    pub input: String,
    pub format: &'static str,
    #[source]
    pub source: chrono::ParseError,
}

/// Errors while loading JSON documents from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON in {path} at line {line}: {source}")]
    InvalidJson {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from the one-shot compile-and-serialize helpers.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl CompileError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl EncodeError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            LoadError::InvalidJson { .. } => 2,
        }
    }
}

impl GenerateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            GenerateError::Compile(e) => e.exit_code(),
            GenerateError::Encode(e) => e.exit_code(),
        }
    }
}
