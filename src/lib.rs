//! OpenSearch Mapping Generator
//!
//! Derives OpenSearch index mappings from Rust record types and builds the
//! JSON bodies for create-index, put-mapping and bulk requests.
//!
//! # Example
//!
//! ```
//! use opensearch_mapping::{index_json, record_type, Field, GenerationOptions, Record};
//!
//! struct Location;
//!
//! impl Record for Location {
//!     fn fields() -> Vec<Field> {
//!         vec![
//!             Field::new::<String>("FullAddress"),
//!             Field::new::<bool>("Confirmed"),
//!         ]
//!     }
//! }
//!
//! struct Listing;
//!
//! impl Record for Listing {
//!     fn fields() -> Vec<Field> {
//!         vec![
//!             Field::new::<u32>("Id"),
//!             Field::new::<f64>("Price"),
//!             Field::new::<String>("Title").annotated("type:text,analyzer:standard"),
//!             Field::new::<Option<Location>>("Location"),
//!         ]
//!     }
//! }
//!
//! record_type!(Location);
//!
//! let json = index_json::<Listing>(None, &GenerationOptions::new()).unwrap();
//! let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
//!
//! assert_eq!(value["mappings"]["properties"]["id"]["type"], "integer");
//! assert_eq!(
//!     value["mappings"]["properties"]["location"]["properties"]["full_address"]["type"],
//!     "text"
//! );
//! ```
//!
//! # Type Resolution
//!
//! | Field type | Mapping |
//! |------------|---------|
//! | `type:` annotation | that type, always |
//! | `bool` | `boolean` |
//! | integers of any width | `integer` |
//! | `f32`, `f64` | `float` |
//! | `String`, `str`, `char` | `text` |
//! | [`DateType`] wrappers | `date` with the wrapper's `format` |
//! | [`Record`] types | nested `properties`, up to the max depth |
//! | `chrono` / `SystemTime` timestamps | error |
//!
//! `Option`, `Box`, `Rc`, `Arc`, references and collections map like the
//! type they hold.
//!
//! # Annotation Format
//!
//! ```text
//! type:text, analyzer:standard, search_analyzer:english, copy_to:all_text,foo_text
//! index_prefixes:min_chars=2;max_chars=10
//! ```

mod annotation;
mod bulk;
mod compiler;
mod descriptor;
mod error;
mod formatter;
mod generator;
mod loader;
mod naming;
mod time_formats;
mod types;

pub use annotation::{
    get_option, parse_list_option, parse_map_option, LIST_SEP, OPTION_ANALYZER, OPTION_COPY_TO,
    OPTION_FORMAT, OPTION_INDEX_PREFIXES, OPTION_SEARCH_ANALYZER, OPTION_TYPE,
};
pub use bulk::{build_bulk_body, BulkItem};
pub use compiler::SchemaCompiler;
pub use descriptor::{Field, FieldKind, FieldType, Record};
pub use error::{CompileError, DateParseError, EncodeError, GenerateError, LoadError};
pub use formatter::{CompactJsonFormatter, IndentJsonFormatter, JsonFormatter, INDENT};
pub use generator::{properties_value, IndexGenerator};
pub use loader::{load_documents, load_json, parse_documents};
pub use naming::{FieldNameTransformer, IdentityTransformer, SnakeCaser};
pub use time_formats::{BasicDate, BasicDateTime, BasicDateTimeNoMillis, DateType};
pub use types::{FieldSchema, GenerationOptions, IndexSettings, DEFAULT_MAX_DEPTH};

/// Compile `R` with default settings and build its create-index body.
///
/// # Errors
///
/// Returns `GenerateError` if compilation or encoding fails.
pub fn index_json<R: Record>(
    settings: Option<&IndexSettings>,
    options: &GenerationOptions,
) -> Result<Vec<u8>, GenerateError> {
    let fields = SchemaCompiler::new().compile::<R>()?;
    Ok(IndexGenerator::new().generate_index_json(&fields, settings, options)?)
}

/// Compile `R` with default settings and build its put-mapping body.
///
/// # Errors
///
/// Returns `GenerateError` if compilation or encoding fails.
pub fn mapping_json<R: Record>() -> Result<Vec<u8>, GenerateError> {
    let fields = SchemaCompiler::new().compile::<R>()?;
    Ok(IndexGenerator::new().generate_mapping_json(&fields)?)
}
