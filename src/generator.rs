//! Index document generation - turns a compiled mapping into JSON bytes.

use serde_json::{Map, Value};

use crate::error::EncodeError;
use crate::formatter::{IndentJsonFormatter, JsonFormatter};
use crate::types::{FieldSchema, GenerationOptions, IndexSettings};

/// Serializes [`FieldSchema`] trees into create-index and put-mapping bodies.
pub struct IndexGenerator {
    formatter: Box<dyn JsonFormatter>,
}

impl Default for IndexGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IndexGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexGenerator").finish_non_exhaustive()
    }
}

impl IndexGenerator {
    /// Generator using [`IndentJsonFormatter`].
    pub fn new() -> Self {
        Self {
            formatter: Box::new(IndentJsonFormatter::new()),
        }
    }

    pub fn with_formatter(formatter: impl JsonFormatter + 'static) -> Self {
        Self {
            formatter: Box::new(formatter),
        }
    }

    /// Build the body of a create-index request:
    /// `{"mappings": {"properties": ..., "dynamic": "strict"?}, "settings": ...?}`.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` if encoding or formatting fails.
    pub fn generate_index_json(
        &self,
        fields: &[FieldSchema],
        settings: Option<&IndexSettings>,
        options: &GenerationOptions,
    ) -> Result<Vec<u8>, EncodeError> {
        let mut mappings = Map::new();
        mappings.insert("properties".to_string(), properties_value(fields));
        if options.strict {
            mappings.insert("dynamic".to_string(), Value::String("strict".to_string()));
        }

        let mut root = Map::new();
        root.insert("mappings".to_string(), Value::Object(mappings));
        if let Some(settings) = settings {
            let settings =
                serde_json::to_value(settings).map_err(|source| EncodeError::Encoding {
                    step: "encode settings",
                    source,
                })?;
            root.insert("settings".to_string(), settings);
        }

        self.format(&Value::Object(root))
    }

    /// Build the body of a put-mapping request: `{"properties": ...}`.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` if encoding or formatting fails.
    pub fn generate_mapping_json(&self, fields: &[FieldSchema]) -> Result<Vec<u8>, EncodeError> {
        let mut root = Map::new();
        root.insert("properties".to_string(), properties_value(fields));
        self.format(&Value::Object(root))
    }

    fn format(&self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let raw = serde_json::to_vec(value).map_err(|source| EncodeError::Encoding {
            step: "encode document",
            source,
        })?;
        self.formatter.format_json(&raw)
    }
}

/// Convert sibling fields into a `properties` object.
pub fn properties_value(fields: &[FieldSchema]) -> Value {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|field| (field.name.clone(), field_value(field)))
        .collect();
    Value::Object(properties)
}

fn field_value(field: &FieldSchema) -> Value {
    let mut obj = Map::new();

    if !field.is_leaf() {
        obj.insert("properties".to_string(), properties_value(&field.children));
        return Value::Object(obj);
    }

    obj.insert("type".to_string(), Value::String(field.field_type.clone()));
    if let Some(format) = &field.format {
        obj.insert("format".to_string(), Value::String(format.clone()));
    }
    if let Some(prefixes) = &field.index_prefixes {
        let prefixes: Map<String, Value> = prefixes
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        obj.insert("index_prefixes".to_string(), Value::Object(prefixes));
    }
    if let Some(analyzer) = &field.analyzer {
        obj.insert("analyzer".to_string(), Value::String(analyzer.clone()));
    }
    if let Some(analyzer) = &field.search_analyzer {
        obj.insert("search_analyzer".to_string(), Value::String(analyzer.clone()));
    }
    if let Some(copy_to) = &field.copy_to {
        let copy_to = copy_to.iter().cloned().map(Value::String).collect();
        obj.insert("copy_to".to_string(), Value::Array(copy_to));
    }

    Value::Object(obj)
}
