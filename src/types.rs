//! Core types for mapping generation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default maximum nesting depth, counted from 1 at the root record.
pub const DEFAULT_MAX_DEPTH: u8 = 2;

/// One field of a compiled mapping.
///
/// A node is either a leaf (`field_type` set, no children) or a parent
/// (`field_type` empty, at least one child).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSchema {
    /// Field name after transformation.
    pub name: String,
    /// OpenSearch type, e.g. `text`. Empty for parents.
    pub field_type: String,
    pub format: Option<String>,
    pub children: Vec<FieldSchema>,
    pub index_prefixes: Option<BTreeMap<String, String>>,
    pub analyzer: Option<String>,
    pub search_analyzer: Option<String>,
    pub copy_to: Option<Vec<String>>,
}

impl FieldSchema {
    /// Create a leaf field.
    pub fn leaf(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            ..Self::default()
        }
    }

    /// Create a parent field wrapping nested fields.
    pub fn object(name: impl Into<String>, children: Vec<FieldSchema>) -> Self {
        Self {
            name: name.into(),
            children,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    pub fn with_search_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.search_analyzer = Some(analyzer.into());
        self
    }

    pub fn with_index_prefixes(mut self, prefixes: BTreeMap<String, String>) -> Self {
        self.index_prefixes = Some(prefixes);
        self
    }

    pub fn with_copy_to<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.copy_to = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_leaf(&self) -> bool {
        !self.field_type.is_empty()
    }

    /// Depth of the deepest leaf below and including this node (a leaf is 1).
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(FieldSchema::depth).max().unwrap_or(0)
    }
}

/// Index-level settings, passed through verbatim.
///
/// See the OpenSearch create-index documentation for each setting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_shards: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_replicas: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_routing_shards: Option<u16>,
    /// e.g. `0-5` or `0-all`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_expand_replicas: Option<String>,
    /// e.g. `1s`, or `-1` to disable refresh
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_partition_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_pipeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_pipeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_result_window: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_inner_result_window: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ngram_diff: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_shingle_diff: Option<u32>,
}

/// Options for index document generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    /// When true, adds `"dynamic": "strict"` to `mappings` so the index
    /// rejects documents with undeclared fields.
    pub strict: bool,
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set strict mapping mode.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
