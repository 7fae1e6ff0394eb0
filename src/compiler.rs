//! Schema compilation - walks a record's fields and builds the mapping tree.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::annotation::{
    get_option, parse_list_option, parse_map_option, LIST_SEP, OPTION_ANALYZER, OPTION_COPY_TO,
    OPTION_FORMAT, OPTION_INDEX_PREFIXES, OPTION_SEARCH_ANALYZER, OPTION_TYPE,
};
use crate::descriptor::{Field, FieldKind, Record};
use crate::error::CompileError;
use crate::naming::{FieldNameTransformer, SnakeCaser};
use crate::types::{FieldSchema, DEFAULT_MAX_DEPTH};

/// OpenSearch type for date-capable fields.
const DATE_TYPE: &str = "date";

/// Builds [`FieldSchema`] trees from [`Record`] types.
///
/// Holds configuration only; one compiler can be reused and shared.
pub struct SchemaCompiler {
    max_depth: u8,
    omit_unsupported_types: bool,
    name_transformer: Box<dyn FieldNameTransformer>,
}

impl Default for SchemaCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SchemaCompiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaCompiler")
            .field("max_depth", &self.max_depth)
            .field("omit_unsupported_types", &self.omit_unsupported_types)
            .finish_non_exhaustive()
    }
}

impl SchemaCompiler {
    /// Max depth 2, unsupported types are errors, snake_case names.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            omit_unsupported_types: false,
            name_transformer: Box::new(SnakeCaser::new()),
        }
    }

    /// Set the maximum nesting depth. Nested records that would go deeper are
    /// left out, which is how self-referential types terminate.
    pub fn max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Skip fields of unsupported types instead of failing.
    pub fn omit_unsupported_types(mut self, omit: bool) -> Self {
        self.omit_unsupported_types = omit;
        self
    }

    pub fn name_transformer(mut self, transformer: impl FieldNameTransformer + 'static) -> Self {
        self.name_transformer = Box::new(transformer);
        self
    }

    /// Compile the mapping for record type `R`.
    ///
    /// # Errors
    ///
    /// Returns the first `CompileError` in declaration order; no partial tree
    /// is returned.
    pub fn compile<R: Record>(&self) -> Result<Vec<FieldSchema>, CompileError> {
        self.compile_fields(&R::fields())
    }

    /// Compile an explicit field list as the root record.
    pub fn compile_fields(&self, fields: &[Field]) -> Result<Vec<FieldSchema>, CompileError> {
        self.compile_level(fields, 1, "")
    }

    fn compile_level(
        &self,
        fields: &[Field],
        level: usize,
        path: &str,
    ) -> Result<Vec<FieldSchema>, CompileError> {
        let mut schemas = Vec::with_capacity(fields.len());
        let mut seen = HashSet::new();

        for field in fields {
            let field_path = if path.is_empty() {
                field.name().to_string()
            } else {
                format!("{}.{}", path, field.name())
            };
            let kind = field.kind();

            if let FieldKind::Timestamp(type_name) = kind {
                return Err(CompileError::ReservedTemporalType {
                    field: field_path,
                    type_name,
                });
            }

            let field_type = resolve_field_type(field, kind);
            let format = resolve_field_format(field, kind);
            let name = self
                .name_transformer
                .transform_field_name(field.name())?;

            if let Some(field_type) = field_type {
                trace!(field = %field_path, %field_type, "compiled leaf");
                let mut schema = FieldSchema {
                    name,
                    field_type,
                    format,
                    ..FieldSchema::default()
                };
                add_properties(field, &mut schema);
                claim_name(&mut seen, &schema.name, &field_path)?;
                schemas.push(schema);
                continue;
            }

            if let FieldKind::Record(nested) = kind {
                if level + 1 > usize::from(self.max_depth) {
                    debug!(field = %field_path, level, "max depth reached, omitting nested record");
                    continue;
                }
                let children = self.compile_level(&nested(), level + 1, &field_path)?;
                if children.is_empty() {
                    debug!(field = %field_path, "nested record has no fields, omitting");
                    continue;
                }
                claim_name(&mut seen, &name, &field_path)?;
                schemas.push(FieldSchema {
                    name,
                    format,
                    children,
                    ..FieldSchema::default()
                });
                continue;
            }

            if !self.omit_unsupported_types {
                return Err(CompileError::UnsupportedFieldType {
                    field: field_path,
                    kind: kind.describe(),
                });
            }
            debug!(field = %field_path, kind = kind.describe(), "omitting unsupported field");
        }

        Ok(schemas)
    }
}

/// Explicit `type` annotation, else the primitive default, else `date` for
/// date-capable types.
fn resolve_field_type(field: &Field, kind: FieldKind) -> Option<String> {
    let type_override = get_option(field.annotation(), OPTION_TYPE);
    if !type_override.is_empty() {
        return Some(type_override);
    }
    if let Some(default) = kind.primitive_type() {
        return Some(default.to_string());
    }
    match kind {
        FieldKind::Date(format) if !format.is_empty() => Some(DATE_TYPE.to_string()),
        _ => None,
    }
}

/// Explicit `format` annotation, else the date type's own format.
fn resolve_field_format(field: &Field, kind: FieldKind) -> Option<String> {
    let format_override = get_option(field.annotation(), OPTION_FORMAT);
    if !format_override.is_empty() {
        return Some(format_override);
    }
    match kind {
        FieldKind::Date(format) if !format.is_empty() => Some(format.to_string()),
        _ => None,
    }
}

/// Sibling names must stay unique after transformation, or one would
/// overwrite the other under `properties`.
fn claim_name(
    seen: &mut HashSet<String>,
    name: &str,
    field_path: &str,
) -> Result<(), CompileError> {
    if seen.insert(name.to_string()) {
        return Ok(());
    }
    Err(CompileError::DuplicateFieldName {
        field: field_path.to_string(),
        name: name.to_string(),
    })
}

fn add_properties(field: &Field, schema: &mut FieldSchema) {
    let annotation = field.annotation();

    let index_prefixes = get_option(annotation, OPTION_INDEX_PREFIXES);
    if !index_prefixes.is_empty() {
        schema.index_prefixes = Some(parse_map_option(&index_prefixes));
    }

    let analyzer = get_option(annotation, OPTION_ANALYZER);
    if !analyzer.is_empty() {
        schema.analyzer = Some(analyzer);
    }

    let search_analyzer = get_option(annotation, OPTION_SEARCH_ANALYZER);
    if !search_analyzer.is_empty() {
        schema.search_analyzer = Some(search_analyzer);
    }

    schema.copy_to = parse_list_option(&get_option(annotation, OPTION_COPY_TO), LIST_SEP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_type;
    use crate::time_formats::{BasicDate, BasicDateTime, BasicDateTimeNoMillis};
    use std::collections::HashMap;

    struct Location;

    impl Record for Location {
        fn fields() -> Vec<Field> {
            vec![
                Field::new::<String>("name"),
                Field::new::<Option<Box<Location>>>("loc"),
            ]
        }
    }

    record_type!(Location);

    #[test]
    fn primitives_and_their_pointers() {
        let fields = vec![
            Field::new::<u8>("Age"),
            Field::new::<Option<u8>>("Age2"),
            Field::new::<String>("Name"),
            Field::new::<Box<String>>("Name2"),
            Field::new::<f64>("Balance"),
            Field::new::<Option<f64>>("Balance2"),
        ];
        let schemas = SchemaCompiler::new().compile_fields(&fields).unwrap();
        assert_eq!(
            schemas,
            vec![
                FieldSchema::leaf("age", "integer"),
                FieldSchema::leaf("age_2", "integer"),
                FieldSchema::leaf("name", "text"),
                FieldSchema::leaf("name_2", "text"),
                FieldSchema::leaf("balance", "float"),
                FieldSchema::leaf("balance_2", "float"),
            ]
        );
    }

    #[test]
    fn type_annotation_beats_primitive_default() {
        let fields = vec![
            Field::new::<String>("Name"),
            Field::new::<String>("Email").annotated("type:keyword"),
            Field::new::<u64>("Count").annotated("type:long"),
        ];
        let schemas = SchemaCompiler::new().compile_fields(&fields).unwrap();
        assert_eq!(schemas[0].field_type, "text");
        assert_eq!(schemas[1].field_type, "keyword");
        assert_eq!(schemas[2].field_type, "long");
    }

    #[test]
    fn date_types_get_their_formats() {
        let fields = vec![
            Field::new::<BasicDateTime>("A"),
            Field::new::<BasicDateTimeNoMillis>("B"),
            Field::new::<Option<BasicDate>>("C"),
        ];
        let schemas = SchemaCompiler::new().compile_fields(&fields).unwrap();
        assert_eq!(
            schemas,
            vec![
                FieldSchema::leaf("a", "date").with_format("basic_date_time"),
                FieldSchema::leaf("b", "date").with_format("basic_date_time_no_millis"),
                FieldSchema::leaf("c", "date").with_format("basic_date"),
            ]
        );
    }

    #[test]
    fn format_annotation_beats_date_format() {
        let fields = vec![Field::new::<BasicDate>("Day").annotated("format:yyyy-MM-dd")];
        let schemas = SchemaCompiler::new().compile_fields(&fields).unwrap();
        assert_eq!(schemas[0].format.as_deref(), Some("yyyy-MM-dd"));
        assert_eq!(schemas[0].field_type, "date");
    }

    #[test]
    fn native_timestamp_is_rejected_despite_annotations() {
        let fields = vec![
            Field::new::<String>("Name"),
            Field::new::<chrono::DateTime<chrono::Utc>>("DOB")
                .annotated("type:date,format:basic_date"),
        ];
        let err = SchemaCompiler::new()
            .omit_unsupported_types(true)
            .compile_fields(&fields)
            .unwrap_err();
        assert!(matches!(
            err,
            CompileError::ReservedTemporalType { ref field, .. } if field == "DOB"
        ));
    }

    #[test]
    fn default_depth_truncates_recursion() {
        let schemas = SchemaCompiler::new().compile::<Location>().unwrap();
        assert_eq!(
            schemas,
            vec![
                FieldSchema::leaf("name", "text"),
                FieldSchema::object("loc", vec![FieldSchema::leaf("name", "text")]),
            ]
        );
    }

    #[test]
    fn given_depth_truncates_recursion() {
        let schemas = SchemaCompiler::new().max_depth(3).compile::<Location>().unwrap();
        assert_eq!(
            schemas,
            vec![
                FieldSchema::leaf("name", "text"),
                FieldSchema::object(
                    "loc",
                    vec![
                        FieldSchema::leaf("name", "text"),
                        FieldSchema::object("loc", vec![FieldSchema::leaf("name", "text")]),
                    ]
                ),
            ]
        );
    }

    #[test]
    fn depth_one_keeps_only_root_leaves() {
        let schemas = SchemaCompiler::new().max_depth(1).compile::<Location>().unwrap();
        assert_eq!(schemas, vec![FieldSchema::leaf("name", "text")]);
    }

    #[test]
    fn unsupported_type_fails_or_is_omitted() {
        let fields = vec![
            Field::new::<String>("Name"),
            Field::new::<HashMap<String, String>>("Labels"),
        ];

        let err = SchemaCompiler::new().compile_fields(&fields).unwrap_err();
        assert!(matches!(
            err,
            CompileError::UnsupportedFieldType { ref field, kind: "map" } if field == "Labels"
        ));

        let schemas = SchemaCompiler::new()
            .omit_unsupported_types(true)
            .compile_fields(&fields)
            .unwrap();
        assert_eq!(schemas, vec![FieldSchema::leaf("name", "text")]);
    }

    #[test]
    fn type_annotation_rescues_unsupported_type() {
        let fields =
            vec![Field::new::<HashMap<String, String>>("Labels").annotated("type:flat_object")];
        let schemas = SchemaCompiler::new().compile_fields(&fields).unwrap();
        assert_eq!(schemas, vec![FieldSchema::leaf("labels", "flat_object")]);
    }

    #[test]
    fn auxiliary_annotations() {
        let fields = vec![
            Field::new::<String>("Title").annotated(
                "search_analyzer:english, copy_to:all_text,foo_text, analyzer:standard",
            ),
            Field::new::<String>("Name").annotated("index_prefixes:min_chars=2;max_chars=10"),
        ];
        let schemas = SchemaCompiler::new().compile_fields(&fields).unwrap();

        assert_eq!(
            schemas[0],
            FieldSchema::leaf("title", "text")
                .with_analyzer("standard")
                .with_search_analyzer("english")
                .with_copy_to(["all_text", "foo_text"])
        );

        let prefixes = schemas[1].index_prefixes.as_ref().unwrap();
        assert_eq!(prefixes["min_chars"], "2");
        assert_eq!(prefixes["max_chars"], "10");
    }

    #[test]
    fn custom_name_transformer() {
        let fields = vec![Field::new::<String>("FullName")];
        let schemas = SchemaCompiler::new()
            .name_transformer(crate::naming::IdentityTransformer)
            .compile_fields(&fields)
            .unwrap();
        assert_eq!(schemas[0].name, "FullName");
    }

    #[test]
    fn name_transformer_errors_propagate() {
        let fields = vec![Field::new::<String>("bad name")];
        let err = SchemaCompiler::new()
            .name_transformer(|name: &str| -> Result<String, CompileError> {
                Err(CompileError::NameTransform {
                    field: name.to_string(),
                    message: "contains a space".into(),
                })
            })
            .compile_fields(&fields)
            .unwrap_err();
        assert!(matches!(err, CompileError::NameTransform { .. }));
    }

    #[test]
    fn colliding_sibling_names_are_rejected() {
        let fields = vec![Field::new::<String>("FooBar"), Field::new::<u8>("foo_bar")];
        let err = SchemaCompiler::new().compile_fields(&fields).unwrap_err();
        assert!(matches!(
            err,
            CompileError::DuplicateFieldName { ref field, ref name }
                if field == "foo_bar" && name == "foo_bar"
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn colliding_names_inside_nested_record_report_the_path() {
        struct Inner;

        impl Record for Inner {
            fn fields() -> Vec<Field> {
                vec![Field::new::<String>("Zip"), Field::new::<String>("ZIP")]
            }
        }

        record_type!(Inner);

        let fields = vec![Field::new::<Inner>("Address")];
        let err = SchemaCompiler::new().compile_fields(&fields).unwrap_err();
        assert!(matches!(
            err,
            CompileError::DuplicateFieldName { ref field, ref name }
                if field == "Address.ZIP" && name == "zip"
        ));
    }

    #[test]
    fn same_name_on_different_levels_is_allowed() {
        let schemas = SchemaCompiler::new().compile::<Location>().unwrap();
        assert_eq!(schemas[0].name, "name");
        assert_eq!(schemas[1].children[0].name, "name");
    }
}
