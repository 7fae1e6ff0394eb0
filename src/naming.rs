//! Field name transformation.

use crate::error::CompileError;

/// Maps a declared field name to the name used in the mapping.
///
/// Closures of the form `Fn(&str) -> Result<String, CompileError>` implement
/// this too.
pub trait FieldNameTransformer: Send + Sync {
    fn transform_field_name(&self, name: &str) -> Result<String, CompileError>;
}

impl<F> FieldNameTransformer for F
where
    F: Fn(&str) -> Result<String, CompileError> + Send + Sync,
{
    fn transform_field_name(&self, name: &str) -> Result<String, CompileError> {
        self(name)
    }
}

/// Converts names to snake_case. The default transformer.
///
/// - `FooBar` → `foo_bar`
/// - `FOOBar` → `foo_bar` (an uppercase run is one word)
/// - `Foo123Bar` → `foo_123_bar`
/// - `123Foo` → `123_foo`
/// - `ÄrgerÖl` → `ärger_öl` (case rules are Unicode-aware; digits are ASCII)
/// - existing underscores are kept and never doubled
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeCaser;

impl SnakeCaser {
    pub fn new() -> Self {
        Self
    }

    pub fn to_snake_case(&self, name: &str) -> String {
        let chars: Vec<char> = name.chars().collect();
        let mut result = String::with_capacity(name.len() + 4);

        for (i, &c) in chars.iter().enumerate() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let after_underscore = prev == Some('_');

            if c.is_uppercase() {
                if !result.is_empty() && !after_underscore {
                    let prev_upper = prev.map_or(false, |p| p.is_uppercase());
                    let next_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
                    // "FOOBar": the B starts a new word after the "FOO" run
                    let ends_run = prev_upper && next_lower && upper_run_before(&chars, i) >= 2;
                    if !prev_upper || ends_run {
                        result.push('_');
                    }
                }
                result.extend(c.to_lowercase());
            } else if c.is_ascii_digit() {
                if !result.is_empty() && !after_underscore {
                    let prev_digit = prev.map_or(false, |p| p.is_ascii_digit());
                    if !prev_digit {
                        result.push('_');
                    }
                }
                result.push(c);
            } else {
                result.push(c);
            }
        }

        result
    }
}

fn upper_run_before(chars: &[char], i: usize) -> usize {
    chars[..i]
        .iter()
        .rev()
        .take_while(|c| c.is_uppercase())
        .count()
}

impl FieldNameTransformer for SnakeCaser {
    fn transform_field_name(&self, name: &str) -> Result<String, CompileError> {
        Ok(self.to_snake_case(name))
    }
}

/// Leaves names untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransformer;

impl FieldNameTransformer for IdentityTransformer {
    fn transform_field_name(&self, name: &str) -> Result<String, CompileError> {
        Ok(name.to_string())
    }
}
