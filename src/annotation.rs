//! Per-field annotation parsing.
//!
//! An annotation is a comma-separated list of `name:value` options, e.g.
//! `type:text, analyzer:standard`. A segment without a colon continues the
//! previous option's value, which lets list-valued options carry their own
//! commas:
//!
//! ```
//! use opensearch_mapping::get_option;
//!
//! let annotation = "type:text, copy_to:all_text,foo_text, analyzer:standard";
//! assert_eq!(get_option(annotation, "copy_to"), "all_text,foo_text");
//! assert_eq!(get_option(annotation, "analyzer"), "standard");
//! assert_eq!(get_option(annotation, "format"), "");
//! ```
//!
//! A plain option whose value contains a comma (`analyzer:foo,bar`) is
//! merged the same way; there is no escaping.

use std::collections::BTreeMap;

/// Explicit leaf type, e.g. `type:keyword`.
pub const OPTION_TYPE: &str = "type";
/// Explicit leaf format, e.g. `format:basic_date`.
pub const OPTION_FORMAT: &str = "format";
/// `key=value` pairs joined by `;`, e.g. `index_prefixes:min_chars=2;max_chars=10`.
pub const OPTION_INDEX_PREFIXES: &str = "index_prefixes";
pub const OPTION_ANALYZER: &str = "analyzer";
pub const OPTION_SEARCH_ANALYZER: &str = "search_analyzer";
/// Comma-separated destination fields, e.g. `copy_to:all_text,foo_text`.
pub const OPTION_COPY_TO: &str = "copy_to";

const OPTION_SEP: char = ',';
const KEY_VAL_SEP: char = ':';
const PAIR_SEP: char = ';';
const PAIR_KEY_VAL_SEP: char = '=';

/// Delimiter between items of list-valued options.
pub const LIST_SEP: char = ',';

/// Get the raw value of `option` from an annotation string.
///
/// Returns an empty string when the option is absent or has an empty value;
/// callers can't tell the two apart.
pub fn get_option(annotation: &str, option: &str) -> String {
    if option.is_empty() {
        return String::new();
    }

    let mut current_key: Option<&str> = None;
    let mut current_val = String::new();

    for segment in annotation.split(OPTION_SEP) {
        let segment = segment.trim();
        match segment.split_once(KEY_VAL_SEP) {
            Some((key, val)) => {
                // Start of a new option: the previous one is complete
                if current_key == Some(option) {
                    return current_val.trim().to_string();
                }
                let key = key.trim();
                current_key = (!key.is_empty()).then_some(key);
                current_val = val.trim().to_string();
            }
            None => {
                // Continuation of the previous option's value
                if current_key.is_some() {
                    if !current_val.is_empty() {
                        current_val.push(OPTION_SEP);
                    }
                    current_val.push_str(segment);
                }
            }
        }
    }

    if current_key == Some(option) {
        current_val.trim().to_string()
    } else {
        String::new()
    }
}

/// Parse a map-valued option like `min_chars=2;max_chars=10`.
///
/// Pairs without `=` are dropped. Values keep any further `=`.
pub fn parse_map_option(value: &str) -> BTreeMap<String, String> {
    value
        .split(PAIR_SEP)
        .filter_map(|pair| pair.split_once(PAIR_KEY_VAL_SEP))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

/// Parse a list-valued option, trimming items and dropping empty ones.
///
/// Returns `None` if nothing is left.
pub fn parse_list_option(value: &str, delimiter: char) -> Option<Vec<String>> {
    let items: Vec<String> = value
        .split(delimiter)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
