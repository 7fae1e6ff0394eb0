//! Bulk request bodies - newline-delimited action/document pairs.

use serde::Serialize;

use crate::error::EncodeError;

/// A document to index, with its destination index and `_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItem<T> {
    pub index: String,
    pub id: String,
    pub document: T,
}

impl<T> BulkItem<T> {
    pub fn new(index: impl Into<String>, id: impl Into<String>, document: T) -> Self {
        Self {
            index: index.into(),
            id: id.into(),
            document,
        }
    }
}

#[derive(Serialize)]
struct IndexAction<'a> {
    index: ActionMeta<'a>,
}

#[derive(Serialize)]
struct ActionMeta<'a> {
    #[serde(rename = "_index")]
    index: &'a str,
    #[serde(rename = "_id")]
    id: &'a str,
}

/// Build the body of a `POST _bulk` request that indexes every item.
///
/// Each item becomes an `{"index":{"_index":..,"_id":..}}` line followed by
/// the document in its own field order. Every line ends with `\n`.
///
/// # Errors
///
/// Returns `EncodeError::Encoding` for the first document that fails to
/// serialize; nothing is returned for the others.
pub fn build_bulk_body<T: Serialize>(items: &[BulkItem<T>]) -> Result<String, EncodeError> {
    let mut body = String::new();

    for item in items {
        let action = IndexAction {
            index: ActionMeta {
                index: &item.index,
                id: &item.id,
            },
        };
        let action = serde_json::to_string(&action).map_err(|source| EncodeError::Encoding {
            step: "encode bulk action",
            source,
        })?;
        let document =
            serde_json::to_string(&item.document).map_err(|source| EncodeError::Encoding {
                step: "encode bulk document",
                source,
            })?;

        body.push_str(&action);
        body.push('\n');
        body.push_str(&document);
        body.push('\n');
    }

    Ok(body)
}
