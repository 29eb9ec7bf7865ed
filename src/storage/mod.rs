//! Document encoding plus the browser-side persistence around it.

mod local;

pub(crate) use local::{download_text, load_document, save_document};

use crate::models::{Document, MAX_TREE_DEPTH};
use crate::tree;
use serde::Deserialize;
use thiserror::Error;

pub(crate) const DEFAULT_STORAGE_KEY: &str = "horiztree_data";
const EXPORT_PREFIX: &str = "horiztree_";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid document format: {0}")]
    InvalidFormat(String),

    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
}

pub fn serialize(doc: &Document) -> Result<String, DocumentError> {
    serde_json::to_string(doc).map_err(DocumentError::Encode)
}

/// Deepest `{`/`[` nesting outside string literals.
fn nesting_depth(payload: &str) -> usize {
    let (mut depth, mut max) = (0usize, 0usize);
    let (mut in_string, mut escaped) = (false, false);
    for b in payload.bytes() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

/// Parse and validate a document. Callers keep their current state on `Err`.
pub fn deserialize(payload: &str) -> Result<Document, DocumentError> {
    // Each tree level is a node object plus its `children` array, under the document object.
    let max_nesting = 2 * MAX_TREE_DEPTH + 3;
    if nesting_depth(payload) > max_nesting {
        return Err(DocumentError::InvalidFormat(format!(
            "tree is nested deeper than {MAX_TREE_DEPTH} levels"
        )));
    }

    // serde_json stops at 128 levels by default; the bound above keeps the stack in check.
    let mut de = serde_json::Deserializer::from_str(payload);
    de.disable_recursion_limit();
    let doc = Document::deserialize(&mut de)
        .and_then(|doc| de.end().map(|()| doc))
        .map_err(|e| DocumentError::InvalidFormat(e.to_string()))?;

    if let Some(dup) = tree::find_duplicate_id(&doc.tree) {
        return Err(DocumentError::InvalidFormat(format!(
            "duplicate node id `{dup}`"
        )));
    }

    Ok(doc)
}

/// Suggested export name: the root text when set, otherwise a dated default.
pub fn export_file_name(root_text: &str, yyyymmdd: &str) -> String {
    if root_text.is_empty() {
        format!("{EXPORT_PREFIX}{yyyymmdd}.json")
    } else {
        format!("{root_text}.json")
    }
}
