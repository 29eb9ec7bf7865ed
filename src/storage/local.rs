use super::{deserialize, serialize};
use crate::models::Document;
use wasm_bindgen::JsCast;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn save_document(key: &str, doc: &Document) {
    let json = match serialize(doc) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(error = %e, "document not persisted");
            return;
        }
    };
    let Some(storage) = local_storage() else {
        tracing::warn!("localStorage unavailable; document not persisted");
        return;
    };
    match storage.set_item(key, &json) {
        Ok(()) => tracing::debug!(key = key, bytes = json.len(), "document persisted"),
        Err(_) => tracing::warn!(key = key, "localStorage rejected the document"),
    }
}

/// The persisted document, if there is a valid one.
pub(crate) fn load_document(key: &str) -> Option<Document> {
    let json = local_storage()?.get_item(key).ok().flatten()?;
    match deserialize(&json) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::warn!(key = key, error = %e, "ignoring stored document");
            None
        }
    }
}

/// Offer `payload` as a file download through a temporary `data:` link.
pub(crate) fn download_text(file_name: &str, payload: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let Ok(anchor) = document.create_element("a") else {
        return;
    };

    let href = format!(
        "data:text/json;charset=utf-8,{}",
        urlencoding::encode(payload)
    );
    let _ = anchor.set_attribute("href", &href);
    let _ = anchor.set_attribute("download", file_name);

    // Firefox only follows links that are in the document.
    if body.append_child(&anchor).is_err() {
        return;
    }
    if let Ok(el) = anchor.clone().dyn_into::<web_sys::HtmlElement>() {
        el.click();
    }
    anchor.remove();
}

// WASM-only tests (`cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::models::Node;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const KEY: &str = "horiztree_test_data";

    #[wasm_bindgen_test]
    fn test_document_storage_roundtrip() {
        let doc = Document {
            tree: Node::root("t").with_children(vec![Node::new("n_1", "ä")]),
            col_widths: vec![None, Some("220px".into())],
        };
        save_document(KEY, &doc);
        assert_eq!(load_document(KEY), Some(doc));
    }

    #[wasm_bindgen_test]
    fn test_invalid_stored_document_is_ignored() {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(KEY, "{broken");
        }
        assert_eq!(load_document(KEY), None);
    }
}
