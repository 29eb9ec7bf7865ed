mod app;
pub mod columns;
mod components;
mod config;
mod editor;
mod i18n;
mod logging;
mod models;
mod state;
mod storage;
pub mod tree;
mod util;

pub use editor::{
    classify_drop, command_for_key, flatten, Command, Direction, DragSession, DropGeometry,
    DropTarget, DropZone, EditorSession, FlatEntry, KeyInput, Outcome, Rejection, Step,
    VisibleDepth,
};
pub use models::{Document, Node, MAX_TREE_DEPTH, ROOT_ID};
pub use storage::{deserialize, export_file_name, serialize, DocumentError};

use app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    mount_to_body(App);
}
