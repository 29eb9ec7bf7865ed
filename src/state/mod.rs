use crate::columns::{self, ResizeSession};
use crate::config::EditorConfig;
use crate::editor::{Command, DragSession, DropZone, EditorSession, Outcome, VisibleDepth};
use crate::i18n::{self, Lang, Msg};
use crate::storage::{self, DocumentError};
use crate::util;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub config: StoredValue<EditorConfig>,

    /// The document plus focus, visible depth and column widths.
    pub session: RwSignal<EditorSession>,

    /// In-flight drag, if any. Kept apart from `session` so hovering does not re-render the tree.
    pub drag: RwSignal<Option<DragSession>>,
    pub resize: RwSignal<Option<ResizeSession>>,

    pub confirm_reset_open: RwSignal<bool>,
    pub help_open: RwSignal<bool>,
}

impl AppState {
    pub fn new(config: EditorConfig) -> Self {
        let default_text = i18n::t(config.lang, Msg::DefaultNodeText);
        let session = match storage::load_document(&config.storage_key) {
            Some(doc) => EditorSession::from_document(doc),
            None => EditorSession::new(default_text),
        };
        tracing::info!(
            nodes = crate::tree::count_nodes(session.tree()),
            key = config.storage_key.as_str(),
            "document loaded"
        );

        Self {
            config: StoredValue::new(config),
            session: RwSignal::new(session),
            drag: RwSignal::new(None),
            resize: RwSignal::new(None),
            confirm_reset_open: RwSignal::new(false),
            help_open: RwSignal::new(false),
        }
    }

    pub fn lang(&self) -> Lang {
        self.config.with_value(|c| c.lang)
    }

    pub fn t(&self, msg: Msg) -> &'static str {
        i18n::t(self.lang(), msg)
    }

    pub fn persist(&self) {
        let key = self.config.with_value(|c| c.storage_key.clone());
        let doc = self.session.with_untracked(EditorSession::document);
        storage::save_document(&key, &doc);
    }

    /// Keyboard command on `id`. Re-renders and persists only when it applied.
    pub fn apply(&self, id: &str, command: Command, current_text: &str) -> Outcome {
        let mut outcome = Outcome::Applied;
        self.session.update_untracked(|s| {
            // The input may be ahead of the stored text.
            let _ = s.set_text(id, current_text);
            outcome = s.apply(id, command, current_text);
        });
        if outcome.is_applied() {
            self.session.notify();
            self.persist();
        }
        outcome
    }

    /// Text edits do not re-render; the input already shows them.
    pub fn set_text(&self, id: &str, text: &str) {
        self.session.update_untracked(|s| {
            let _ = s.set_text(id, text);
        });
    }

    pub fn set_focus(&self, id: Option<String>) {
        self.session.update_untracked(|s| s.set_focus(id));
    }

    pub fn move_by_drag(&self, source_id: &str, target_id: &str, zone: DropZone) -> Outcome {
        let mut outcome = Outcome::Applied;
        self.session
            .update_untracked(|s| outcome = s.move_by_drag(source_id, target_id, zone));
        if outcome.is_applied() {
            self.session.notify();
            self.persist();
        }
        outcome
    }

    pub fn set_visible_depth(&self, depth: VisibleDepth) {
        self.session.update(|s| s.set_visible_depth(depth));
    }

    /// Commit the width reached at the end of a resize drag.
    pub fn commit_column_width(&self, depth: usize, width_px: f64) {
        let mut changed = false;
        self.session
            .update_untracked(|s| changed = s.set_column_width(depth, columns::px(width_px)));
        if changed {
            self.persist();
        }
    }

    pub fn reset(&self) {
        let text = self.t(Msg::DefaultNodeText);
        self.session.update(|s| s.reset(text));
        self.persist();
        tracing::info!("document reset");
    }

    /// Replace the document with an imported payload; on error nothing changes.
    pub fn import_json(&self, payload: &str) -> Result<(), DocumentError> {
        let mut result = Ok(());
        self.session.update_untracked(|s| result = s.import_json(payload));
        result?;
        self.session.notify();
        self.persist();
        tracing::info!("document imported");
        Ok(())
    }

    pub fn export(&self) {
        let doc = self.session.with_untracked(EditorSession::document);
        let payload = match storage::serialize(&doc) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                return;
            }
        };
        let name = storage::export_file_name(&doc.tree.text, &util::today_yyyymmdd_local());
        storage::download_text(&name, &payload);
        tracing::info!(file = name.as_str(), "document exported");
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
