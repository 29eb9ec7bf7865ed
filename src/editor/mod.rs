mod drag;
mod focus;
mod keymap;
mod view;

pub use drag::{classify_drop, DragSession, DropGeometry, DropTarget, DropZone};
pub use focus::{flatten, FlatEntry, Step, VisibleDepth};
pub use keymap::{command_for_key, Command, Direction, KeyInput};
pub(crate) use view::{focus_node_input, OutlineNode};

use crate::columns::ColumnWidths;
use crate::models::{Document, Node, MAX_TREE_DEPTH};
use crate::storage::{self, DocumentError};
use crate::tree::{self, locate};

/// Why a structural command did not apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("node not found")]
    NotFound,
    #[error("the root node cannot be moved or removed")]
    RootNode,
    #[error("first sibling has no previous sibling to indent under")]
    FirstSibling,
    #[error("direct children of the root cannot be outdented")]
    TopLevel,
    #[error("node text is not empty")]
    NotEmpty,
    #[error("node still has children")]
    HasChildren,
    #[error("source and target are the same node")]
    SameNode,
    #[error("a node cannot be dropped into its own subtree")]
    IntoOwnSubtree,
    #[error("no node in that direction")]
    NoTarget,
    #[error("tree depth limit reached")]
    TooDeep,
}

/// Result of every engine call. Rejections leave the session untouched.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

pub(crate) fn report(op: &'static str, id: &str, outcome: Outcome) -> Outcome {
    match outcome {
        Outcome::Applied => tracing::debug!(op = op, node = id, "applied"),
        Outcome::Rejected(reason) => tracing::debug!(op = op, node = id, %reason, "rejected"),
    }
    outcome
}

/// One editing session: the tree plus focus, visible depth and column widths.
///
/// All engine operations take `&mut self`; nothing is shared behind the session's back.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorSession {
    tree: Node,
    focus: Option<String>,
    visible_depth: VisibleDepth,
    col_widths: ColumnWidths,
}

impl EditorSession {
    pub fn new(root_text: impl Into<String>) -> Self {
        Self::with_tree(Node::root(root_text))
    }

    pub fn with_tree(tree: Node) -> Self {
        Self {
            tree,
            focus: None,
            visible_depth: VisibleDepth::All,
            col_widths: ColumnWidths::default(),
        }
    }

    pub fn from_document(doc: Document) -> Self {
        let mut session = Self::with_tree(doc.tree);
        session.col_widths = ColumnWidths::from_sparse(doc.col_widths);
        session
    }

    pub fn tree(&self) -> &Node {
        &self.tree
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    /// Record the node the user put the caret into.
    pub fn set_focus(&mut self, id: Option<String>) {
        self.focus = id;
    }

    pub fn visible_depth(&self) -> VisibleDepth {
        self.visible_depth
    }

    pub fn set_visible_depth(&mut self, depth: VisibleDepth) {
        self.visible_depth = depth;
    }

    pub fn column_widths(&self) -> &ColumnWidths {
        &self.col_widths
    }

    pub fn set_column_width(&mut self, depth: usize, width: impl Into<String>) -> bool {
        self.col_widths.set(depth, width)
    }

    /// Snapshot for persistence and export.
    pub fn document(&self) -> Document {
        Document {
            tree: self.tree.clone(),
            col_widths: self.col_widths.to_sparse(),
        }
    }

    /// Import: the tree is replaced wholesale, widths present in `doc` override ours.
    pub fn replace_document(&mut self, doc: Document) {
        self.tree = doc.tree;
        self.col_widths.overlay(&doc.col_widths);
        self.focus = None;
    }

    /// Parse `payload` and replace the document with it. On error the session is unchanged.
    pub fn import_json(&mut self, payload: &str) -> Result<(), DocumentError> {
        let doc = storage::deserialize(payload)?;
        self.replace_document(doc);
        Ok(())
    }

    /// Start over from a single root. Column widths are kept.
    pub fn reset(&mut self, root_text: impl Into<String>) {
        self.tree = Node::root(root_text);
        self.focus = None;
    }

    /// Sync live text from the view. Does not move focus.
    pub fn set_text(&mut self, id: &str, text: &str) -> Outcome {
        let Some(ctx) = locate(&self.tree, id) else {
            return Outcome::Rejected(Rejection::NotFound);
        };
        match tree::node_at_mut(&mut self.tree, &ctx.path) {
            Some(node) => {
                node.text = text.to_string();
                Outcome::Applied
            }
            None => Outcome::Rejected(Rejection::NotFound),
        }
    }

    /// New empty node right after `id`; for the root, as its first child.
    pub fn insert_below(&mut self, id: &str) -> Outcome {
        report("insert_below", id, self.insert_below_inner(id))
    }

    fn insert_below_inner(&mut self, id: &str) -> Outcome {
        let Some(ctx) = locate(&self.tree, id) else {
            return Outcome::Rejected(Rejection::NotFound);
        };

        let node = Node::blank();
        let new_id = node.id.clone();
        if ctx.is_root() {
            self.tree.children.insert(0, node);
        } else {
            let Some(siblings) = tree::siblings_mut(&mut self.tree, &ctx.path) else {
                return Outcome::Rejected(Rejection::NotFound);
            };
            siblings.insert(ctx.index() + 1, node);
        }

        self.focus = Some(new_id);
        Outcome::Applied
    }

    /// Make `id` the last child of its previous sibling.
    pub fn indent(&mut self, id: &str) -> Outcome {
        report("indent", id, self.indent_inner(id))
    }

    fn indent_inner(&mut self, id: &str) -> Outcome {
        let Some(ctx) = locate(&self.tree, id) else {
            return Outcome::Rejected(Rejection::NotFound);
        };
        if ctx.is_root() {
            return Outcome::Rejected(Rejection::RootNode);
        }
        if ctx.index() == 0 {
            return Outcome::Rejected(Rejection::FirstSibling);
        }
        let below = ctx.node(&self.tree).map_or(0, tree::height);
        if ctx.depth() + 1 + below > MAX_TREE_DEPTH {
            return Outcome::Rejected(Rejection::TooDeep);
        }

        // Removing index i leaves i - 1 in place.
        let mut prev_path = ctx.path.clone();
        if let Some(last) = prev_path.last_mut() {
            *last -= 1;
        }

        let Some(node) = tree::detach(&mut self.tree, &ctx.path) else {
            return Outcome::Rejected(Rejection::NotFound);
        };
        let Some(prev) = tree::node_at_mut(&mut self.tree, &prev_path) else {
            return Outcome::Rejected(Rejection::NotFound);
        };
        prev.children.push(node);

        self.focus = Some(id.to_string());
        Outcome::Applied
    }

    /// Move `id` out of its parent, right after the parent.
    pub fn outdent(&mut self, id: &str) -> Outcome {
        report("outdent", id, self.outdent_inner(id))
    }

    fn outdent_inner(&mut self, id: &str) -> Outcome {
        let Some(ctx) = locate(&self.tree, id) else {
            return Outcome::Rejected(Rejection::NotFound);
        };
        let Some(parent_path) = ctx.parent_path().map(<[usize]>::to_vec) else {
            return Outcome::Rejected(Rejection::RootNode);
        };
        let Some(&parent_index) = parent_path.last() else {
            // Parent is the root.
            return Outcome::Rejected(Rejection::TopLevel);
        };

        let Some(node) = tree::detach(&mut self.tree, &ctx.path) else {
            return Outcome::Rejected(Rejection::NotFound);
        };
        let Some(parent_siblings) = tree::siblings_mut(&mut self.tree, &parent_path) else {
            return Outcome::Rejected(Rejection::NotFound);
        };
        parent_siblings.insert(parent_index + 1, node);

        self.focus = Some(id.to_string());
        Outcome::Applied
    }

    /// Remove an empty leaf. `current_text` is the live text from the input, which may
    /// be ahead of the stored text.
    pub fn delete_if_empty(&mut self, id: &str, current_text: &str) -> Outcome {
        report("delete_if_empty", id, self.delete_if_empty_inner(id, current_text))
    }

    fn delete_if_empty_inner(&mut self, id: &str, current_text: &str) -> Outcome {
        if !current_text.is_empty() {
            return Outcome::Rejected(Rejection::NotEmpty);
        }
        let Some(ctx) = locate(&self.tree, id) else {
            return Outcome::Rejected(Rejection::NotFound);
        };
        if ctx.is_root() {
            return Outcome::Rejected(Rejection::RootNode);
        }
        if ctx.node(&self.tree).is_some_and(Node::has_children) {
            return Outcome::Rejected(Rejection::HasChildren);
        }

        let next_focus = match ctx.siblings(&self.tree) {
            Some(siblings) if ctx.index() > 0 => {
                Some(tree::last_descendant(&siblings[ctx.index() - 1]).id.clone())
            }
            _ => ctx.parent_id.clone(),
        };

        if tree::detach(&mut self.tree, &ctx.path).is_none() {
            return Outcome::Rejected(Rejection::NotFound);
        }
        self.focus = next_focus;
        Outcome::Applied
    }

    /// Re-parent `source_id` relative to `target_id` as decided by the drop zone.
    pub fn move_by_drag(&mut self, source_id: &str, target_id: &str, zone: DropZone) -> Outcome {
        let outcome = self.move_by_drag_inner(source_id, target_id, zone);
        report("move_by_drag", source_id, outcome)
    }

    fn move_by_drag_inner(
        &mut self,
        source_id: &str,
        target_id: &str,
        zone: DropZone,
    ) -> Outcome {
        if source_id == target_id {
            return Outcome::Rejected(Rejection::SameNode);
        }
        let Some(source) = locate(&self.tree, source_id) else {
            return Outcome::Rejected(Rejection::NotFound);
        };
        if source.is_root() {
            return Outcome::Rejected(Rejection::RootNode);
        }
        let Some(target) = locate(&self.tree, target_id) else {
            return Outcome::Rejected(Rejection::NotFound);
        };
        if tree::ancestor_ids(&self.tree, &target.path).contains(&source_id) {
            return Outcome::Rejected(Rejection::IntoOwnSubtree);
        }
        let new_depth = if target.is_root() || zone == DropZone::Child {
            target.depth() + 1
        } else {
            target.depth()
        };
        let below = source.node(&self.tree).map_or(0, tree::height);
        if new_depth + below > MAX_TREE_DEPTH {
            return Outcome::Rejected(Rejection::TooDeep);
        }

        let Some(node) = tree::detach(&mut self.tree, &source.path) else {
            return Outcome::Rejected(Rejection::NotFound);
        };

        // Detaching may have shifted the target's index.
        let placed = match locate(&self.tree, target_id) {
            Some(target) => self.place(&target.path, node, zone),
            None => Err(node),
        };
        if let Err(node) = placed {
            // Unreachable for a consistent tree; put the node back where it was.
            if let Some(siblings) = tree::siblings_mut(&mut self.tree, &source.path) {
                let index = source.index().min(siblings.len());
                siblings.insert(index, node);
            }
            return Outcome::Rejected(Rejection::NotFound);
        }

        self.focus = Some(source_id.to_string());
        Outcome::Applied
    }

    fn place(&mut self, target_path: &[usize], node: Node, zone: DropZone) -> Result<(), Node> {
        if target_path.is_empty() || zone == DropZone::Child {
            let Some(target) = tree::node_at_mut(&mut self.tree, target_path) else {
                return Err(node);
            };
            match zone {
                DropZone::Before => target.children.insert(0, node),
                DropZone::After | DropZone::Child => target.children.push(node),
            }
            return Ok(());
        }

        let index = target_path[target_path.len() - 1];
        let Some(siblings) = tree::siblings_mut(&mut self.tree, target_path) else {
            return Err(node);
        };
        match zone {
            DropZone::Before => siblings.insert(index, node),
            _ => siblings.insert(index + 1, node),
        }
        Ok(())
    }

    /// Run a keyboard command against `id`.
    pub fn apply(&mut self, id: &str, command: Command, current_text: &str) -> Outcome {
        match command {
            Command::InsertBelow => self.insert_below(id),
            Command::Indent => self.indent(id),
            Command::Outdent => self.outdent(id),
            Command::DeleteIfEmpty => self.delete_if_empty(id, current_text),
            Command::Focus(Direction::Up) => self.move_focus(id, Step::Backward),
            Command::Focus(Direction::Down) => self.move_focus(id, Step::Forward),
            Command::Focus(Direction::Left) => self.move_to_parent(id),
            Command::Focus(Direction::Right) => self.move_to_child_or_create(id),
        }
    }
}
