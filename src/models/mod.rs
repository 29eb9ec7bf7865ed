use serde::{Deserialize, Serialize};

/// Identifier the initial root node is created with.
///
/// The engine recognises the root structurally (it is the top of the tree), so an
/// imported document whose root carries another id still behaves correctly.
pub const ROOT_ID: &str = "root";

/// Deepest depth (root = 0) a tree may reach. The editor refuses edits that would go
/// further and documents nested deeper are rejected on read.
pub const MAX_TREE_DEPTH: usize = 256;

/// A single outline entry.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub id: String,

    #[serde(default)]
    pub text: String,

    /// Display order of the next column.
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            children: vec![],
        }
    }

    /// Fresh empty node with a generated id, as produced by every insertion.
    pub fn blank() -> Self {
        Self::new(crate::util::generate_node_id(), "")
    }

    pub fn root(text: impl Into<String>) -> Self {
        Self::new(ROOT_ID, text)
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Persisted unit: the tree plus column widths indexed by depth.
///
/// Width holes are `null` on the wire (the browser app wrote a sparse array).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub tree: Node,

    #[serde(rename = "colWidths", alias = "columnWidths", default)]
    pub col_widths: Vec<Option<String>>,
}
