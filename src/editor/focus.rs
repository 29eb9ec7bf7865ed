//! Keyboard focus traversal.
//!
//! Same-depth navigation walks the flattening the view renders, so children hidden by
//! the visible-depth bound are skipped rather than focused off-screen.

use super::{report, EditorSession, Outcome, Rejection};
use crate::models::{Node, MAX_TREE_DEPTH};
use crate::tree::{self, locate};

/// How many levels below the root are expanded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisibleDepth {
    #[default]
    All,
    Levels(usize),
}

impl VisibleDepth {
    /// Slider position that stands for "all levels".
    pub const SLIDER_ALL: u32 = 6;

    pub fn from_slider(value: u32) -> Self {
        if value >= Self::SLIDER_ALL {
            VisibleDepth::All
        } else {
            VisibleDepth::Levels(value as usize)
        }
    }

    pub fn slider_value(self) -> u32 {
        match self {
            VisibleDepth::All => Self::SLIDER_ALL,
            VisibleDepth::Levels(n) => (n as u32).min(Self::SLIDER_ALL),
        }
    }

    /// Whether a node at `depth` shows its children.
    pub fn expands(self, depth: usize) -> bool {
        match self {
            VisibleDepth::All => true,
            VisibleDepth::Levels(n) => depth < n,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FlatEntry<'a> {
    pub node: &'a Node,
    pub depth: usize,
}

/// Pre-order walk from the root, descending only below depths `max_depth` expands.
pub fn flatten(root: &Node, max_depth: VisibleDepth) -> Vec<FlatEntry<'_>> {
    fn walk<'a>(
        node: &'a Node,
        depth: usize,
        max_depth: VisibleDepth,
        out: &mut Vec<FlatEntry<'a>>,
    ) {
        out.push(FlatEntry { node, depth });
        if max_depth.expands(depth) {
            for child in &node.children {
                walk(child, depth + 1, max_depth, out);
            }
        }
    }

    let mut out = vec![];
    walk(root, 0, max_depth, &mut out);
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Backward,
    Forward,
}

impl EditorSession {
    /// Focus the nearest visible node at the same depth. No wraparound.
    pub fn move_focus(&mut self, id: &str, step: Step) -> Outcome {
        let outcome = match self.same_depth_neighbour(id, step) {
            Ok(target) => {
                self.focus = Some(target);
                Outcome::Applied
            }
            Err(reason) => Outcome::Rejected(reason),
        };
        report("move_focus", id, outcome)
    }

    fn same_depth_neighbour(&self, id: &str, step: Step) -> Result<String, Rejection> {
        let flat = flatten(&self.tree, self.visible_depth);
        let current = flat
            .iter()
            .position(|e| e.node.id == id)
            .ok_or(Rejection::NotFound)?;
        let depth = flat[current].depth;

        let found = match step {
            Step::Forward => flat[current + 1..].iter().find(|e| e.depth == depth),
            Step::Backward => flat[..current].iter().rev().find(|e| e.depth == depth),
        };
        found
            .map(|e| e.node.id.clone())
            .ok_or(Rejection::NoTarget)
    }

    pub fn move_to_parent(&mut self, id: &str) -> Outcome {
        let outcome = match locate(&self.tree, id) {
            None => Outcome::Rejected(Rejection::NotFound),
            Some(ctx) => match ctx.parent_id {
                None => Outcome::Rejected(Rejection::RootNode),
                Some(parent) => {
                    self.focus = Some(parent);
                    Outcome::Applied
                }
            },
        };
        report("move_to_parent", id, outcome)
    }

    /// Focus the first child, creating an empty one when there is none.
    pub fn move_to_child_or_create(&mut self, id: &str) -> Outcome {
        let outcome = match self.first_child_or_create(id) {
            Ok(target) => {
                self.focus = Some(target);
                Outcome::Applied
            }
            Err(reason) => Outcome::Rejected(reason),
        };
        report("move_to_child_or_create", id, outcome)
    }

    fn first_child_or_create(&mut self, id: &str) -> Result<String, Rejection> {
        let ctx = locate(&self.tree, id).ok_or(Rejection::NotFound)?;
        let node = tree::node_at_mut(&mut self.tree, &ctx.path).ok_or(Rejection::NotFound)?;
        if let Some(first) = node.children.first() {
            return Ok(first.id.clone());
        }
        if ctx.depth() + 1 > MAX_TREE_DEPTH {
            return Err(Rejection::TooDeep);
        }
        let child = Node::blank();
        let child_id = child.id.clone();
        node.children.push(child);
        Ok(child_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::tests::{child_ids, session};
    use crate::models::ROOT_ID;

    fn ids<'a>(flat: &[FlatEntry<'a>]) -> Vec<(&'a str, usize)> {
        flat.iter().map(|e| (e.node.id.as_str(), e.depth)).collect()
    }

    fn chain() -> Node {
        Node::root("").with_children(vec![Node::new("A", "").with_children(vec![
            Node::new("A1", "").with_children(vec![Node::new("A1a", "")]),
        ])])
    }

    #[test]
    fn test_flatten_depth_bound_one() {
        let tree = chain();
        let flat = flatten(&tree, VisibleDepth::Levels(1));
        assert_eq!(ids(&flat), vec![("root", 0), ("A", 1)]);
    }

    #[test]
    fn test_flatten_unbounded_is_preorder() {
        let s = session();
        let flat = flatten(s.tree(), VisibleDepth::All);
        assert_eq!(
            ids(&flat),
            vec![("root", 0), ("A", 1), ("A1", 2), ("A2", 2), ("B", 1)]
        );
    }

    #[test]
    fn test_slider_mapping() {
        assert_eq!(VisibleDepth::from_slider(6), VisibleDepth::All);
        assert_eq!(VisibleDepth::from_slider(2), VisibleDepth::Levels(2));
        assert_eq!(VisibleDepth::Levels(3).slider_value(), 3);
        assert_eq!(VisibleDepth::All.slider_value(), 6);
        assert!(VisibleDepth::Levels(2).expands(1));
        assert!(!VisibleDepth::Levels(2).expands(2));
    }

    #[test]
    fn test_move_focus_crosses_parents_at_same_depth() {
        // root -> A -> (A1, A2), B -> (B1)
        let mut s = session();
        assert!(s.move_to_child_or_create("B").is_applied());
        let b1 = s.focus().map(str::to_string).expect("child created");

        assert!(s.move_focus("A2", Step::Forward).is_applied());
        assert_eq!(s.focus(), Some(b1.as_str()));

        assert!(s.move_focus(&b1, Step::Backward).is_applied());
        assert_eq!(s.focus(), Some("A2"));

        assert!(s.move_focus("A", Step::Forward).is_applied());
        assert_eq!(s.focus(), Some("B"));
    }

    #[test]
    fn test_move_focus_no_wraparound() {
        let mut s = session();
        s.set_focus(Some("B".into()));
        assert_eq!(s.move_focus("B", Step::Forward), Outcome::Rejected(Rejection::NoTarget));
        assert_eq!(s.move_focus("A", Step::Backward), Outcome::Rejected(Rejection::NoTarget));
        assert_eq!(s.move_focus(ROOT_ID, Step::Forward), Outcome::Rejected(Rejection::NoTarget));
        assert_eq!(s.focus(), Some("B"));
    }

    #[test]
    fn test_move_focus_skips_collapsed_branches() {
        let mut s = session();
        s.set_visible_depth(VisibleDepth::Levels(1));
        // A1 is hidden at this depth.
        assert_eq!(s.move_focus("A1", Step::Forward), Outcome::Rejected(Rejection::NotFound));
        assert!(s.move_focus("A", Step::Forward).is_applied());
        assert_eq!(s.focus(), Some("B"));
    }

    #[test]
    fn test_move_to_parent() {
        let mut s = session();
        assert!(s.move_to_parent("A1").is_applied());
        assert_eq!(s.focus(), Some("A"));
        assert!(s.move_to_parent("A").is_applied());
        assert_eq!(s.focus(), Some(ROOT_ID));
        assert_eq!(s.move_to_parent(ROOT_ID), Outcome::Rejected(Rejection::RootNode));
        assert_eq!(s.move_to_parent("ghost"), Outcome::Rejected(Rejection::NotFound));
    }

    #[test]
    fn test_move_to_child_focuses_existing_first_child() {
        let mut s = session();
        let before = s.tree().clone();
        assert!(s.move_to_child_or_create("A").is_applied());
        assert_eq!(s.focus(), Some("A1"));
        assert_eq!(s.tree(), &before);
    }

    #[test]
    fn test_move_to_child_creates_empty_child() {
        let mut s = session();
        assert!(s.move_to_child_or_create("A2").is_applied());
        let a2 = &s.tree().children[0].children[1];
        assert_eq!(a2.children.len(), 1);
        assert_eq!(a2.children[0].text, "");
        assert_eq!(s.focus(), Some(child_ids(a2)[0]));
    }
}
