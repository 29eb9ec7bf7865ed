//! Structural queries over an outline tree.
//!
//! Positions are expressed as index paths from the root (`[]` is the root itself,
//! `[1, 0]` is the first child of the root's second child). A path is only valid for
//! the tree it was computed on: any structural mutation shifts indices, so callers
//! locate again instead of holding on to a [`NodeContext`].

use crate::models::Node;
use std::collections::HashSet;

/// Where a node currently lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeContext {
    pub path: Vec<usize>,
    pub parent_id: Option<String>,
}

impl NodeContext {
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Index within the sibling sequence. The root reports 0.
    pub fn index(&self) -> usize {
        self.path.last().copied().unwrap_or(0)
    }

    /// Root = 0.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn parent_path(&self) -> Option<&[usize]> {
        if self.is_root() {
            None
        } else {
            Some(&self.path[..self.path.len() - 1])
        }
    }

    pub fn node<'a>(&self, root: &'a Node) -> Option<&'a Node> {
        node_at(root, &self.path)
    }

    pub fn parent<'a>(&self, root: &'a Node) -> Option<&'a Node> {
        self.parent_path().and_then(|p| node_at(root, p))
    }

    /// The list this node is an element of. `None` for the root.
    pub fn siblings<'a>(&self, root: &'a Node) -> Option<&'a [Node]> {
        self.parent(root).map(|p| p.children.as_slice())
    }
}

/// Depth-first search for `id`, returning its current context.
pub fn locate(root: &Node, id: &str) -> Option<NodeContext> {
    fn walk(
        node: &Node,
        id: &str,
        path: &mut Vec<usize>,
        parent_id: Option<&str>,
    ) -> Option<NodeContext> {
        if node.id == id {
            return Some(NodeContext {
                path: path.clone(),
                parent_id: parent_id.map(str::to_string),
            });
        }
        for (i, child) in node.children.iter().enumerate() {
            path.push(i);
            if let Some(found) = walk(child, id, path, Some(node.id.as_str())) {
                return Some(found);
            }
            path.pop();
        }
        None
    }

    walk(root, id, &mut Vec::new(), None)
}

pub fn node_at<'a>(root: &'a Node, path: &[usize]) -> Option<&'a Node> {
    path.iter().try_fold(root, |node, &i| node.children.get(i))
}

pub fn node_at_mut<'a>(root: &'a mut Node, path: &[usize]) -> Option<&'a mut Node> {
    path.iter().try_fold(root, |node, &i| node.children.get_mut(i))
}

/// Mutable sibling sequence of the node at `path`. `None` for the root.
pub fn siblings_mut<'a>(root: &'a mut Node, path: &[usize]) -> Option<&'a mut Vec<Node>> {
    let (_, parent_path) = path.split_last()?;
    node_at_mut(root, parent_path).map(|p| &mut p.children)
}

/// Remove the node at `path` from its sibling sequence.
pub fn detach(root: &mut Node, path: &[usize]) -> Option<Node> {
    let (&index, _) = path.split_last()?;
    let siblings = siblings_mut(root, path)?;
    if index < siblings.len() {
        Some(siblings.remove(index))
    } else {
        None
    }
}

/// Follow the last child repeatedly; returns `node` itself when it is a leaf.
pub fn last_descendant(node: &Node) -> &Node {
    let mut current = node;
    while let Some(last) = current.children.last() {
        current = last;
    }
    current
}

/// Ids of every node strictly above `path`, nearest parent first.
pub fn ancestor_ids<'a>(root: &'a Node, path: &[usize]) -> Vec<&'a str> {
    (0..path.len())
        .rev()
        .filter_map(|len| node_at(root, &path[..len]))
        .map(|n| n.id.as_str())
        .collect()
}

/// True when `ancestor_id` sits on the chain from `id` up to the root.
pub fn is_ancestor(root: &Node, ancestor_id: &str, id: &str) -> bool {
    locate(root, id)
        .map(|ctx| ancestor_ids(root, &ctx.path).contains(&ancestor_id))
        .unwrap_or(false)
}

/// Every id in pre-order.
pub fn collect_ids(root: &Node) -> Vec<&str> {
    let mut out = vec![];
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        out.push(node.id.as_str());
        stack.extend(node.children.iter().rev());
    }
    out
}

/// First id that occurs more than once, if any.
pub fn find_duplicate_id(root: &Node) -> Option<&str> {
    let mut seen = HashSet::new();
    collect_ids(root).into_iter().find(|id| !seen.insert(*id))
}

/// Levels below `node`; 0 for a leaf.
pub fn height(node: &Node) -> usize {
    node.children
        .iter()
        .map(|child| 1 + height(child))
        .max()
        .unwrap_or(0)
}

pub fn count_nodes(root: &Node) -> usize {
    1 + root.children.iter().map(count_nodes).sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        // root -> A -> (A1 -> A1a, A2), B
        Node::root("r").with_children(vec![
            Node::new("A", "a").with_children(vec![
                Node::new("A1", "a1").with_children(vec![Node::new("A1a", "a1a")]),
                Node::new("A2", "a2"),
            ]),
            Node::new("B", "b"),
        ])
    }

    #[test]
    fn test_locate_root() {
        let tree = sample();
        let ctx = locate(&tree, "root").expect("root should be found");
        assert!(ctx.is_root());
        assert_eq!(ctx.parent_id, None);
        assert_eq!(ctx.depth(), 0);
        assert!(ctx.siblings(&tree).is_none());
    }

    #[test]
    fn test_locate_nested_context() {
        let tree = sample();
        let ctx = locate(&tree, "A2").expect("A2 should be found");
        assert_eq!(ctx.path, vec![0, 1]);
        assert_eq!(ctx.index(), 1);
        assert_eq!(ctx.depth(), 2);
        assert_eq!(ctx.parent_id.as_deref(), Some("A"));
        assert_eq!(ctx.parent(&tree).map(|n| n.id.as_str()), Some("A"));
        let sibs: Vec<&str> = ctx
            .siblings(&tree)
            .unwrap_or_default()
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(sibs, vec!["A1", "A2"]);
        assert_eq!(ctx.node(&tree).map(|n| n.text.as_str()), Some("a2"));
    }

    #[test]
    fn test_locate_missing() {
        assert!(locate(&sample(), "nope").is_none());
    }

    #[test]
    fn test_detach_removes_from_sibling_sequence() {
        let mut tree = sample();
        let ctx = locate(&tree, "A1").unwrap();
        let removed = detach(&mut tree, &ctx.path).expect("detach should succeed");
        assert_eq!(removed.id, "A1");
        assert_eq!(removed.children.len(), 1);
        assert_eq!(locate(&tree, "A2").unwrap().path, vec![0, 0]);
        assert!(locate(&tree, "A1a").is_none());
    }

    #[test]
    fn test_detach_root_is_refused() {
        let mut tree = sample();
        assert!(detach(&mut tree, &[]).is_none());
        assert_eq!(tree, sample());
    }

    #[test]
    fn test_last_descendant_walks_last_children() {
        let tree = sample();
        assert_eq!(last_descendant(&tree).id, "B");
        assert_eq!(last_descendant(&tree.children[0]).id, "A2");
        assert_eq!(last_descendant(&tree.children[0].children[0]).id, "A1a");
    }

    #[test]
    fn test_ancestor_ids_nearest_first() {
        let tree = sample();
        let ctx = locate(&tree, "A1a").unwrap();
        assert_eq!(ancestor_ids(&tree, &ctx.path), vec!["A1", "A", "root"]);
        assert!(is_ancestor(&tree, "A", "A1a"));
        assert!(!is_ancestor(&tree, "B", "A1a"));
        assert!(!is_ancestor(&tree, "A1a", "A1a"));
    }

    #[test]
    fn test_height_counts_levels_below() {
        let tree = sample();
        assert_eq!(height(&tree), 3);
        assert_eq!(height(&tree.children[1]), 0);
    }

    #[test]
    fn test_collect_ids_preorder_and_duplicates() {
        let tree = sample();
        assert_eq!(collect_ids(&tree), vec!["root", "A", "A1", "A1a", "A2", "B"]);
        assert_eq!(find_duplicate_id(&tree), None);
        assert_eq!(count_nodes(&tree), 6);

        let dup = Node::root("").with_children(vec![Node::new("x", ""), Node::new("x", "")]);
        assert_eq!(find_duplicate_id(&dup), Some("x"));
    }
}
