//! Drop placement for drag-and-drop re-parenting.
//!
//! The zone is a pure function of the target's shape and the pointer offset, so it can
//! be tested without a rendering surface.

/// Fraction of the target width after which the pointer selects the child zone.
pub const CHILD_ZONE_START: f64 = 0.75;

/// Where a dragged node lands relative to the target.
///
/// The string form is the highlight class the view puts on the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
pub enum DropZone {
    #[strum(serialize = "drag-over")]
    Before,
    #[strum(serialize = "drag-over-bottom")]
    After,
    #[strum(serialize = "drag-over-right")]
    Child,
}

impl DropZone {
    pub fn highlight_class(self) -> &'static str {
        self.into()
    }
}

/// What the classifier needs to know about the node under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropTarget {
    pub has_children: bool,
    pub is_root: bool,
}

/// Target box size and pointer offset from its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropGeometry {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl DropGeometry {
    /// From a bounding rect (`left`, `top`, `width`, `height`) and client pointer coordinates.
    pub fn from_rect(
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        client_x: f64,
        client_y: f64,
    ) -> Self {
        Self {
            width,
            height,
            offset_x: client_x - left,
            offset_y: client_y - top,
        }
    }
}

pub fn classify_drop(target: DropTarget, geometry: DropGeometry) -> DropZone {
    let in_child_zone = geometry.offset_x > geometry.width * CHILD_ZONE_START;
    if !target.has_children && !target.is_root && in_child_zone {
        DropZone::Child
    } else if geometry.offset_y < geometry.height / 2.0 {
        DropZone::Before
    } else {
        DropZone::After
    }
}

/// An in-progress drag: the source node and the target currently highlighted.
///
/// Hover updates are visual only; the tree changes once, on drop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession {
    source_id: String,
    hover: Option<(String, DropZone)>,
}

impl DragSession {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            hover: None,
        }
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn hover(&mut self, target_id: &str, zone: DropZone) {
        self.hover = Some((target_id.to_string(), zone));
    }

    /// Pointer left `target_id`; clears the highlight if it was on that target.
    pub fn leave(&mut self, target_id: &str) {
        if self.hover.as_ref().is_some_and(|(id, _)| id == target_id) {
            self.hover = None;
        }
    }

    pub fn highlight_for(&self, target_id: &str) -> Option<DropZone> {
        match &self.hover {
            Some((id, zone)) if id == target_id => Some(*zone),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAF: DropTarget = DropTarget {
        has_children: false,
        is_root: false,
    };

    fn at(x: f64, y: f64) -> DropGeometry {
        DropGeometry::from_rect(100.0, 50.0, 200.0, 40.0, 100.0 + x, 50.0 + y)
    }

    #[test]
    fn test_right_quarter_of_leaf_is_child_zone() {
        assert_eq!(classify_drop(LEAF, at(160.0, 5.0)), DropZone::Child);
        assert_eq!(classify_drop(LEAF, at(199.0, 35.0)), DropZone::Child);
        // Exactly at 75% is not yet inside.
        assert_eq!(classify_drop(LEAF, at(150.0, 5.0)), DropZone::Before);
    }

    #[test]
    fn test_vertical_half_selects_before_after() {
        assert_eq!(classify_drop(LEAF, at(10.0, 19.9)), DropZone::Before);
        assert_eq!(classify_drop(LEAF, at(10.0, 20.0)), DropZone::After);
    }

    #[test]
    fn test_no_child_zone_for_parents_or_root() {
        let parent = DropTarget {
            has_children: true,
            is_root: false,
        };
        let root = DropTarget {
            has_children: false,
            is_root: true,
        };
        assert_eq!(classify_drop(parent, at(190.0, 30.0)), DropZone::After);
        assert_eq!(classify_drop(root, at(190.0, 5.0)), DropZone::Before);
    }

    #[test]
    fn test_highlight_classes() {
        assert_eq!(DropZone::Before.highlight_class(), "drag-over");
        assert_eq!(DropZone::After.highlight_class(), "drag-over-bottom");
        assert_eq!(DropZone::Child.highlight_class(), "drag-over-right");
    }

    #[test]
    fn test_drag_session_hover_and_leave() {
        let mut d = DragSession::new("A");
        assert_eq!(d.source_id(), "A");
        d.hover("B", DropZone::After);
        assert_eq!(d.highlight_for("B"), Some(DropZone::After));
        assert_eq!(d.highlight_for("C"), None);

        d.leave("C");
        assert_eq!(d.highlight_for("B"), Some(DropZone::After));
        d.leave("B");
        assert_eq!(d.highlight_for("B"), None);
    }
}
