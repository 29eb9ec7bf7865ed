//! Per-depth column widths and the pointer session that resizes them.

pub(crate) const DEFAULT_COLUMN_WIDTH: &str = "280px";
pub(crate) const MIN_COLUMN_WIDTH_PX: f64 = 100.0;
/// Depths beyond this are never persisted.
pub(crate) const MAX_TRACKED_DEPTH: usize = 50;

/// CSS custom property holding the width of every column at `depth`.
pub(crate) fn css_var(depth: usize) -> String {
    format!("--col-width-{depth}")
}

/// Inline style for a node at `depth`: the shared variable with the default as fallback.
pub(crate) fn width_style(depth: usize) -> String {
    format!("width: var({}, {DEFAULT_COLUMN_WIDTH})", css_var(depth))
}

pub(crate) fn px(width: f64) -> String {
    format!("{}px", width.round() as i64)
}

/// Sparse widths indexed by depth; `None` means "use the default".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnWidths(Vec<Option<String>>);

impl ColumnWidths {
    pub fn from_sparse(entries: Vec<Option<String>>) -> Self {
        let mut widths = Self::default();
        widths.overlay(&entries);
        widths
    }

    pub fn get(&self, depth: usize) -> Option<&str> {
        self.0.get(depth).and_then(|w| w.as_deref())
    }

    pub fn width_or_default(&self, depth: usize) -> &str {
        self.get(depth).unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    /// Returns false (and changes nothing) for an empty width or an untracked depth.
    pub fn set(&mut self, depth: usize, width: impl Into<String>) -> bool {
        let width = width.into();
        if depth >= MAX_TRACKED_DEPTH || width.trim().is_empty() {
            return false;
        }
        if self.0.len() <= depth {
            self.0.resize(depth + 1, None);
        }
        self.0[depth] = Some(width);
        true
    }

    /// Apply every present entry of `entries`; holes and blanks keep the current value.
    pub fn overlay(&mut self, entries: &[Option<String>]) {
        for (depth, width) in entries.iter().enumerate() {
            if let Some(w) = width {
                self.set(depth, w.clone());
            }
        }
    }

    /// `(depth, width)` for every explicit entry.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(d, w)| w.as_deref().map(|w| (d, w)))
    }

    pub fn to_sparse(&self) -> Vec<Option<String>> {
        let mut out = self.0.clone();
        while matches!(out.last(), Some(None)) {
            out.pop();
        }
        out
    }
}

/// A width drag on the column edge at `depth`.
///
/// Pointer moves only produce preview widths; the caller commits once on release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeSession {
    pub depth: usize,
    start_x: f64,
    start_width: f64,
    moved: bool,
}

impl ResizeSession {
    pub fn new(depth: usize, start_x: f64, start_width: f64) -> Self {
        Self {
            depth,
            start_x,
            start_width,
            moved: false,
        }
    }

    pub fn width_at(&self, pointer_x: f64) -> f64 {
        (self.start_width + (pointer_x - self.start_x)).max(MIN_COLUMN_WIDTH_PX)
    }

    /// Preview width for a pointer move.
    pub fn drag_to(&mut self, pointer_x: f64) -> f64 {
        self.moved = true;
        self.width_at(pointer_x)
    }

    /// Width to commit on release; `None` when the pointer never moved.
    pub fn release(self, pointer_x: f64) -> Option<f64> {
        self.moved.then(|| self.width_at(pointer_x))
    }
}
