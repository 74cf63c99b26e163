use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Row/column selection over a rectangular grid.
///
/// Exactly one axis is active at a time: touching a row clears any column
/// selection and vice versa. Each axis remembers the last-touched index as
/// the anchor for range extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    rows: BTreeSet<usize>,
    columns: BTreeSet<usize>,
    anchor_row: Option<usize>,
    anchor_column: Option<usize>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a click on a row header.
    ///
    /// `extend` stretches the inclusive range from the anchor to `index`
    /// (shift-click); `toggle` flips membership of `index` (cmd-click).
    /// Both together union the anchor range into the current selection.
    /// Neither selects exactly `index`. The anchor always moves to `index`,
    /// and any column selection is dropped.
    pub fn select_row(&mut self, index: usize, extend: bool, toggle: bool) {
        self.columns.clear();
        self.anchor_column = None;
        apply_click(&mut self.rows, self.anchor_row, index, extend, toggle);
        self.anchor_row = Some(index);
    }

    /// Apply a click on a column header. Mirror of [`select_row`].
    ///
    /// [`select_row`]: Selection::select_row
    pub fn select_column(&mut self, index: usize, extend: bool, toggle: bool) {
        self.rows.clear();
        self.anchor_row = None;
        apply_click(&mut self.columns, self.anchor_column, index, extend, toggle);
        self.anchor_column = Some(index);
    }

    /// Replace the selection with exactly the given rows.
    ///
    /// The last index in `indices` becomes the anchor. Used when an edit
    /// wants to hand the selection to a freshly inserted or restored range.
    pub fn replace_rows(&mut self, indices: &[usize]) {
        self.columns.clear();
        self.anchor_column = None;
        self.rows = indices.iter().copied().collect();
        self.anchor_row = indices.last().copied();
    }

    /// Replace the selection with exactly the given columns.
    pub fn replace_columns(&mut self, indices: &[usize]) {
        self.rows.clear();
        self.anchor_row = None;
        self.columns = indices.iter().copied().collect();
        self.anchor_column = indices.last().copied();
    }

    /// Drop everything, including the anchors.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.columns.clear();
        self.anchor_row = None;
        self.anchor_column = None;
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }

    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn has_columns(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn contains_row(&self, index: usize) -> bool {
        self.rows.contains(&index)
    }

    pub fn contains_column(&self, index: usize) -> bool {
        self.columns.contains(&index)
    }

    /// Selected rows in ascending order.
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().copied()
    }

    /// Selected columns in ascending order.
    pub fn columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().copied()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Last-touched row, if the row axis has been used.
    pub fn anchor_row(&self) -> Option<usize> {
        self.anchor_row
    }

    /// Last-touched column, if the column axis has been used.
    pub fn anchor_column(&self) -> Option<usize> {
        self.anchor_column
    }
}

/// Shared click logic for one axis.
///
/// `extend` without a prior anchor degrades to the non-extend form, matching
/// how a shift-click behaves before anything was ever selected.
fn apply_click(
    set: &mut BTreeSet<usize>,
    anchor: Option<usize>,
    index: usize,
    extend: bool,
    toggle: bool,
) {
    if extend {
        if let Some(anchor) = anchor {
            let range = anchor.min(index)..=anchor.max(index);
            if toggle {
                set.extend(range);
            } else {
                *set = range.collect();
            }
            return;
        }
    }

    if toggle {
        if !set.remove(&index) {
            set.insert(index);
        }
    } else {
        set.clear();
        set.insert(index);
    }
}
