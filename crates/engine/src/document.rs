//! The in-memory document: a rectangular grid of text cells plus the
//! selection, undo history, and sort state that travel with it.

use log::debug;
use tabula_core::selection::Selection;

use crate::history::{DeletedColumn, DeletedRow, History, UndoRecord};
use crate::search::Match;
use crate::sort::{compare_cells, sorted_permutation, SortDirection, SortState};

/// One open file's worth of tabular data.
///
/// Invariant: every row holds exactly `headers.len()` cells after any
/// public operation. Loads fit incoming records to the header width, and
/// structural edits keep the rectangle by construction.
#[derive(Debug, Default)]
pub struct Document {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    selection: Selection,
    history: History,
    sort_state: Option<SortState>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the grid with freshly parsed content.
    ///
    /// The first record of a file becomes `headers`; every body record is
    /// padded or truncated to that width. Selection, undo history, and
    /// sort state all reset, since they describe a grid that no longer
    /// exists.
    pub fn load(&mut self, headers: Vec<String>, records: Vec<Vec<String>>) {
        let width = headers.len();
        self.headers = headers;
        self.rows = records
            .into_iter()
            .map(|mut record| {
                fit_row(&mut record, width);
                record
            })
            .collect();
        self.selection.clear();
        self.history.clear();
        self.sort_state = None;
        debug!(
            "loaded grid: {} columns x {} rows",
            self.headers.len(),
            self.rows.len()
        );
    }

    /// Empties the grid and resets all auxiliary state.
    pub fn clear(&mut self) {
        self.headers.clear();
        self.rows.clear();
        self.selection.clear();
        self.history.clear();
        self.sort_state = None;
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn header(&self, column: usize) -> Option<&str> {
        self.headers.get(column).map(String::as_str)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort_state
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Selects a row; out-of-range indices are ignored.
    pub fn select_row(&mut self, index: usize, extend: bool, toggle: bool) {
        if index >= self.rows.len() {
            return;
        }
        self.selection.select_row(index, extend, toggle);
    }

    /// Selects a column; out-of-range indices are ignored.
    pub fn select_column(&mut self, index: usize, extend: bool, toggle: bool) {
        if index >= self.headers.len() {
            return;
        }
        self.selection.select_column(index, extend, toggle);
    }

    /// Inserts a column at `at` (clamped to the current width), filling
    /// every row with `fill`. The new column becomes the sole selection.
    /// Returns the position actually used.
    pub fn insert_column(&mut self, at: usize, name: impl Into<String>, fill: &str) -> usize {
        let at = at.min(self.headers.len());
        self.headers.insert(at, name.into());
        for row in &mut self.rows {
            row.insert(at, fill.to_string());
        }
        self.selection.replace_columns(&[at]);
        at
    }

    /// Inserts a row at `at` (clamped to the current row count). `values`
    /// is fitted to the header width. The new row becomes the sole
    /// selection. Returns the position actually used.
    pub fn insert_row(&mut self, at: usize, mut values: Vec<String>) -> usize {
        let at = at.min(self.rows.len());
        fit_row(&mut values, self.headers.len());
        self.rows.insert(at, values);
        self.selection.replace_rows(&[at]);
        at
    }

    /// Deletes the given columns in one undoable batch.
    ///
    /// Out-of-range indices are dropped and duplicates collapse; if
    /// nothing valid remains this is a no-op. Deleting columns clears the
    /// selection and forgets the sort state, since the sorted column may
    /// be among the dead.
    pub fn delete_columns(&mut self, indices: &[usize]) -> bool {
        let mut valid: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&index| index < self.headers.len())
            .collect();
        valid.sort_unstable();
        valid.dedup();
        if valid.is_empty() {
            return false;
        }

        // Capture in ascending order before anything moves.
        let record: Vec<DeletedColumn> = valid
            .iter()
            .map(|&index| DeletedColumn {
                index,
                name: self.headers[index].clone(),
                values: self
                    .rows
                    .iter()
                    .map(|row| row.get(index).cloned().unwrap_or_default())
                    .collect(),
            })
            .collect();

        // Remove in descending order so earlier indices stay valid.
        for &index in valid.iter().rev() {
            self.headers.remove(index);
            for row in &mut self.rows {
                if index < row.len() {
                    row.remove(index);
                }
            }
        }

        debug!("deleted {} column(s)", valid.len());
        self.selection.clear();
        self.sort_state = None;
        self.history.push(UndoRecord::Columns(record));
        true
    }

    /// Deletes the given rows in one undoable batch. Same index rules as
    /// [`delete_columns`](Self::delete_columns); the sort state survives
    /// because removing rows does not change what the grid is sorted by.
    pub fn delete_rows(&mut self, indices: &[usize]) -> bool {
        let mut valid: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&index| index < self.rows.len())
            .collect();
        valid.sort_unstable();
        valid.dedup();
        if valid.is_empty() {
            return false;
        }

        let record: Vec<DeletedRow> = valid
            .iter()
            .map(|&index| DeletedRow {
                index,
                values: self.rows[index].clone(),
            })
            .collect();

        for &index in valid.iter().rev() {
            self.rows.remove(index);
        }

        debug!("deleted {} row(s)", valid.len());
        self.selection.clear();
        self.history.push(UndoRecord::Rows(record));
        true
    }

    /// Undoes the most recent deletion, restoring the captured rows or
    /// columns in ascending original order with positions clamped to the
    /// current shape. The restored indices become the selection. Returns
    /// `false` when there is nothing to undo.
    pub fn undo_last(&mut self) -> bool {
        let Some(record) = self.history.pop() else {
            return false;
        };
        match record {
            UndoRecord::Columns(mut columns) => {
                columns.sort_by_key(|column| column.index);
                let mut restored = Vec::with_capacity(columns.len());
                for column in columns {
                    let at = column.index.min(self.headers.len());
                    self.headers.insert(at, column.name);
                    for (row_index, row) in self.rows.iter_mut().enumerate() {
                        // Rows added after the delete get an empty cell.
                        let value = column.values.get(row_index).cloned().unwrap_or_default();
                        row.insert(at, value);
                    }
                    restored.push(at);
                }
                debug!("restored {} column(s)", restored.len());
                self.selection.replace_columns(&restored);
            }
            UndoRecord::Rows(mut rows) => {
                rows.sort_by_key(|row| row.index);
                let mut restored = Vec::with_capacity(rows.len());
                for row in rows {
                    let at = row.index.min(self.rows.len());
                    let mut values = row.values;
                    fit_row(&mut values, self.headers.len());
                    self.rows.insert(at, values);
                    restored.push(at);
                }
                debug!("restored {} row(s)", restored.len());
                self.selection.replace_rows(&restored);
            }
        }
        true
    }

    /// Sorts the body rows by one column. Header and selection are left
    /// alone; the applied column and direction are remembered. Returns
    /// `false` when the column does not exist.
    pub fn sort_by_column(&mut self, column: usize, direction: SortDirection) -> bool {
        if column >= self.headers.len() {
            return false;
        }
        let rows = &self.rows;
        let perm = sorted_permutation(rows.len(), |a, b| {
            let left = rows[a].get(column).map(String::as_str).unwrap_or("");
            let right = rows[b].get(column).map(String::as_str).unwrap_or("");
            match direction {
                SortDirection::Ascending => compare_cells(left, right),
                SortDirection::Descending => compare_cells(right, left),
            }
        });
        let mut slots: Vec<Option<Vec<String>>> =
            std::mem::take(&mut self.rows).into_iter().map(Some).collect();
        self.rows = perm
            .iter()
            .map(|&index| slots[index].take().unwrap_or_default())
            .collect();
        self.sort_state = Some(SortState { column, direction });
        true
    }

    /// Sorts by `column`, flipping direction when it is already the
    /// sorted column and starting ascending otherwise. Returns the
    /// direction applied, or `None` for an out-of-range column.
    pub fn toggle_sort(&mut self, column: usize) -> Option<SortDirection> {
        if column >= self.headers.len() {
            return None;
        }
        let direction = match self.sort_state {
            Some(state) if state.column == column => state.direction.reversed(),
            _ => SortDirection::Ascending,
        };
        self.sort_by_column(column, direction);
        Some(direction)
    }

    /// Finds every cell whose text contains `query`, case-insensitively.
    ///
    /// Matches come back in scan order: row by row, ascending column
    /// within each row. `scope` restricts the scan to those columns; the
    /// header row is never searched. An empty query matches nothing.
    pub fn find(&self, query: &str, scope: Option<&[usize]>) -> Vec<Match> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        let mut matches = Vec::new();
        for (row_index, row) in self.rows.iter().enumerate() {
            for (column_index, cell) in row.iter().enumerate() {
                if let Some(scope) = scope {
                    if !scope.contains(&column_index) {
                        continue;
                    }
                }
                if cell.to_lowercase().contains(&needle) {
                    matches.push(Match {
                        row: row_index,
                        column: column_index,
                    });
                }
            }
        }
        matches
    }

    /// Row and column indices a copy should cover: the selected ones, or
    /// the whole axis when nothing is selected on it. Both lists come
    /// back ascending.
    pub fn copy_region(&self) -> (Vec<usize>, Vec<usize>) {
        let rows = if self.selection.has_rows() {
            self.selection.rows().collect()
        } else {
            (0..self.rows.len()).collect()
        };
        let columns = if self.selection.has_columns() {
            self.selection.columns().collect()
        } else {
            (0..self.headers.len()).collect()
        };
        (rows, columns)
    }
}

/// Pads with empty cells or truncates so `row` is exactly `width` wide.
fn fit_row(row: &mut Vec<String>, width: usize) {
    if row.len() < width {
        row.resize(width, String::new());
    } else {
        row.truncate(width);
    }
}
