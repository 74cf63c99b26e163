//! Undo support for destructive structural edits.
//!
//! Only deletions are recorded: removing rows or columns is the one
//! operation that destroys cell text. Inserts are reversed by selecting
//! the new row or column and deleting it again, so they push nothing.

/// A deleted column captured at delete time: its original position, its
/// header name, and one cell per row that existed when the delete ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedColumn {
    pub index: usize,
    pub name: String,
    pub values: Vec<String>,
}

/// A deleted row captured at delete time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedRow {
    pub index: usize,
    pub values: Vec<String>,
}

/// One undoable delete. A single record holds every row or column removed
/// by one gesture, so one undo restores the whole batch.
#[derive(Debug, Clone)]
pub enum UndoRecord {
    Columns(Vec<DeletedColumn>),
    Rows(Vec<DeletedRow>),
}

/// LIFO stack of undo records.
///
/// There is no redo side: undoing a delete is itself not recorded, so a
/// restore cannot be replayed forward again.
#[derive(Debug, Default)]
pub struct History {
    stack: Vec<UndoRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: UndoRecord) {
        self.stack.push(record);
    }

    pub fn pop(&mut self) -> Option<UndoRecord> {
        self.stack.pop()
    }

    pub fn can_undo(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Drops every record. Called when a new file replaces the grid.
    pub fn clear(&mut self) {
        self.stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_record(index: usize) -> UndoRecord {
        UndoRecord::Rows(vec![DeletedRow {
            index,
            values: vec!["x".to_string()],
        }])
    }

    #[test]
    fn test_pop_returns_most_recent_first() {
        let mut history = History::new();
        history.push(row_record(0));
        history.push(row_record(5));

        match history.pop() {
            Some(UndoRecord::Rows(rows)) => assert_eq!(rows[0].index, 5),
            other => panic!("unexpected record: {:?}", other),
        }
        match history.pop() {
            Some(UndoRecord::Rows(rows)) => assert_eq!(rows[0].index, 0),
            other => panic!("unexpected record: {:?}", other),
        }
        assert!(history.pop().is_none());
    }

    #[test]
    fn test_can_undo_tracks_stack() {
        let mut history = History::new();
        assert!(!history.can_undo());
        history.push(row_record(1));
        assert!(history.can_undo());
        history.pop();
        assert!(!history.can_undo());
    }

    #[test]
    fn test_clear_empties_stack() {
        let mut history = History::new();
        history.push(row_record(0));
        history.push(row_record(1));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }
}
