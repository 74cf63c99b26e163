//! Search results and the cursor that walks them.

use serde::{Deserialize, Serialize};

/// One search hit: a single cell addressed by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub row: usize,
    pub column: usize,
}

/// A finished search: the query, its matches in scan order, and a cursor.
///
/// The state does not watch the grid. After any edit the positions may be
/// stale, and the owner is expected to run the search again rather than
/// trust them.
#[derive(Debug, Default, Clone)]
pub struct SearchState {
    query: String,
    matches: Vec<Match>,
    current: usize,
    column_scoped: bool,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a fresh result set and rewinds the cursor to the first hit.
    pub fn set_results(&mut self, query: impl Into<String>, matches: Vec<Match>, column_scoped: bool) {
        self.query = query.into();
        self.matches = matches;
        self.current = 0;
        self.column_scoped = column_scoped;
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.current = 0;
        self.column_scoped = false;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn is_column_scoped(&self) -> bool {
        self.column_scoped
    }

    /// Position of the cursor within the match list. Only meaningful while
    /// [`current_match`](Self::current_match) returns `Some`.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_match(&self) -> Option<Match> {
        self.matches.get(self.current).copied()
    }

    /// Steps the cursor one hit forward or backward, wrapping at either
    /// end. Does nothing when there are no matches.
    pub fn advance(&mut self, forward: bool) {
        let count = self.matches.len();
        if count == 0 {
            return;
        }
        self.current = if forward {
            (self.current + 1) % count
        } else {
            (self.current + count - 1) % count
        };
    }
}
