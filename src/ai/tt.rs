use std::collections::HashMap;

use crate::types::{Color, GameState};

/// How a stored score relates to the true minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The node was searched with a full window.
    Exact,
    /// A cutoff happened; the true value is at least the score.
    Lower,
    /// Every child failed low; the true value is at most the score.
    Upper,
}

/// Canonical position encoding: side to move, both placement budgets,
/// the board and the remaining depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableKey {
    turn: Color,
    placed_black: u8,
    placed_white: u8,
    black: u32,
    white: u32,
    depth: u8,
}

impl TableKey {
    pub fn new(state: &GameState, depth: u8) -> Self {
        let (black, white) = state.board.bitboards();
        Self {
            turn: state.turn,
            placed_black: state.placed_count.black,
            placed_white: state.placed_count.white,
            black,
            white,
            depth,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TableEntry {
    depth: u8,
    score: i32,
    bound: Bound,
}

/// Per-search score cache. Owned by one search call and dropped with it.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<TableKey, TableEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a stored score usable for a node needing `depth` plies under
    /// the window `(alpha, beta)`.
    pub fn probe(&self, key: &TableKey, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.entries.get(key)?;
        if entry.depth < depth {
            return None;
        }
        match entry.bound {
            Bound::Exact => Some(entry.score),
            Bound::Lower if entry.score >= beta => Some(entry.score),
            Bound::Upper if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    pub fn store(&mut self, key: TableKey, depth: u8, score: i32, bound: Bound) {
        self.entries.insert(key, TableEntry { depth, score, bound });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
