use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Board;

/// Board plus score. The engine keeps one for the live game and one as the
/// undo snapshot; being `Copy`, a snapshot can never alias the live board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub score: u64,
}

impl GameState {
    pub fn new(board: Board) -> Self {
        Self { board, score: 0 }
    }

    pub fn max_tile(&self) -> u32 {
        self.board.max_tile()
    }

    pub fn empty_count(&self) -> usize {
        self.board.empty_count()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "Score: {}", self.score)
    }
}
