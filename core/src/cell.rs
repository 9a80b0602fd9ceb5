use serde::{Deserialize, Serialize};

/// What the player has done to a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellMark {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

/// What a cell holds. Only safe cells carry an adjacency count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    Safe(u8),
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Safe(0)
    }
}

/// Canonical per-cell state stored by the grid engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub mark: CellMark,
    pub content: CellContent,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        matches!(self.content, CellContent::Mine)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.mark, CellMark::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.mark, CellMark::Flagged)
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self.mark, CellMark::Hidden)
    }

    /// Number of mines around this cell, `None` for a mine.
    pub const fn adjacent_mines(self) -> Option<u8> {
        match self.content {
            CellContent::Mine => None,
            CellContent::Safe(count) => Some(count),
        }
    }

    /// Adjacency count with `-1` standing in for a mine, for renderers that branch on a single number.
    pub const fn adjacent_mine_count(self) -> i8 {
        match self.content {
            CellContent::Mine => -1,
            CellContent::Safe(count) => count as i8,
        }
    }
}
