use core::fmt::{self, Write};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer may know about one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Only set once the cell is revealed or the game is over.
    pub is_mine: bool,
    /// Only set for revealed cells without a mine.
    pub adjacent_mines: Option<u8>,
}

impl CellView {
    fn new(cell: Cell, game_over: bool) -> Self {
        let is_revealed = cell.is_revealed();
        Self {
            is_revealed,
            is_flagged: cell.is_flagged(),
            is_mine: cell.is_mine() && (is_revealed || game_over),
            adjacent_mines: cell.adjacent_mines().filter(|_| is_revealed),
        }
    }

    fn glyph(self) -> char {
        match self {
            Self { is_mine: true, .. } => '*',
            Self { is_flagged: true, .. } => 'F',
            Self {
                adjacent_mines: Some(0),
                ..
            } => '.',
            Self {
                adjacent_mines: Some(count),
                ..
            } => char::from(b'0' + count),
            _ => '#',
        }
    }
}

/// Read-only copy of the engine state handed to the presentation layer after every move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub cells: Array2<CellView>,
    pub mines_left: isize,
    pub has_detonated: bool,
    pub has_won: bool,
    pub defuse_used: bool,
    pub layout_finalized: bool,
    pub triggered_mine: Option<Coord2>,
    /// Owned by the session timer, zero when taken straight from an engine.
    pub elapsed_secs: u32,
}

impl Snapshot {
    pub fn from_engine(engine: &GridEngine) -> Self {
        let game_over = engine.is_finished();
        let cells = engine.cells().map(|&cell| CellView::new(cell, game_over));

        Self {
            size: engine.size(),
            cells,
            mines_left: engine.mines_left(),
            has_detonated: engine.has_detonated(),
            has_won: engine.has_won(),
            defuse_used: engine.defuse_used(),
            layout_finalized: engine.layout_finalized(),
            triggered_mine: engine.triggered_mine(),
            elapsed_secs: 0,
        }
    }

    pub fn with_elapsed_secs(mut self, elapsed_secs: u32) -> Self {
        self.elapsed_secs = elapsed_secs;
        self
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.has_detonated || self.has_won
    }
}

/// One line per row: `#` hidden, `F` flagged, `*` mine, `.` empty, digits for counts.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for view in row {
                f.write_char(view.glyph())?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
