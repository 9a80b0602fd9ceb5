use alloc::vec;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// No mines placed yet, waiting for the first reveal.
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Owns the grid of one session and applies every move to it.
///
/// Mines are only placed on the first reveal, so that cell is always safe. Moves that are not allowed (revealing a
/// flagged cell, flagging a revealed one, anything after the game ended, coordinates off the grid) report
/// [`RevealOutcome::NoChange`] and friends rather than failing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridEngine {
    config: GameConfig,
    cells: Array2<Cell>,
    placement: MinePlacement,
    state: EngineState,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    mines_defused: CellCount,
    defuse_used: bool,
    triggered_mine: Option<Coord2>,
}

impl GridEngine {
    /// Starts a session with randomly placed mines, fails if `config` leaves no safe cell.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_placement(
            config,
            MinePlacement::Random(RandomMineGenerator::new(seed)),
        ))
    }

    /// Starts a session that will use `layout` once the first cell is revealed.
    pub fn with_layout(layout: MineLayout) -> Result<Self> {
        let config = layout.game_config();
        config.validate()?;
        Ok(Self::with_placement(config, MinePlacement::Fixed(layout)))
    }

    fn with_placement(config: GameConfig, placement: MinePlacement) -> Self {
        Self {
            config,
            cells: Array2::default(config.size.to_nd_index()),
            placement,
            state: EngineState::Ready,
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            mines_defused: 0,
            defuse_used: false,
            triggered_mine: None,
        }
    }

    /// Throws away the current grid and starts over with the same config.
    ///
    /// Random placement is reseeded with `seed`. A fixed layout from [`GridEngine::with_layout`] is kept and `seed` is
    /// ignored.
    pub fn reset(&mut self, seed: u64) {
        let placement = match &self.placement {
            MinePlacement::Random(_) => MinePlacement::Random(RandomMineGenerator::new(seed)),
            MinePlacement::Fixed(layout) => MinePlacement::Fixed(layout.clone()),
        };
        log::debug!("Resetting {:?} with {:?}", self.config, placement);
        *self = Self::with_placement(self.config, placement);
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn has_detonated(&self) -> bool {
        matches!(self.state, EngineState::Lost)
    }

    pub fn has_won(&self) -> bool {
        matches!(self.state, EngineState::Won)
    }

    pub fn defuse_used(&self) -> bool {
        self.defuse_used
    }

    /// Whether mines have been placed, which happens on the first reveal.
    pub fn layout_finalized(&self) -> bool {
        !self.state.is_ready()
    }

    /// Mines the session started with, fixed for its whole lifetime.
    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    /// Mines still on the grid, a defused mine no longer counts.
    pub fn mines_on_grid(&self) -> CellCount {
        self.config.mines - self.mines_defused
    }

    /// Total mines minus placed flags, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.total_mines() as isize) - (self.flagged_count.0 as isize)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        use RevealOutcome::*;

        if !self.accepts_move_at(coords) {
            return NoChange;
        }
        if !self.cells[coords.to_nd_index()].is_hidden() {
            log::trace!("Reveal at {:?} ignored, cell is not hidden", coords);
            return NoChange;
        }

        if self.state.is_ready() {
            self.place_mines(coords);
            self.compute_adjacency();
            self.state = EngineState::Active;
        }

        if self.cells[coords.to_nd_index()].is_mine() {
            self.cells[coords.to_nd_index()].mark = CellMark::Revealed;
            self.revealed_count += 1;
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return Detonated;
        }

        self.flood_reveal(coords);

        if self.check_win() {
            self.end_game(true);
            Won
        } else {
            Revealed
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        use MarkOutcome::*;

        if !self.accepts_move_at(coords) {
            return NoChange;
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        match cell.mark {
            CellMark::Hidden => {
                cell.mark = CellMark::Flagged;
                self.flagged_count += 1;
                Changed
            }
            CellMark::Flagged => {
                cell.mark = CellMark::Hidden;
                self.flagged_count -= 1;
                Changed
            }
            CellMark::Revealed => NoChange,
        }
    }

    /// Removes the first hidden mine in row-major order and reveals its cell, once per session.
    pub fn defuse_mine(&mut self) -> DefuseOutcome {
        use DefuseOutcome::*;

        if self.state.is_finished() || self.defuse_used {
            return NoChange;
        }
        if self.state.is_ready() {
            log::trace!("Defuse ignored, mines are not placed yet");
            return NoChange;
        }

        self.defuse_used = true;

        let target = iter_coords(self.size()).find(|&coords| {
            let cell = self.cells[coords.to_nd_index()];
            cell.is_mine() && !cell.is_revealed()
        });
        let Some(coords) = target else {
            log::debug!("Defuse used but no hidden mine was left");
            return NoMineFound;
        };

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_flagged() {
            self.flagged_count -= 1;
        }
        cell.content = CellContent::default();
        cell.mark = CellMark::Revealed;
        self.revealed_count += 1;
        self.mines_defused += 1;
        log::debug!("Defused mine at {:?}", coords);

        self.compute_adjacency();

        if self.check_win() {
            self.end_game(true);
            Won
        } else {
            Defused(coords)
        }
    }

    /// True when every cell without a mine has been revealed.
    pub fn check_win(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.is_mine() || cell.is_revealed())
    }

    fn place_mines(&mut self, exclude: Coord2) {
        let layout = self.placement.generate(self.config, exclude);
        if layout.mine_count() != self.config.mines {
            log::warn!(
                "Mine count mismatch, placed {} but expected {}",
                layout.mine_count(),
                self.config.mines
            );
        }

        for coords in layout.mine_coords() {
            self.cells[coords.to_nd_index()].content = CellContent::Mine;
        }
        self.config.mines = layout.mine_count();
    }

    fn compute_adjacency(&mut self) {
        for coords in iter_coords(self.size()) {
            if self.cells[coords.to_nd_index()].is_mine() {
                continue;
            }
            let count = self
                .cells
                .iter_neighbors(coords)
                .filter(|&pos| self.cells[pos.to_nd_index()].is_mine())
                .count() as u8;
            self.cells[coords.to_nd_index()].content = CellContent::Safe(count);
        }
    }

    /// Reveals `start` and, through zero-count cells, the whole connected region around it.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut pending = vec![start];

        while let Some(coords) = pending.pop() {
            let cell = &mut self.cells[coords.to_nd_index()];
            // flags block the fill, mines are never reached through a zero cell
            if !cell.is_hidden() || cell.is_mine() {
                continue;
            }

            cell.mark = CellMark::Revealed;
            self.revealed_count += 1;
            let adjacent_mines = cell.adjacent_mines();
            log::trace!("Revealed {:?}, adjacent mines: {:?}", coords, adjacent_mines);

            if adjacent_mines == Some(0) {
                pending.extend(
                    self.cells
                        .iter_neighbors(coords)
                        .filter(|&pos| self.cells[pos.to_nd_index()].is_hidden()),
                );
            }
        }
    }

    fn accepts_move_at(&self, coords: Coord2) -> bool {
        if self.state.is_finished() {
            log::trace!("Move at {:?} ignored, game already ended", coords);
            return false;
        }
        if !in_bounds(coords, self.size()) {
            log::trace!("Move at {:?} ignored, outside the grid", coords);
            return false;
        }
        true
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            EngineState::Won
        } else {
            EngineState::Lost
        };
        log::debug!("Game ended, state: {:?}", self.state);
    }
}
