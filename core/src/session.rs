use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Selected cell, wrapping around at every edge of the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    position: Coord2,
    bounds: Coord2,
}

impl Cursor {
    pub const fn new(bounds: Coord2) -> Self {
        Self {
            position: (0, 0),
            bounds,
        }
    }

    pub const fn position(&self) -> Coord2 {
        self.position
    }

    pub fn step(&mut self, direction: Direction) {
        let (row, col) = self.position;
        let (rows, cols) = self.bounds;
        self.position = match direction {
            Direction::Up => (wrap_back(row, rows), col),
            Direction::Down => (wrap_forward(row, rows), col),
            Direction::Left => (row, wrap_back(col, cols)),
            Direction::Right => (row, wrap_forward(col, cols)),
        };
    }
}

const fn wrap_forward(value: Coord, len: Coord) -> Coord {
    if value + 1 >= len { 0 } else { value + 1 }
}

const fn wrap_back(value: Coord, len: Coord) -> Coord {
    if value == 0 { len - 1 } else { value - 1 }
}

/// Input events coming from the presentation layer, applied at the cursor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    Move(Direction),
    ToggleFlag,
    Reveal,
    Defuse,
}

/// One game as the presentation layer sees it: the engine, the cursor, and the clock.
#[derive(Clone, Debug)]
pub struct Session {
    engine: GridEngine,
    cursor: Cursor,
    started_at: Instant,
    ended_at: Option<Instant>,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Ok(Self::with_engine(GridEngine::new(config, seed)?))
    }

    pub fn from_level(level: Level, seed: u64) -> Result<Self> {
        Self::new(level.config(), seed)
    }

    pub fn with_engine(engine: GridEngine) -> Self {
        Self {
            cursor: Cursor::new(engine.size()),
            engine,
            started_at: Instant::now(),
            ended_at: None,
        }
    }

    /// Starts over on the same grid size with a fresh seed.
    pub fn new_game(&mut self, seed: u64) {
        self.engine.reset(seed);
        self.cursor = Cursor::new(self.engine.size());
        self.started_at = Instant::now();
        self.ended_at = None;
    }

    pub fn engine(&self) -> &GridEngine {
        &self.engine
    }

    pub fn cursor(&self) -> Coord2 {
        self.cursor.position()
    }

    /// Applies one input, returns whether anything needs to be redrawn.
    pub fn handle(&mut self, input: Input) -> bool {
        if self.engine.is_finished() {
            log::trace!("Input {:?} ignored, game already ended", input);
            return false;
        }

        let coords = self.cursor.position();
        let updated = match input {
            Input::Move(direction) => {
                self.cursor.step(direction);
                true
            }
            Input::ToggleFlag => self.engine.toggle_flag(coords).has_update(),
            Input::Reveal => self.engine.reveal(coords).has_update(),
            Input::Defuse => self.engine.defuse_mine().has_update(),
        };

        if self.engine.is_finished() && self.ended_at.is_none() {
            let now = Instant::now();
            self.ended_at = Some(now);
            log::debug!(
                "Session ended after {}s, won: {}",
                self.elapsed_secs_at(now),
                self.engine.has_won()
            );
        }
        updated
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs_at(Instant::now())
    }

    /// Seconds between the session start and `now`, frozen once the game has ended.
    pub fn elapsed_secs_at(&self, now: Instant) -> u32 {
        let end = self.ended_at.unwrap_or(now);
        end.saturating_duration_since(self.started_at).as_secs() as u32
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(&self.engine).with_elapsed_secs(self.elapsed_secs())
    }
}
