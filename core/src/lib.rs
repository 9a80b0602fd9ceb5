//! Grid engine for BlastGrid, a single-player mine-clearing puzzle.
//!
//! [`GridEngine`] owns the grid of one session: mines are placed on the first reveal (never under it), zero-count
//! regions are flood-filled, and a single defuse assist can remove one hidden mine. [`Session`] wraps the engine with
//! the cursor and timer a presentation layer needs, and [`Snapshot`] is what it renders.
#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod config;
mod engine;
mod error;
mod generator;
mod session;
mod snapshot;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Detonated,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Detonated => true,
            Won => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefuseOutcome {
    /// Already used, game over, or mines not placed yet.
    NoChange,
    Defused(Coord2),
    /// The assist was spent but there was no hidden mine to remove.
    NoMineFound,
    Won,
}

impl DefuseOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
