use serde::{Deserialize, Serialize};

use crate::*;
pub use layout::*;
pub use random::*;

mod layout;
mod random;

/// Decides where the mines go once the first revealed cell is known.
pub trait MineGenerator {
    /// Produces a layout for `config` that never places a mine on `exclude`.
    fn generate(&self, config: GameConfig, exclude: Coord2) -> MineLayout;
}

/// Placement strategy held by the engine until the first reveal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MinePlacement {
    Random(RandomMineGenerator),
    Fixed(MineLayout),
}

impl MineGenerator for MinePlacement {
    fn generate(&self, config: GameConfig, exclude: Coord2) -> MineLayout {
        match self {
            Self::Random(generator) => generator.generate(config, exclude),
            Self::Fixed(layout) => layout.generate(config, exclude),
        }
    }
}
