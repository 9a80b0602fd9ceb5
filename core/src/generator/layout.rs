use core::ops::{Index, IndexMut};
use ndarray::Array2;

use super::*;

/// A finished mine mask for the whole grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows == 0 || cols == 0 || rows > MAX_ROWS.into() || cols > MAX_COLS.into() {
            return Err(GameError::InvalidSize);
        }
        Ok(Self::from_validated_mask(mine_mask))
    }

    /// Builds a layout whose mask dimensions are already known to fit `Coord`.
    pub(crate) fn from_validated_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        GameConfig::new_unchecked(size, 0).validate()?;
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_validated_mask(mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self[coords]
    }

    /// Mine positions in row-major order.
    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        iter_coords(self.size()).filter(|&coords| self[coords])
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }
}

/// A fixed layout replays itself, moving a mine off the excluded cell if needed.
impl MineGenerator for MineLayout {
    fn generate(&self, _config: GameConfig, exclude: Coord2) -> MineLayout {
        let mut layout = self.clone();
        if !layout.contains_mine(exclude) {
            return layout;
        }

        let free = iter_coords(layout.size()).find(|&coords| coords != exclude && !layout[coords]);
        match free {
            Some(free) => {
                log::debug!("Relocating mine from {:?} to {:?}", exclude, free);
                layout[exclude] = false;
                layout[free] = true;
            }
            None => log::warn!("No free cell to relocate the mine at {:?}", exclude),
        }
        layout
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.mine_mask[coords.to_nd_index()]
    }
}
