use alloc::vec::Vec;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::*;

/// Uniform placement over every cell except the excluded one.
///
/// Candidates are partially shuffled with a seeded RNG and the first `mines` of them become mines, so placement always
/// terminates no matter how dense the grid is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&self, config: GameConfig, exclude: Coord2) -> MineLayout {
        let mut candidates: Vec<Coord2> = iter_coords(config.size)
            .filter(|&coords| coords != exclude)
            .collect();

        let requested = usize::from(config.mines);
        if requested > candidates.len() {
            log::warn!(
                "Grid too small, requested {} mines but only {} cells are free",
                requested,
                candidates.len()
            );
        }
        let amount = requested.min(candidates.len());

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (chosen, _) = candidates.partial_shuffle(&mut rng, amount);

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for &coords in chosen.iter() {
            mine_mask[coords.to_nd_index()] = true;
        }
        log::debug!(
            "Placed {} mines with seed {:#x}, excluding {:?}",
            amount,
            self.seed,
            exclude
        );

        MineLayout::from_validated_mask(mine_mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_count_and_skips_excluded_cell() {
        let config = Level::Hard.config();
        for seed in 0..32 {
            let exclude = ((seed % 24) as Coord, (seed * 7 % 24) as Coord);
            let layout = RandomMineGenerator::new(seed).generate(config, exclude);

            assert_eq!(layout.mine_count(), 99);
            assert_eq!(layout.mine_coords().count(), 99);
            assert!(!layout.contains_mine(exclude));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = Level::Medium.config();
        let a = RandomMineGenerator::new(42).generate(config, (3, 3));
        let b = RandomMineGenerator::new(42).generate(config, (3, 3));
        let c = RandomMineGenerator::new(43).generate(config, (3, 3));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn densest_grid_leaves_only_the_excluded_cell() {
        let config = GameConfig::new((4, 4), 15).unwrap();
        let layout = RandomMineGenerator::new(7).generate(config, (2, 1));

        assert_eq!(layout.mine_count(), 15);
        for coords in iter_coords(config.size) {
            assert_eq!(layout.contains_mine(coords), coords != (2, 1));
        }
    }
}
