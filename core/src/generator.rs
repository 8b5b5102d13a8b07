use ndarray::Array2;
use rand::prelude::*;

use crate::*;

/// Strategy interface for producing a mine layout from a validated config.
pub trait MineLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// Uniform rejection-sampling generator: draws random squares and keeps the
/// first `mines` distinct ones. The 35% density cap keeps the expected number
/// of redraws small.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineLayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        let size = config.size;
        let total_cells = config.total_cells();

        // A full or overfull request would never leave the sampling loop; it
        // can only arrive through `new_unchecked`.
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "mine layout already full, requested {} but only {} fit",
                    config.mines,
                    total_cells
                );
            }
            return MineLayout {
                mine_mask: Array2::from_elem((size as usize, size as usize), true),
                mine_count: total_cells,
            };
        }

        let mut mine_mask: Array2<bool> = Array2::default((size as usize, size as usize));
        let mut placed: CellCount = 0;
        let mut rng = SmallRng::seed_from_u64(self.seed);

        while placed < config.mines {
            let coords: Coord2 = (rng.random_range(0..size), rng.random_range(0..size));
            let square = &mut mine_mask[coords.to_nd_index()];
            if !*square {
                *square = true;
                placed += 1;
            }
        }

        log::debug!("placed {placed} mines on a {size}x{size} grid");
        MineLayout {
            mine_mask,
            mine_count: placed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_mines(layout: &MineLayout) -> CellCount {
        let size = layout.size();
        (0..size)
            .flat_map(|row| (0..size).map(move |col| (row, col)))
            .filter(|&coords| layout.contains_mine(coords))
            .count() as CellCount
    }

    #[test]
    fn every_valid_config_gets_exactly_the_requested_mines() {
        for size in MIN_GRID_SIZE..=MAX_GRID_SIZE {
            for mines in 1..=GameConfig::max_mines(size) {
                let seed = u64::from(size) << 16 | u64::from(mines);
                let config = GameConfig::new(size, mines).unwrap();
                let layout = RandomLayoutGenerator::new(seed).generate(config);

                assert_eq!(layout.size(), size);
                assert_eq!(layout.mine_count(), mines);
                assert_eq!(count_mines(&layout), mines);
            }
        }
    }

    #[test]
    fn generation_is_deterministic_for_a_seed() {
        let config = GameConfig::new(8, 20).unwrap();

        let first = RandomLayoutGenerator::new(42).generate(config);
        let second = RandomLayoutGenerator::new(42).generate(config);

        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_reach_different_layouts() {
        let config = GameConfig::new(10, 35).unwrap();

        let first = RandomLayoutGenerator::new(1).generate(config);
        let second = RandomLayoutGenerator::new(2).generate(config);

        assert_ne!(first, second);
    }

    #[test]
    fn overfull_request_saturates_the_grid() {
        let config = GameConfig::new_unchecked(3, 20);

        let layout = RandomLayoutGenerator::new(7).generate(config);

        assert_eq!(layout.mine_count(), 9);
        assert_eq!(layout.safe_cell_count(), 0);
    }
}
