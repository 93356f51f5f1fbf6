use alloc::vec::Vec;

use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::*;

/// Purely random placement, except that the requested start-cell protection is
/// honored when the board has room for it. Falls back one protection level at
/// a time (with a warning) instead of failing.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    start: Coord2,
    start_cell: StartCell,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, start: Coord2, start_cell: StartCell) -> Self {
        Self {
            seed,
            start,
            start_cell,
        }
    }

    fn effective_start_cell(&self, config: GameConfig) -> StartCell {
        use StartCell::*;

        let total = config.total_cells();
        match self.start_cell {
            Random => Random,
            SimpleSafe | AlwaysZero if config.mines.saturating_add(1) > total => {
                log::warn!("cannot keep the start cell safe, falling back to random placement");
                Random
            }
            SimpleSafe => SimpleSafe,
            AlwaysZero if config.mines.saturating_add(9) > total => {
                log::warn!("cannot clear the start neighborhood, falling back to a safe start");
                SimpleSafe
            }
            AlwaysZero => AlwaysZero,
        }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use StartCell::*;

        let mut reserved: Array2<bool> = Array2::default(config.size.to_nd_index());
        match self.effective_start_cell(config) {
            Random => {}
            SimpleSafe => reserved[self.start.to_nd_index()] = true,
            AlwaysZero => {
                reserved[self.start.to_nd_index()] = true;
                for pos in iter_neighbors(self.start, config.size) {
                    reserved[pos.to_nd_index()] = true;
                }
            }
        }

        let free: Vec<Coord2> = iter_coords(config.size)
            .filter(|&pos| !reserved[pos.to_nd_index()])
            .collect();
        let wanted = usize::from(config.mines).min(free.len());
        if wanted < usize::from(config.mines) {
            log::warn!(
                "minefield only fits {} of the {} requested mines",
                wanted,
                config.mines
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        for idx in rand::seq::index::sample(&mut rng, free.len(), wanted) {
            mines[free[idx].to_nd_index()] = true;
        }
        MineLayout::from_mine_mask(mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_mines() {
        let config = GameConfig::new((9, 9), 10);
        let layout =
            RandomMinefieldGenerator::new(3, (4, 4), StartCell::SimpleSafe).generate(config);
        assert_eq!(layout.mine_count(), 10);
        assert!(!layout.contains_mine((4, 4)));
    }

    #[test]
    fn always_zero_clears_the_whole_start_neighborhood() {
        let config = GameConfig::new((9, 9), 10);
        let layout =
            RandomMinefieldGenerator::new(11, (4, 4), StartCell::AlwaysZero).generate(config);
        assert_eq!(layout.adjacent_mine_count((4, 4)), 0);
        assert!(!layout.contains_mine((4, 4)));
    }

    #[test]
    fn falls_back_when_the_protection_does_not_fit() {
        // 8 mines on 9 cells: AlwaysZero cannot hold, SimpleSafe still can.
        let config = GameConfig::new((3, 3), 8);
        let layout =
            RandomMinefieldGenerator::new(5, (1, 1), StartCell::AlwaysZero).generate(config);
        assert_eq!(layout.mine_count(), 8);
        assert!(!layout.contains_mine((1, 1)));
    }

    #[test]
    fn same_seed_same_minefield() {
        let config = GameConfig::new((16, 16), 40);
        let a = RandomMinefieldGenerator::new(42, (8, 8), StartCell::AlwaysZero).generate(config);
        let b = RandomMinefieldGenerator::new(42, (8, 8), StartCell::AlwaysZero).generate(config);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let config = GameConfig::new((16, 16), 40);
        let a = RandomMinefieldGenerator::new(1, (8, 8), StartCell::Random).generate(config);
        let b = RandomMinefieldGenerator::new(2, (8, 8), StartCell::Random).generate(config);
        assert_ne!(a, b);
    }
}
