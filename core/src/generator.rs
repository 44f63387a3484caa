use ndarray::Array2;

use crate::board::MineField;
use crate::types::ToNdIndex;
use crate::GameConfig;

/// Strategy seam for producing a mine layout from a validated config.
pub trait LayoutGenerator {
    fn generate(self, config: GameConfig) -> MineField;
}

/// Uniform placement: samples exactly `config.mines` distinct cells, without
/// replacement, from a generator seeded with `seed`. The same seed and config
/// always produce the same layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineField {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let total = config.total_cells() as usize;

        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        {
            let cells = mines.as_slice_mut().expect("layout should be standard");
            for flat in rand::seq::index::sample(&mut rng, total, config.mines as usize) {
                cells[flat] = true;
            }
        }
        log::debug!(
            "placed {} mines on a {:?} board with seed {}",
            config.mines,
            config.size,
            self.seed
        );

        MineField::from_mine_mask(mines)
    }
}
