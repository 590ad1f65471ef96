use super::*;

/// Uniformly random placement that never puts a hazard on the excluded cell.
///
/// Hazards are drawn as a sample without replacement from the `rows * cols - 1` eligible cells, so
/// generation time does not depend on how dense the board is.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomHazardGenerator {
    seed: u64,
    exclude: Coord2,
}

impl RandomHazardGenerator {
    pub fn new(seed: u64, exclude: Coord2) -> Self {
        Self { seed, exclude }
    }
}

impl HazardGenerator for RandomHazardGenerator {
    fn generate(self, config: BoardConfig) -> HazardLayout {
        use rand::prelude::*;
        use rand::seq::index;

        let size = config.size();
        let excluded = flat_index(self.exclude, size);
        let eligible = config.total_cells() as usize - 1;
        // a validated config always leaves the excluded cell free
        let amount = (config.hazards() as usize).min(eligible);

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut hazard_mask: Array2<bool> = Array2::default(size.to_nd_index());

        // skip over the excluded cell by shifting every pick at or after it up by one
        for pick in index::sample(&mut rng, eligible, amount) {
            let cell = if pick >= excluded { pick + 1 } else { pick };
            hazard_mask[from_flat_index(cell, size).to_nd_index()] = true;
        }

        HazardLayout::with_config(config, hazard_mask)
    }
}
