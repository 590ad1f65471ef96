use crate::*;
pub use random::*;

mod random;

/// Strategy that fixes the hazard positions of a board.
pub trait HazardGenerator {
    fn generate(self, config: BoardConfig) -> HazardLayout;
}
