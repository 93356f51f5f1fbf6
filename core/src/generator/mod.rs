use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// How much the generator protects the agreed first uncover.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartCell {
    /// No protection; the start cell may hold a mine.
    Random,
    /// The start cell itself is kept clear.
    SimpleSafe,
    /// The start cell and its whole neighborhood are kept clear, so the
    /// opening clue is always zero.
    AlwaysZero,
}
