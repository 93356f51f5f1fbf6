use serde::{Deserialize, Serialize};

/// Everything the agent believes about a single cell.
///
/// Deduced facts live in the tag, never in sentinel numbers: a cell that was
/// queued for uncovering is distinguishable from one that was actually
/// revealed, and a deduced mine carries no fake clue value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    /// Nothing known yet.
    Covered,
    /// Deduced safe and scheduled for uncovering, not yet confirmed by the host.
    QueuedSafe,
    /// Uncovered by the host, carrying its numeric clue.
    Revealed(Clue),
    /// Deduced to hold a mine. Terminal; flagged cells are never uncovered.
    FlaggedMine,
}

impl CellState {
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered)
    }

    pub const fn clue(self) -> Option<Clue> {
        match self {
            Self::Revealed(clue) => Some(clue),
            _ => None,
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Covered
    }
}

/// The numeric constraint attached to a revealed cell.
///
/// `effective` is the clue minus the flagged-mine neighbors, i.e. the mines
/// still unaccounted for among the `covered` still-covered neighbors. Both
/// fields are refreshed by [`Board::evaluate`](crate::Board::evaluate) and
/// satisfy `effective <= covered` on any consistent board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    pub value: u8,
    pub effective: u8,
    pub covered: u8,
}

impl Clue {
    pub(crate) const fn new(value: u8) -> Self {
        Self {
            value,
            effective: value,
            covered: 0,
        }
    }

    /// A clue with no covered neighbors left constrains nothing; sweeps skip it.
    pub const fn is_resolved(self) -> bool {
        self.covered == 0
    }

    /// Still has unexplained mines bordering covered cells.
    pub const fn is_active(self) -> bool {
        self.effective > 0 && self.covered > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_clue_starts_unevaluated() {
        let clue = Clue::new(3);
        assert_eq!(clue.effective, 3);
        assert!(clue.is_resolved());
        assert!(!clue.is_active());
    }

    #[test]
    fn only_revealed_cells_carry_a_clue() {
        assert_eq!(CellState::Covered.clue(), None);
        assert_eq!(CellState::QueuedSafe.clue(), None);
        assert_eq!(CellState::FlaggedMine.clue(), None);
        assert!(CellState::Revealed(Clue::new(1)).clue().is_some());
    }

    #[test]
    fn default_cell_is_covered() {
        assert!(CellState::default().is_covered());
    }
}
