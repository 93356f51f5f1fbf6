use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Covered-neighbor set of a single clue; never more than 8 entries.
pub type CoveredSet = SmallVec<[Coord2; 8]>;

/// The agent's working model of the field: per-cell belief state plus the
/// counters the episode controller keys its terminal check on.
///
/// Accessors index with raw coordinates and fail fast on out-of-range input
/// (the underlying array panics, nothing is clamped); `validate_coords` is the
/// checked entry point for coordinates crossing the public boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl Board {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
        }
    }

    pub fn size(&self) -> Coord2 {
        self.cells.bounds()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(AgentError::InvalidCoords)
        }
    }

    pub fn state(&self, coords: Coord2) -> CellState {
        self.cells[coords.to_nd_index()]
    }

    pub fn clue_at(&self, coords: Coord2) -> Option<Clue> {
        self.state(coords).clue()
    }

    /// Cells the host has confirmed uncovered so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Cells deduced to hold a mine so far.
    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        crate::types::iter_coords(self.size())
    }

    pub fn iter_neighbors(&self, center: Coord2) -> impl Iterator<Item = Coord2> + use<> {
        crate::types::iter_neighbors(center, self.size())
    }

    /// Neighbors whose status is exactly `Covered`. Queued-safe cells are
    /// already known safe and never count as covered, which is what makes the
    /// all-covered-are-mines rule sound.
    pub fn covered_neighbors(&self, center: Coord2) -> CoveredSet {
        self.iter_neighbors(center)
            .filter(|&pos| self.state(pos).is_covered())
            .collect()
    }

    /// Re-derives the effective constraint of the revealed cell at `coords`
    /// from live neighbor state: counts flagged-mine neighbors, rebuilds the
    /// covered set, and caches both on the clue. Returns the refreshed clue
    /// together with the covered set for the deduction rules to consume.
    ///
    /// Must be re-run whenever a neighbor changes status; both cached fields
    /// depend on the neighborhood. Calling it on a cell that is not revealed
    /// is a caller error.
    pub fn evaluate(&mut self, coords: Coord2) -> (Clue, CoveredSet) {
        let mut flagged = 0u8;
        let mut covered = CoveredSet::new();
        for pos in self.cells.iter_neighbors(coords) {
            match self.cells[pos.to_nd_index()] {
                CellState::FlaggedMine => flagged += 1,
                CellState::Covered => covered.push(pos),
                CellState::QueuedSafe | CellState::Revealed(_) => {}
            }
        }

        let CellState::Revealed(clue) = &mut self.cells[coords.to_nd_index()] else {
            debug_assert!(false, "evaluate requires a revealed cell");
            return (Clue::new(0), covered);
        };
        debug_assert!(
            flagged <= clue.value,
            "more flagged neighbors than the clue allows at {coords:?}"
        );
        clue.effective = clue.value.saturating_sub(flagged);
        clue.covered = covered.len() as u8;
        debug_assert!(
            clue.effective <= clue.covered,
            "effective count exceeds covered neighbors at {coords:?}"
        );
        (*clue, covered)
    }

    /// Marks the clue at `coords` fully explained so later sweeps skip it.
    pub(crate) fn resolve(&mut self, coords: Coord2) {
        if let CellState::Revealed(clue) = &mut self.cells[coords.to_nd_index()] {
            clue.effective = 0;
            clue.covered = 0;
        }
    }

    /// `Covered -> QueuedSafe`; returns whether the transition happened, so a
    /// cell is never queued twice.
    pub(crate) fn queue_safe(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_covered() {
            *cell = CellState::QueuedSafe;
            true
        } else {
            false
        }
    }

    /// `Covered -> FlaggedMine`; terminal for the cell.
    pub(crate) fn flag_mine(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_covered() {
            *cell = CellState::FlaggedMine;
            self.flagged_count += 1;
            true
        } else {
            false
        }
    }

    /// Records that the host uncovered `coords` and reported `value`. Legal
    /// from `Covered` (start cell or heuristic guess) and `QueuedSafe`; a
    /// revealed or flagged cell never regresses.
    pub(crate) fn reveal(&mut self, coords: Coord2, value: u8) {
        let cell = &mut self.cells[coords.to_nd_index()];
        debug_assert!(
            matches!(cell, CellState::Covered | CellState::QueuedSafe),
            "host revealed a cell the agent already settled at {coords:?}"
        );
        *cell = CellState::Revealed(Clue::new(value));
        self.revealed_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_counts_flags_and_covered_neighbors() {
        let mut board = Board::new((3, 3));
        board.reveal((1, 1), 2);
        board.flag_mine((0, 0));

        let (clue, covered) = board.evaluate((1, 1));

        assert_eq!(clue.value, 2);
        assert_eq!(clue.effective, 1);
        assert_eq!(clue.covered, 7);
        assert_eq!(covered.len(), 7);
        assert!(!covered.contains(&(0, 0)));
    }

    #[test]
    fn evaluate_excludes_queued_cells_from_the_covered_set() {
        let mut board = Board::new((3, 3));
        board.reveal((1, 1), 1);
        board.queue_safe((0, 0));
        board.queue_safe((2, 2));

        let (clue, covered) = board.evaluate((1, 1));

        assert_eq!(clue.covered, 6);
        assert!(!covered.contains(&(0, 0)));
        assert!(!covered.contains(&(2, 2)));
    }

    #[test]
    fn queue_safe_is_idempotent_per_cell() {
        let mut board = Board::new((2, 2));
        assert!(board.queue_safe((0, 1)));
        assert!(!board.queue_safe((0, 1)));
    }

    #[test]
    fn flag_mine_only_claims_covered_cells() {
        let mut board = Board::new((2, 2));
        board.queue_safe((1, 0));
        assert!(!board.flag_mine((1, 0)));
        assert!(board.flag_mine((0, 0)));
        assert_eq!(board.flagged_count(), 1);
    }

    #[test]
    fn reveal_bumps_the_revealed_counter() {
        let mut board = Board::new((2, 2));
        board.reveal((0, 0), 0);
        board.queue_safe((1, 1));
        board.reveal((1, 1), 1);
        assert_eq!(board.revealed_count(), 2);
    }

    #[test]
    fn validate_coords_rejects_out_of_range() {
        let board = Board::new((4, 3));
        assert_eq!(board.validate_coords((3, 2)), Ok((3, 2)));
        assert_eq!(board.validate_coords((4, 0)), Err(AgentError::InvalidCoords));
        assert_eq!(board.validate_coords((0, 3)), Err(AgentError::InvalidCoords));
    }
}
