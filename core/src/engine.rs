use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostState {
    Active,
    Won,
    Lost,
}

impl HostState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What the host reports back for a single uncover request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// The cell was safe; here is its clue.
    Clue(u8),
    /// The cell was safe and it was the last one; the game is won.
    Won(u8),
    /// The cell held a mine; the game is lost.
    HitMine,
}

/// Minimal turn-based host: it knows the true mine placement, uncovers exactly
/// one cell per request, and reports the clue. No flood fill, no chording, no
/// flags — the agent drives every single uncover itself.
///
/// This is the test and demo collaborator; the decision core never touches it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HostGame {
    layout: MineLayout,
    uncovered: Array2<bool>,
    uncovered_count: CellCount,
    state: HostState,
}

impl HostGame {
    pub fn new(layout: MineLayout) -> Self {
        let size = layout.size();
        Self {
            layout,
            uncovered: Array2::default(size.to_nd_index()),
            uncovered_count: 0,
            state: HostState::Active,
        }
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    pub fn uncovered_count(&self) -> CellCount {
        self.uncovered_count
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }

    /// Uncovers one cell and reports what happened. Requests after the game
    /// ended, or for an already uncovered cell, are caller errors.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.layout.validate_coords(coords)?;
        if self.state.is_finished() {
            return Err(AgentError::AlreadyEnded);
        }

        if self.layout.contains_mine(coords) {
            self.state = HostState::Lost;
            return Ok(RevealOutcome::HitMine);
        }

        debug_assert!(
            !self.uncovered[coords.to_nd_index()],
            "cell uncovered twice at {coords:?}"
        );
        self.uncovered[coords.to_nd_index()] = true;
        self.uncovered_count += 1;

        let clue = self.layout.adjacent_mine_count(coords);
        if self.uncovered_count == self.layout.safe_cell_count() {
            self.state = HostState::Won;
            Ok(RevealOutcome::Won(clue))
        } else {
            Ok(RevealOutcome::Clue(clue))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Coord2, mines: &[Coord2]) -> HostGame {
        HostGame::new(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn revealing_a_mine_loses() {
        let mut host = game((2, 2), &[(0, 0)]);
        assert_eq!(host.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);
        assert_eq!(host.state(), HostState::Lost);
    }

    #[test]
    fn revealing_the_last_safe_cell_wins() {
        let mut host = game((2, 1), &[(0, 0)]);
        assert_eq!(host.reveal((1, 0)).unwrap(), RevealOutcome::Won(1));
        assert_eq!(host.state(), HostState::Won);
    }

    #[test]
    fn clues_count_adjacent_mines_only() {
        let mut host = game((3, 3), &[(0, 0), (2, 0)]);
        assert_eq!(host.reveal((1, 1)).unwrap(), RevealOutcome::Clue(2));
        assert_eq!(host.reveal((1, 2)).unwrap(), RevealOutcome::Clue(0));
    }

    #[test]
    fn finished_games_reject_further_requests() {
        let mut host = game((2, 1), &[(0, 0)]);
        host.reveal((1, 0)).unwrap();
        assert_eq!(host.reveal((1, 0)), Err(AgentError::AlreadyEnded));
    }

    #[test]
    fn out_of_bounds_requests_are_rejected() {
        let mut host = game((2, 2), &[(0, 0)]);
        assert_eq!(host.reveal((2, 0)), Err(AgentError::InvalidCoords));
    }
}
