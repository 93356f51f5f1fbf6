use alloc::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::solver::{deduce, frontier, subset};
use crate::*;

/// The agent's answer for one decision cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Request the host to uncover this cell next.
    Uncover(Coord2),
    /// Either every safe cell is revealed or no further move exists.
    Stop,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentState {
    AwaitingClue,
    Done,
}

impl AgentState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Turn-based decision agent: one call to [`next_move`](Self::next_move) per
/// revealed clue, one full deduction cycle per call.
///
/// The host uncovers the agreed start cell first and reports its clue; from
/// then on the agent alternates deduction with a single dequeued uncover
/// request until the board is solved or it has to give up. Deduced-safe cells
/// are issued in FIFO discovery order. The agent never requests a cell it has
/// flagged as a mine; an `Uncover` produced by the frontier fallback is an
/// explicit guess and carries no such promise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepAgent {
    board: Board,
    safe_queue: VecDeque<Coord2>,
    total_mines: CellCount,
    cursor: Coord2,
    state: AgentState,
}

impl SweepAgent {
    /// `start` is the first cell the host uncovers; the host guarantees it is
    /// safe.
    pub fn new(config: GameConfig, start: Coord2) -> Result<Self> {
        let board = Board::new(config.size);
        board.validate_coords(start)?;
        if config.mines >= config.total_cells() {
            return Err(AgentError::TooManyMines);
        }
        Ok(Self {
            board,
            safe_queue: VecDeque::new(),
            total_mines: config.mines,
            cursor: start,
            state: AgentState::AwaitingClue,
        })
    }

    /// Runs one decision cycle: ingests `clue` for the most recently requested
    /// cell, drives every deduction rule to quiescence, and either dequeues
    /// the next cell to uncover or signals completion.
    ///
    /// Rule order is fixed: basic counting sweep to its fixed point, then the
    /// subset pass over the whole grid, then the frontier fallback only if
    /// nothing got queued. A mine hit on the host side has no representation
    /// here; feeding a clue for a mined cell is an upstream contract breach.
    pub fn next_move(&mut self, clue: u8) -> Result<Move> {
        if self.state.is_finished() {
            return Err(AgentError::AlreadyEnded);
        }
        if clue > 8 {
            return Err(AgentError::InvalidClue(clue));
        }

        self.board.reveal(self.cursor, clue);
        deduce::sweep(&mut self.board, &mut self.safe_queue, self.cursor);
        subset::sweep(&mut self.board, &mut self.safe_queue);

        if self.safe_queue.is_empty() {
            // No certainty anywhere; probe the least suspicious covered cell.
            if let Some(guess) = frontier::pick(&self.board) {
                self.safe_queue.push_back(guess);
            }
        }

        if self.board.revealed_count() == self.safe_cells() {
            self.state = AgentState::Done;
            return Ok(Move::Stop);
        }

        match self.safe_queue.pop_front() {
            Some(next) => {
                self.cursor = next;
                Ok(Move::Uncover(next))
            }
            None => {
                self.state = AgentState::Done;
                Ok(Move::Stop)
            }
        }
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    /// The cell whose clue the agent expects next.
    pub fn cursor(&self) -> Coord2 {
        self.cursor
    }

    /// Read access to the belief state, mainly for inspection and tests.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Advisory count of mines not yet pinned down; never trusted for
    /// deductions, but never negative when the host reports true clues.
    pub fn mines_left(&self) -> isize {
        self.total_mines as isize - self.board.flagged_count() as isize
    }

    fn safe_cells(&self) -> CellCount {
        let size = self.board.size();
        mult(size.0, size.1) - self.total_mines
    }
}
