use alloc::collections::{BTreeSet, VecDeque};

use smallvec::SmallVec;

use crate::{Board, Coord2};

/// Pending re-evaluations, deduplicated so a coordinate sits in the queue at
/// most once at a time. Bounded recursion depth is not a concern here: the
/// cascade is an explicit FIFO, not call-stack recursion.
pub(crate) struct Worklist {
    queue: VecDeque<Coord2>,
    pending: BTreeSet<Coord2>,
}

impl Worklist {
    pub(crate) fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            pending: BTreeSet::new(),
        }
    }

    pub(crate) fn push(&mut self, coords: Coord2) {
        if self.pending.insert(coords) {
            self.queue.push_back(coords);
        }
    }

    fn pop(&mut self) -> Option<Coord2> {
        let coords = self.queue.pop_front()?;
        self.pending.remove(&coords);
        Some(coords)
    }
}

/// Sweeps the basic counting rule over every still-active clue until no cell
/// transitions any more.
///
/// The worklist is seeded with `first` (the clue just ingested) followed by
/// every other active clue in scan order. Each transition re-enqueues the
/// revealed neighbors of the cell that changed, so a flag placed on one side
/// of the board can satisfy a clue on the other side within the same sweep.
/// Termination: cells only ever leave `Covered`, so transitions are finite
/// and the queue drains.
pub(crate) fn sweep(board: &mut Board, safe_queue: &mut VecDeque<Coord2>, first: Coord2) {
    let mut work = Worklist::new();
    work.push(first);
    for coords in board.iter_coords() {
        if board.clue_at(coords).is_some_and(|clue| !clue.is_resolved()) {
            work.push(coords);
        }
    }

    while let Some(coords) = work.pop() {
        if board.clue_at(coords).is_none() {
            continue;
        }
        apply_rule(board, safe_queue, coords, &mut work);
    }
}

/// Restarts the cascade from the revealed neighbors of externally flagged or
/// queued cells (the subset engine's transitions funnel through here).
pub(crate) fn cascade_from<I>(board: &mut Board, safe_queue: &mut VecDeque<Coord2>, changed: I)
where
    I: IntoIterator<Item = Coord2>,
{
    let mut work = Worklist::new();
    for coords in changed {
        push_revealed_neighbors(board, coords, &mut work);
    }
    while let Some(coords) = work.pop() {
        apply_rule(board, safe_queue, coords, &mut work);
    }
}

/// One application of the two trivial certainties to the revealed cell at
/// `coords`: an effective count of zero clears the whole covered set, an
/// effective count equal to the covered set's size flags all of it.
fn apply_rule(
    board: &mut Board,
    safe_queue: &mut VecDeque<Coord2>,
    coords: Coord2,
    work: &mut Worklist,
) {
    let (clue, covered) = board.evaluate(coords);
    if covered.is_empty() {
        return;
    }

    if clue.effective == 0 {
        for &pos in &covered {
            if board.queue_safe(pos) {
                safe_queue.push_back(pos);
                push_revealed_neighbors(board, pos, work);
            }
        }
        board.resolve(coords);
    } else if clue.effective as usize == covered.len() {
        for &pos in &covered {
            if board.flag_mine(pos) {
                push_revealed_neighbors(board, pos, work);
            }
        }
        board.resolve(coords);
    }
}

fn push_revealed_neighbors(board: &Board, center: Coord2, work: &mut Worklist) {
    let neighbors: SmallVec<[Coord2; 8]> = board.iter_neighbors(center).collect();
    for pos in neighbors {
        if board.clue_at(pos).is_some_and(|clue| !clue.is_resolved()) {
            work.push(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellState;

    fn drain(queue: &mut VecDeque<Coord2>) -> alloc::vec::Vec<Coord2> {
        queue.drain(..).collect()
    }

    #[test]
    fn zero_clue_queues_every_covered_neighbor() {
        let mut board = Board::new((3, 3));
        board.reveal((0, 0), 0);
        let mut queue = VecDeque::new();

        sweep(&mut board, &mut queue, (0, 0));

        let queued = drain(&mut queue);
        assert_eq!(queued, [(1, 0), (0, 1), (1, 1)]);
        for coords in queued {
            assert_eq!(board.state(coords), CellState::QueuedSafe);
        }
        assert!(board.clue_at((0, 0)).unwrap().is_resolved());
    }

    #[test]
    fn saturated_clue_flags_its_whole_covered_set() {
        // (0, 0) reveals a 3 in a 2x2 corner: all three neighbors are mines.
        let mut board = Board::new((2, 2));
        board.reveal((0, 0), 3);
        let mut queue = VecDeque::new();

        sweep(&mut board, &mut queue, (0, 0));

        assert!(queue.is_empty());
        assert_eq!(board.state((1, 0)), CellState::FlaggedMine);
        assert_eq!(board.state((0, 1)), CellState::FlaggedMine);
        assert_eq!(board.state((1, 1)), CellState::FlaggedMine);
        assert_eq!(board.flagged_count(), 3);
    }

    #[test]
    fn ambiguous_clue_transitions_nothing() {
        let mut board = Board::new((3, 3));
        board.reveal((1, 1), 1);
        let mut queue = VecDeque::new();

        sweep(&mut board, &mut queue, (1, 1));

        assert!(queue.is_empty());
        assert_eq!(board.flagged_count(), 0);
        assert!(board.clue_at((1, 1)).unwrap().is_active());
    }

    #[test]
    fn flagging_cascades_into_neighboring_clues() {
        // 4x1 strip: the left 1-clue pins its only covered neighbor as a
        // mine, which fully explains the right clue and frees nothing else,
        // so the freshly satisfied clue queues its remaining neighbor safe.
        let mut board = Board::new((4, 1));
        board.reveal((0, 0), 1);
        board.reveal((2, 0), 1);
        let mut queue = VecDeque::new();

        sweep(&mut board, &mut queue, (0, 0));

        assert_eq!(board.state((1, 0)), CellState::FlaggedMine);
        assert_eq!(board.state((3, 0)), CellState::QueuedSafe);
        assert_eq!(drain(&mut queue), [(3, 0)]);
    }

    #[test]
    fn sweep_is_idempotent_at_a_fixed_point() {
        let mut board = Board::new((4, 1));
        board.reveal((0, 0), 1);
        board.reveal((2, 0), 1);
        let mut queue = VecDeque::new();
        sweep(&mut board, &mut queue, (0, 0));
        queue.clear();

        let before = board.clone();
        sweep(&mut board, &mut queue, (0, 0));

        assert_eq!(board, before);
        assert!(queue.is_empty());
    }
}
