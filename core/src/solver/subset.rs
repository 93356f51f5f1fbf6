use alloc::collections::VecDeque;

use smallvec::SmallVec;

use crate::board::CoveredSet;
use crate::solver::deduce;
use crate::{Board, Coord2};

/// Constraint subtraction between overlapping clue regions.
///
/// For adjacent revealed cells A and B where B's covered set is contained in
/// A's, the cells exclusive to A carry exactly `effective(A) - effective(B)`
/// mines. That difference is decisive in the two boundary cases: zero means
/// every exclusive cell is safe, and a difference equal to the exclusive
/// count means every exclusive cell is a mine.
///
/// The pass runs over the whole grid each decision cycle rather than
/// incrementally: any transition elsewhere changes covered-set membership and
/// silently invalidates previously observed subset relations.
pub(crate) fn sweep(board: &mut Board, safe_queue: &mut VecDeque<Coord2>) {
    for a in board.iter_coords() {
        if board.clue_at(a).is_none() {
            continue;
        }
        let (mut clue_a, mut set_a) = board.evaluate(a);

        let neighbors: SmallVec<[Coord2; 8]> = board.iter_neighbors(a).collect();
        for b in neighbors {
            if set_a.is_empty() {
                break;
            }
            if board.clue_at(b).is_none() {
                continue;
            }
            let (clue_b, set_b) = board.evaluate(b);
            if !is_subset(&set_b, &set_a) {
                continue;
            }

            let value_diff = i32::from(clue_a.effective) - i32::from(clue_b.effective);
            let size_diff = (set_a.len() - set_b.len()) as i32;
            let exclusive = set_a.iter().filter(|pos| !set_b.contains(pos));

            let mut changed: SmallVec<[Coord2; 8]> = SmallVec::new();
            if value_diff == 0 {
                for &pos in exclusive {
                    if board.queue_safe(pos) {
                        safe_queue.push_back(pos);
                        changed.push(pos);
                    }
                }
            } else if value_diff == size_diff {
                for &pos in exclusive {
                    if board.flag_mine(pos) {
                        changed.push(pos);
                    }
                }
            }

            if !changed.is_empty() {
                deduce::cascade_from(board, safe_queue, changed);
                // A's constraint just moved; refresh it before the next pair.
                (clue_a, set_a) = board.evaluate(a);
            }
        }
    }
}

fn is_subset(inner: &CoveredSet, outer: &CoveredSet) -> bool {
    inner.len() <= outer.len() && inner.iter().all(|pos| outer.contains(pos))
}
