use crate::{Board, Coord2};

/// Best-effort guess when deduction came up empty: rank every covered cell by
/// how many still-active clues border it and take the least-constrained one.
///
/// The score is a coarse proxy for mine likelihood, not a probability — a
/// cell bordering no active clue is the least suspicious probe. Ties break to
/// the first cell found in row-major scan order, which keeps the fallback
/// fully deterministic. Returns `None` only when no covered cell remains.
pub(crate) fn pick(board: &Board) -> Option<Coord2> {
    let mut best: Option<(u8, Coord2)> = None;
    for coords in board.iter_coords() {
        if !board.state(coords).is_covered() {
            continue;
        }
        let score = board
            .iter_neighbors(coords)
            .filter(|&pos| board.clue_at(pos).is_some_and(|clue| clue.effective > 0))
            .count() as u8;
        if best.is_none_or(|(low, _)| score < low) {
            best = Some((score, coords));
        }
    }
    best.map(|(_, coords)| coords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_prefers_the_first_cell_in_scan_order() {
        let board = Board::new((3, 3));
        assert_eq!(pick(&board), Some((0, 0)));
    }

    #[test]
    fn fully_settled_board_yields_nothing() {
        let mut board = Board::new((2, 1));
        board.reveal((0, 0), 0);
        board.queue_safe((1, 0));
        assert_eq!(pick(&board), None);
    }

    #[test]
    fn cells_bordering_active_clues_are_avoided() {
        // A lone 1-clue at the west edge: its three covered neighbors score 1
        // while the far column scores 0, so the probe lands at the top of the
        // far column.
        let mut board = Board::new((3, 3));
        board.reveal((0, 1), 1);
        board.evaluate((0, 1));

        assert_eq!(pick(&board), Some((2, 0)));
    }

    #[test]
    fn ties_break_to_the_lowest_scan_position() {
        // Both ends of the strip score zero; the first one in scan order wins.
        let mut board = Board::new((5, 1));
        board.reveal((2, 0), 2);
        board.evaluate((2, 0));

        assert_eq!(pick(&board), Some((0, 0)));
    }
}
