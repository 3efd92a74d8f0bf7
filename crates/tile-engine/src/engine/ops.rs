use log::trace;

use super::state::{Board, Direction, MoveRecord, Pos};

/// Slide/merge every tile on `board` toward `direction`. No randomness.
///
/// Tiles are visited in the direction's scan order (row-major for up/left,
/// reversed for down/right) so each tile's chain runs against an already
/// settled line. A destination that absorbed a merge during this call is
/// never merged into again, so `[2, 2, 2, 2]` left becomes `[4, 4, _, _]`.
///
/// Returns one record per tile whose final position differs from its start,
/// in scan order. An empty list means the board is unchanged.
pub fn slide(board: &mut Board, direction: Direction) -> Vec<MoveRecord> {
    let n = board.cell_count();
    let mut merged = vec![false; n];
    let mut moves = Vec::new();

    for step in 0..n {
        let idx = if direction.scans_reversed() { n - 1 - step } else { step };
        let Some(value) = board.cells[idx] else { continue };
        let from = board.pos_of(idx);
        let to = run_chain(board, &mut merged, from, value, direction);
        if to != from {
            moves.push(MoveRecord { from, to, value: 0 });
        }
    }

    // Records report what the destination holds after the whole action.
    for record in &mut moves {
        record.value = board.cells[board.index(record.to)].unwrap_or_default();
    }
    if !moves.is_empty() {
        trace!("slide {direction}: {} tile(s) displaced", moves.len());
    }
    moves
}

/// Move a single tile as far as it goes; returns where it came to rest.
fn run_chain(
    board: &mut Board,
    merged: &mut [bool],
    start: Pos,
    value: u32,
    direction: Direction,
) -> Pos {
    let mut pos = start;
    while let Some(next) = board.neighbor(pos, direction) {
        let here = board.index(pos);
        let there = board.index(next);
        match board.cells[there] {
            None => {
                board.cells[there] = Some(value);
                board.cells[here] = None;
                pos = next;
            }
            Some(other) if other == value && !merged[there] => {
                board.cells[there] = Some(value * 2);
                board.cells[here] = None;
                merged[there] = true;
                return next;
            }
            Some(_) => break,
        }
    }
    pos
}

/// True if sliding toward `direction` would displace at least one tile.
pub fn can_slide(board: &Board, direction: Direction) -> bool {
    for tile in board.occupied_cells() {
        if let Some(next) = board.neighbor(tile.pos, direction) {
            match board.cells[board.index(next)] {
                None => return true,
                Some(v) if v == tile.value => return true,
                Some(_) => {}
            }
        }
    }
    false
}

/// True if any direction can still displace a tile.
pub fn has_legal_move(board: &Board) -> bool {
    Direction::ALL.iter().any(|&d| can_slide(board, d))
}
