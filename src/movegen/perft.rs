//! Perft node counting, the canonical move-generation correctness gate.

use super::generate::legal_moves;
use crate::board::position::Position;

/// Counts the leaf nodes of the full legal move tree at `depth`.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(pos);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|&mv| perft(&pos.make_move(mv), depth - 1))
        .sum()
}

/// Per-root-move node counts, handy when chasing a perft mismatch.
pub fn perft_divide(pos: &Position, depth: u32) -> Vec<(crate::board::position::Move, u64)> {
    legal_moves(pos)
        .into_iter()
        .map(|mv| {
            let nodes = if depth <= 1 {
                1
            } else {
                perft(&pos.make_move(mv), depth - 1)
            };
            (mv, nodes)
        })
        .collect()
}
