use crate::board::position::{Move, Position};
use crate::eval::evaluate::evaluate;
use crate::movegen::generate::legal_moves;

/// Mate scores are anchored here; it exceeds any reachable static
/// evaluation.
pub const MATE_VALUE: i32 = 20_000;

const INFINITY: i32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
}

/// Fixed-depth negamax with alpha-beta pruning. Returns the null move only
/// when the position has no legal moves; callers separate checkmate from
/// stalemate with `is_in_check`.
pub fn find_best_move(pos: &Position, depth: u32) -> SearchResult {
    negamax(pos, depth.max(1), 0, -INFINITY, INFINITY)
}

fn negamax(pos: &Position, depth: u32, ply: i32, mut alpha: i32, beta: i32) -> SearchResult {
    if depth == 0 {
        return SearchResult {
            best_move: Move::NULL,
            score: evaluate(pos),
        };
    }

    let mut moves = legal_moves(pos);
    if moves.is_empty() {
        // Mate scores shrink with the distance from the root, so a faster
        // mate always outranks a slower one.
        let score = if pos.is_in_check() {
            -(MATE_VALUE - ply)
        } else {
            0
        };
        return SearchResult {
            best_move: Move::NULL,
            score,
        };
    }

    order_moves(pos, &mut moves);

    let mut best = SearchResult {
        best_move: moves[0],
        score: -INFINITY,
    };

    for mv in moves {
        let child = pos.make_move(mv);
        let score = -negamax(&child, depth - 1, ply + 1, -beta, -alpha).score;

        if score > best.score {
            best = SearchResult {
                best_move: mv,
                score,
            };
        }

        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }

    best
}

// Captures first; the sort is stable so equals keep generation order.
fn order_moves(pos: &Position, moves: &mut [Move]) {
    moves.sort_by_key(|&mv| !pos.is_capture(mv));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::bitboard::algebraic_to_square;
    use crate::notation::uci::move_to_uci;

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    // Unpruned negamax, for cross-checking the alpha-beta result.
    fn plain_negamax(pos: &Position, depth: u32, ply: i32) -> SearchResult {
        if depth == 0 {
            return SearchResult {
                best_move: Move::NULL,
                score: evaluate(pos),
            };
        }
        let mut moves = legal_moves(pos);
        if moves.is_empty() {
            let score = if pos.is_in_check() {
                -(MATE_VALUE - ply)
            } else {
                0
            };
            return SearchResult {
                best_move: Move::NULL,
                score,
            };
        }
        order_moves(pos, &mut moves);
        let mut best = SearchResult {
            best_move: moves[0],
            score: -INFINITY,
        };
        for mv in moves {
            let score = -plain_negamax(&pos.make_move(mv), depth - 1, ply + 1).score;
            if score > best.score {
                best = SearchResult {
                    best_move: mv,
                    score,
                };
            }
        }
        best
    }

    #[test]
    fn finds_mate_in_one() {
        // Back-rank mate: Re8#.
        let p = pos("6k1/5ppp/8/8/8/8/8/4R1K1 w - - 0 1");
        let result = find_best_move(&p, 3);
        assert_eq!(move_to_uci(result.best_move), "e1e8");
        assert_eq!(result.score, MATE_VALUE - 1);
    }

    #[test]
    fn prefers_the_faster_mate() {
        // The immediate Re8# must win out over mates the deeper search also
        // sees.
        let p = pos("6k1/5ppp/8/8/8/8/8/4RRK1 w - - 0 1");
        let result = find_best_move(&p, 4);
        assert_eq!(move_to_uci(result.best_move), "e1e8");
        assert_eq!(result.score, MATE_VALUE - 1);
    }

    #[test]
    fn grabs_a_hanging_queen() {
        let p = pos("4k3/8/8/3q4/4N3/8/8/4K3 w - - 0 1");
        let result = find_best_move(&p, 2);
        assert_eq!(
            result.best_move,
            Move::new(
                algebraic_to_square("e4").unwrap(),
                algebraic_to_square("d5").unwrap()
            )
        );
    }

    #[test]
    fn stalemate_returns_null_with_zero_score() {
        // Black to move has no moves and is not in check.
        let p = pos("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        let result = find_best_move(&p, 3);
        assert!(result.best_move.is_null());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn checkmated_side_reports_mate_score() {
        // White is already mated on the back rank.
        let p = pos("6k1/8/8/8/8/8/5PPP/4r1K1 w - - 0 1");
        let result = find_best_move(&p, 3);
        assert!(result.best_move.is_null());
        assert_eq!(result.score, -MATE_VALUE);
    }

    #[test]
    fn pruning_preserves_the_principal_move() {
        let fens = [
            "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
            "4k3/8/8/3q4/4N3/8/8/4K3 w - - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ];
        for fen in fens {
            let p = pos(fen);
            for depth in 1..=3 {
                let pruned = find_best_move(&p, depth);
                let plain = plain_negamax(&p, depth, 0);
                assert_eq!(pruned.score, plain.score, "{fen} at depth {depth}");
                assert_eq!(
                    pruned.best_move, plain.best_move,
                    "{fen} at depth {depth}"
                );
            }
        }
    }

    #[test]
    fn depth_zero_is_clamped_to_one() {
        let p = pos("4k3/8/8/3q4/4N3/8/8/4K3 w - - 0 1");
        assert!(!find_best_move(&p, 0).best_move.is_null());
    }

    #[test]
    fn capture_first_ordering_is_stable() {
        let p = pos("4k3/8/8/3q4/4N3/8/8/4K3 w - - 0 1");
        let mut moves = legal_moves(&p);
        let original = moves.clone();
        order_moves(&p, &mut moves);
        assert!(p.is_capture(moves[0]));
        let quiets_in_order: Vec<_> = original
            .iter()
            .filter(|&&mv| !p.is_capture(mv))
            .collect();
        let quiets_after_sort: Vec<_> =
            moves.iter().filter(|&&mv| !p.is_capture(mv)).collect();
        assert_eq!(quiets_in_order, quiets_after_sort);
    }
}
