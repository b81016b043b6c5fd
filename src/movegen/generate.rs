use crate::board::attacks;
use crate::board::bitboard::{
    rank_of, square_bb, BitIter, Bitboard, Square, B1, B8, C1, C8, D1, D8, E1, E8, F1, F8, G1, G8,
};
use crate::board::position::{
    Color, Move, MoveKind, PieceType, Position, Promotion, CASTLE_BK, CASTLE_BQ, CASTLE_WK,
    CASTLE_WQ,
};

/// Every move that obeys piece-movement shape rules; the mover's king may be
/// left in check.
pub fn pseudo_legal_moves(pos: &Position) -> Vec<Move> {
    let mut moves = Vec::with_capacity(256);
    pawn_moves(pos, &mut moves);
    knight_moves(pos, &mut moves);
    bishop_moves(pos, &mut moves);
    rook_moves(pos, &mut moves);
    queen_moves(pos, &mut moves);
    king_moves(pos, &mut moves);
    castling_moves(pos, &mut moves);
    moves
}

pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let us = pos.side_to_move();
    pseudo_legal_moves(pos)
        .into_iter()
        .filter(|&mv| !pos.make_move(mv).in_check(us))
        .collect()
}

pub fn captures(pos: &Position) -> Vec<Move> {
    pseudo_legal_moves(pos)
        .into_iter()
        .filter(|&mv| pos.is_capture(mv))
        .collect()
}

pub fn quiet_moves(pos: &Position) -> Vec<Move> {
    pseudo_legal_moves(pos)
        .into_iter()
        .filter(|&mv| !pos.is_capture(mv))
        .collect()
}

/// Tests self-check only: the move is applied and the mover's king examined.
/// Shape reachability is not verified; callers needing that must check
/// membership in `legal_moves`.
pub fn is_legal(pos: &Position, mv: Move) -> bool {
    !pos.make_move(mv).in_check(pos.side_to_move())
}

fn pawn_moves(pos: &Position, moves: &mut Vec<Move>) {
    let us = pos.side_to_move();
    let pawns = pos.piece_bitboard(PieceType::Pawn, us);
    if pawns == 0 {
        return;
    }

    let occupied = pos.occupied();
    let enemy = pos.color_bitboard(!us);
    let (push, home_rank, seventh_rank) = match us {
        Color::White => (8i8, 1u8, 6u8),
        Color::Black => (-8i8, 6u8, 1u8),
    };

    for from in BitIter(pawns) {
        let promoting = rank_of(from) == seventh_rank;

        let ahead = (from as i8 + push) as Square;
        if occupied & square_bb(ahead) == 0 {
            if promoting {
                push_promotions(moves, from, ahead);
            } else {
                moves.push(Move::new(from, ahead));
                if rank_of(from) == home_rank {
                    let two_ahead = (ahead as i8 + push) as Square;
                    if occupied & square_bb(two_ahead) == 0 {
                        moves.push(Move::new(from, two_ahead));
                    }
                }
            }
        }

        let diagonals = attacks::pawn_attacks(us, from);
        for to in BitIter(diagonals & enemy) {
            if promoting {
                push_promotions(moves, from, to);
            } else {
                moves.push(Move::new(from, to));
            }
        }

        if let Some(ep) = pos.en_passant_square() {
            if diagonals & square_bb(ep) != 0 {
                moves.push(Move::with_kind(from, ep, MoveKind::EnPassant));
            }
        }
    }
}

#[inline(always)]
fn push_promotions(moves: &mut Vec<Move>, from: Square, to: Square) {
    for promotion in Promotion::ALL {
        moves.push(Move::promotion_move(from, to, promotion));
    }
}

fn knight_moves(pos: &Position, moves: &mut Vec<Move>) {
    let us = pos.side_to_move();
    let own = pos.color_bitboard(us);
    for from in BitIter(pos.piece_bitboard(PieceType::Knight, us)) {
        push_targets(moves, from, attacks::knight_attacks(from) & !own);
    }
}

fn bishop_moves(pos: &Position, moves: &mut Vec<Move>) {
    let us = pos.side_to_move();
    let own = pos.color_bitboard(us);
    let occupied = pos.occupied();
    for from in BitIter(pos.piece_bitboard(PieceType::Bishop, us)) {
        push_targets(moves, from, attacks::bishop_attacks(from, occupied) & !own);
    }
}

fn rook_moves(pos: &Position, moves: &mut Vec<Move>) {
    let us = pos.side_to_move();
    let own = pos.color_bitboard(us);
    let occupied = pos.occupied();
    for from in BitIter(pos.piece_bitboard(PieceType::Rook, us)) {
        push_targets(moves, from, attacks::rook_attacks(from, occupied) & !own);
    }
}

fn queen_moves(pos: &Position, moves: &mut Vec<Move>) {
    let us = pos.side_to_move();
    let own = pos.color_bitboard(us);
    let occupied = pos.occupied();
    for from in BitIter(pos.piece_bitboard(PieceType::Queen, us)) {
        push_targets(moves, from, attacks::queen_attacks(from, occupied) & !own);
    }
}

fn king_moves(pos: &Position, moves: &mut Vec<Move>) {
    let us = pos.side_to_move();
    let own = pos.color_bitboard(us);
    let from = pos.king_square(us);
    push_targets(moves, from, attacks::king_attacks(from) & !own);
}

#[inline(always)]
fn push_targets(moves: &mut Vec<Move>, from: Square, targets: Bitboard) {
    for to in BitIter(targets) {
        moves.push(Move::new(from, to));
    }
}

fn castling_moves(pos: &Position, moves: &mut Vec<Move>) {
    if pos.is_in_check() {
        return;
    }

    let us = pos.side_to_move();
    let them = !us;
    let occupied = pos.occupied();
    let rights = pos.castling_rights();

    let (kingside_right, queenside_right, king_from) = match us {
        Color::White => (CASTLE_WK, CASTLE_WQ, E1),
        Color::Black => (CASTLE_BK, CASTLE_BQ, E8),
    };
    let (f_sq, g_sq, d_sq, c_sq, b_sq) = match us {
        Color::White => (F1, G1, D1, C1, B1),
        Color::Black => (F8, G8, D8, C8, B8),
    };

    if rights & kingside_right != 0
        && occupied & (square_bb(f_sq) | square_bb(g_sq)) == 0
        && !pos.is_square_attacked(f_sq, them)
        && !pos.is_square_attacked(g_sq, them)
    {
        moves.push(Move::with_kind(king_from, g_sq, MoveKind::Castling));
    }

    // The b-file square must be empty but may be attacked.
    if rights & queenside_right != 0
        && occupied & (square_bb(d_sq) | square_bb(c_sq) | square_bb(b_sq)) == 0
        && !pos.is_square_attacked(d_sq, them)
        && !pos.is_square_attacked(c_sq, them)
    {
        moves.push(Move::with_kind(king_from, c_sq, MoveKind::Castling));
    }
}
