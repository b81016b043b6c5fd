use crate::board::bitboard::{algebraic_to_square, square_to_algebraic, E1, E8};
use crate::board::position::{Move, MoveKind, PieceType, Position, Promotion};
use crate::error::ChessError;

/// Lowercase coordinate form, `e2e4`; a promotion letter is appended for
/// promotions and the null move prints as `0000`.
pub fn move_to_uci(mv: Move) -> String {
    if mv.is_null() {
        return "0000".to_string();
    }
    let mut uci = square_to_algebraic(mv.from());
    uci.push_str(&square_to_algebraic(mv.to()));
    if mv.is_promotion() {
        uci.push(mv.promotion().letter());
    }
    uci
}

/// Parses a 4- or 5-character UCI move without position context.
///
/// A king-style two-square step from e1 or e8 is flagged as castling.
/// En passant cannot be recognized here and comes out as a normal move;
/// [`resolve_uci`] upgrades it once a position is available.
pub fn move_from_uci(uci: &str) -> Result<Move, ChessError> {
    if !uci.is_ascii() || uci.len() < 4 || uci.len() > 5 {
        return Err(ChessError::InvalidUci(uci.to_string()));
    }

    let from = algebraic_to_square(&uci[0..2])
        .ok_or_else(|| ChessError::InvalidUci(uci.to_string()))?;
    let to = algebraic_to_square(&uci[2..4])
        .ok_or_else(|| ChessError::InvalidUci(uci.to_string()))?;

    if uci.len() == 5 {
        let promotion = uci
            .chars()
            .nth(4)
            .and_then(Promotion::from_char)
            .ok_or_else(|| ChessError::InvalidUci(uci.to_string()))?;
        return Ok(Move::promotion_move(from, to, promotion));
    }

    if (from == E1 || from == E8) && (to == from + 2 || to + 2 == from) {
        return Ok(Move::with_kind(from, to, MoveKind::Castling));
    }

    Ok(Move::new(from, to))
}

/// Parses a UCI move and fixes up the kind against `pos`: a pawn landing on
/// the en-passant square becomes an en-passant capture, and a two-square
/// e-file move by anything other than a king loses the castling flag.
pub fn resolve_uci(pos: &Position, uci: &str) -> Result<Move, ChessError> {
    let mv = move_from_uci(uci)?;
    if mv.is_null() {
        return Ok(mv);
    }

    let piece = pos.piece_at(mv.from());
    let kind = piece.map(|p| p.kind);

    if mv.is_castling() && kind != Some(PieceType::King) {
        return Ok(Move::new(mv.from(), mv.to()));
    }

    if mv.kind() == MoveKind::Normal
        && kind == Some(PieceType::Pawn)
        && pos.en_passant_square() == Some(mv.to())
    {
        return Ok(Move::with_kind(mv.from(), mv.to(), MoveKind::EnPassant));
    }

    Ok(mv)
}
