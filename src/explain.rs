//! Natural-language move explanations and tactical theme spotting.

use std::fmt;

use crate::board::attacks;
use crate::board::bitboard::{file_of, popcount, rank_of, square_to_algebraic, BitIter};
use crate::board::position::{Color, Move, PieceType, Position};
use crate::error::ChessError;
use crate::movegen::generate::legal_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TacticalTheme {
    Pin,
    Fork,
}

impl fmt::Display for TacticalTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TacticalTheme::Pin => write!(f, "Pin"),
            TacticalTheme::Fork => write!(f, "Fork"),
        }
    }
}

/// Builds an English sentence describing a move: what moves where, what it
/// captures or promotes to, and whether it checks or mates.
pub fn explain_move(pos: &Position, mv: Move) -> Result<String, ChessError> {
    if mv.is_castling() {
        let mut text = if mv.to() > mv.from() {
            "Castles kingside, bringing the king to safety while activating the rook"
                .to_string()
        } else {
            "Castles queenside, securing the king while bringing the rook toward the center"
                .to_string()
        };
        append_check_note(pos, mv, &mut text);
        return Ok(text);
    }

    let piece = pos.piece_at(mv.from()).ok_or_else(|| {
        ChessError::InternalInvariant(format!(
            "no piece on {} to explain",
            square_to_algebraic(mv.from())
        ))
    })?;

    let mut text = format!(
        "Moves the {} from {} to {}",
        piece.kind.name(),
        square_to_algebraic(mv.from()),
        square_to_algebraic(mv.to()),
    );

    if mv.is_en_passant() {
        text.push_str(", capturing the pawn en passant");
    } else if let Some(captured) = pos.piece_at(mv.to()) {
        let captured_name = match captured.kind {
            PieceType::Queen => "the queen".to_string(),
            other => format!("a {}", other.name()),
        };
        text.push_str(&format!(", capturing {captured_name}"));
    }

    if mv.is_promotion() {
        text.push_str(&format!(
            " and promotes to a {}",
            mv.promotion().piece().name()
        ));
    }

    append_check_note(pos, mv, &mut text);

    if let Some(note) = strategy_note(pos, piece.kind, mv) {
        text.push_str(". ");
        text.push_str(note);
    }

    Ok(text)
}

fn append_check_note(pos: &Position, mv: Move, text: &mut String) {
    let after = pos.make_move(mv);
    if after.is_in_check() {
        if legal_moves(&after).is_empty() {
            text.push_str(". This move delivers checkmate");
        } else {
            text.push_str(". This move gives check");
        }
    }
}

// Phase-flavored remarks in the spirit of an annotator: development and
// center play early, king activity late.
fn strategy_note(pos: &Position, kind: PieceType, mv: Move) -> Option<&'static str> {
    if pos.fullmove_number() <= 10 {
        match kind {
            PieceType::Pawn => {
                let to_file = file_of(mv.to());
                let to_rank = rank_of(mv.to());
                if (3..=4).contains(&to_file) && (3..=4).contains(&to_rank) {
                    return Some("Controls the center");
                }
            }
            PieceType::Knight | PieceType::Bishop => {
                return Some("Develops a piece toward the center");
            }
            _ => {}
        }
    } else if popcount(pos.occupied()) <= 14 && kind == PieceType::King {
        return Some("Activates the king for the endgame");
    }
    None
}

/// Scans the position for tactical motifs. Reports absolute pins against
/// either king and knight forks on major pieces or the king.
pub fn tactical_themes(pos: &Position) -> Vec<TacticalTheme> {
    let mut themes = Vec::new();
    if has_absolute_pin(pos, Color::White) || has_absolute_pin(pos, Color::Black) {
        themes.push(TacticalTheme::Pin);
    }
    if has_knight_fork(pos, Color::White) || has_knight_fork(pos, Color::Black) {
        themes.push(TacticalTheme::Fork);
    }
    themes
}

// A piece of `victim` color sitting alone between its king and an enemy
// slider of the right kind.
fn has_absolute_pin(pos: &Position, victim: Color) -> bool {
    let attacker = !victim;
    let king = pos.king_square(victim);
    let own = pos.color_bitboard(victim);

    let queens = pos.piece_bitboard(PieceType::Queen, attacker);
    let diagonal_sliders = pos.piece_bitboard(PieceType::Bishop, attacker) | queens;
    let straight_sliders = pos.piece_bitboard(PieceType::Rook, attacker) | queens;

    for slider in BitIter(diagonal_sliders) {
        if diagonal_line(slider, king) && pinned_between(pos, slider, king, own) {
            return true;
        }
    }
    for slider in BitIter(straight_sliders) {
        if straight_line(slider, king) && pinned_between(pos, slider, king, own) {
            return true;
        }
    }
    false
}

fn diagonal_line(a: u8, b: u8) -> bool {
    let rank_diff = (rank_of(a) as i8 - rank_of(b) as i8).abs();
    let file_diff = (file_of(a) as i8 - file_of(b) as i8).abs();
    rank_diff == file_diff && rank_diff > 0
}

fn straight_line(a: u8, b: u8) -> bool {
    (rank_of(a) == rank_of(b)) != (file_of(a) == file_of(b))
}

fn pinned_between(pos: &Position, slider: u8, king: u8, own: u64) -> bool {
    let between = attacks::ray_between(slider, king);
    if between == 0 {
        return false;
    }
    let blockers = between & pos.occupied();
    popcount(blockers) == 1 && blockers & own != 0
}

fn has_knight_fork(pos: &Position, attacker: Color) -> bool {
    let defender = !attacker;
    let valuable = pos.piece_bitboard(PieceType::Rook, defender)
        | pos.piece_bitboard(PieceType::Queen, defender)
        | pos.piece_bitboard(PieceType::King, defender);

    BitIter(pos.piece_bitboard(PieceType::Knight, attacker))
        .any(|knight| popcount(attacks::knight_attacks(knight) & valuable) >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::bitboard::algebraic_to_square;
    use crate::board::position::MoveKind;

    fn sq(name: &str) -> u8 {
        algebraic_to_square(name).unwrap()
    }

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn explains_a_developing_move() {
        let p = Position::startpos();
        let text = explain_move(&p, Move::new(sq("g1"), sq("f3"))).unwrap();
        assert!(text.contains("knight"));
        assert!(text.contains("g1"));
        assert!(text.contains("f3"));
        assert!(text.contains("Develops a piece"));
    }

    #[test]
    fn explains_center_pawn_push() {
        let p = Position::startpos();
        let text = explain_move(&p, Move::new(sq("e2"), sq("e4"))).unwrap();
        assert!(text.contains("Controls the center"));
    }

    #[test]
    fn explains_captures_and_checks() {
        let p = pos("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2");
        let text = explain_move(&p, Move::new(sq("e4"), sq("d5"))).unwrap();
        assert!(text.contains("capturing a pawn"), "{text}");

        // Fool's mate: 1.f3 e5 2.g4 and the queen ends it.
        let doomed = pos("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2");
        let mate = explain_move(&doomed, Move::new(sq("d8"), sq("h4"))).unwrap();
        assert!(mate.contains("delivers checkmate"), "{mate}");
    }

    #[test]
    fn explains_castling_and_promotion() {
        let p = pos("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1");
        let text =
            explain_move(&p, Move::with_kind(sq("e1"), sq("g1"), MoveKind::Castling)).unwrap();
        assert!(text.starts_with("Castles kingside"));

        let p = pos("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let text = explain_move(
            &p,
            Move::promotion_move(sq("a7"), sq("a8"), crate::board::position::Promotion::Queen),
        )
        .unwrap();
        assert!(text.contains("promotes to a queen"));
        assert!(text.contains("gives check"));
    }

    #[test]
    fn detects_an_absolute_pin() {
        // The e4 knight is pinned to the e1 king by the e8 rook.
        let p = pos("4r1k1/8/8/8/4N3/8/8/4K3 w - - 0 1");
        assert!(tactical_themes(&p).contains(&TacticalTheme::Pin));

        let unpinned = pos("6k1/8/8/8/4N3/8/8/4K3 w - - 0 1");
        assert!(!tactical_themes(&unpinned).contains(&TacticalTheme::Pin));
    }

    #[test]
    fn detects_a_knight_fork() {
        // A knight on c7 hits both the a8 rook and the e8 king.
        let forking = pos("r3k3/2N5/8/8/8/8/8/4K3 b - - 0 1");
        assert!(tactical_themes(&forking).contains(&TacticalTheme::Fork));

        // The same knight back on c3 attacks neither.
        let quiet = pos("r3k3/8/8/8/8/2N5/8/4K3 b - - 0 1");
        assert!(!tactical_themes(&quiet).contains(&TacticalTheme::Fork));
    }
}
