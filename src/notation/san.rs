use crate::board::bitboard::{file_of, rank_of, square_to_algebraic, Square};
use crate::board::position::{Move, MoveKind, PieceType, Position, Promotion};
use crate::error::ChessError;
use crate::movegen::generate::legal_moves;

/// Renders a legal move in Standard Algebraic Notation relative to `pos`.
pub fn move_to_san(pos: &Position, mv: Move) -> Result<String, ChessError> {
    let mut san = if mv.is_castling() {
        if mv.to() > mv.from() {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        }
    } else {
        let piece = pos.piece_at(mv.from()).ok_or_else(|| {
            ChessError::InternalInvariant(format!(
                "no piece on {} to render",
                square_to_algebraic(mv.from())
            ))
        })?;

        let mut san = String::new();
        if piece.kind != PieceType::Pawn {
            san.push(piece.kind.san_letter());
            san.push_str(&disambiguation(pos, mv, piece.kind));
        }

        if pos.is_capture(mv) {
            if piece.kind == PieceType::Pawn {
                san.push((b'a' + file_of(mv.from())) as char);
            }
            san.push('x');
        }

        san.push_str(&square_to_algebraic(mv.to()));

        if mv.is_promotion() {
            san.push('=');
            san.push(mv.promotion().piece().san_letter());
        }
        san
    };

    let after = pos.make_move(mv);
    if after.is_in_check() {
        if legal_moves(&after).is_empty() {
            san.push('#');
        } else {
            san.push('+');
        }
    }

    Ok(san)
}

// Minimal origin prefix: nothing if no other same-type piece reaches the
// destination, else file, else rank, else both.
fn disambiguation(pos: &Position, mv: Move, kind: PieceType) -> String {
    let from = mv.from();
    let rivals: Vec<Square> = legal_moves(pos)
        .into_iter()
        .filter(|other| {
            other.to() == mv.to()
                && other.from() != from
                && pos.piece_at(other.from()).map(|p| p.kind) == Some(kind)
        })
        .map(Move::from)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let file_clashes = rivals.iter().any(|&sq| file_of(sq) == file_of(from));
    let rank_clashes = rivals.iter().any(|&sq| rank_of(sq) == rank_of(from));

    let file_char = (b'a' + file_of(from)) as char;
    let rank_char = (b'1' + rank_of(from)) as char;
    if !file_clashes {
        file_char.to_string()
    } else if !rank_clashes {
        rank_char.to_string()
    } else {
        format!("{file_char}{rank_char}")
    }
}

/// Resolves a SAN token against the legal moves of `pos`.
///
/// Exactly one legal move must match the token's shape after disambiguation;
/// zero matches is `IllegalMove` and several is `AmbiguousMove`.
pub fn move_from_san(pos: &Position, san: &str) -> Result<Move, ChessError> {
    let stripped = san.trim_end_matches(['+', '#', '!', '?']);
    if stripped.is_empty() {
        return Err(ChessError::InvalidSan(san.to_string()));
    }

    if matches!(stripped, "O-O" | "0-0" | "O-O-O" | "0-0-0") {
        let queenside = stripped.len() == 5;
        let candidates: Vec<Move> = legal_moves(pos)
            .into_iter()
            .filter(|mv| mv.is_castling() && (mv.to() < mv.from()) == queenside)
            .collect();
        return match candidates.as_slice() {
            [mv] => Ok(*mv),
            [] => Err(ChessError::IllegalMove(san.to_string())),
            _ => Err(ChessError::AmbiguousMove(san.to_string())),
        };
    }

    let mut rest = stripped;

    let promotion = if let Some((head, tail)) = rest.rsplit_once('=') {
        let promo = tail
            .chars()
            .next()
            .filter(|_| tail.len() == 1)
            .and_then(Promotion::from_char)
            .ok_or_else(|| ChessError::InvalidSan(san.to_string()))?;
        rest = head;
        Some(promo)
    } else {
        None
    };

    let is_capture = rest.contains('x');
    let rest = rest.replacen('x', "", 1);

    if rest.len() < 2 {
        return Err(ChessError::InvalidSan(san.to_string()));
    }
    let (rest, dest) = rest.split_at(rest.len() - 2);
    let to = crate::board::bitboard::algebraic_to_square(dest)
        .ok_or_else(|| ChessError::InvalidSan(san.to_string()))?;

    let mut chars = rest.chars().peekable();
    let kind = match chars.peek() {
        Some('N') => PieceType::Knight,
        Some('B') => PieceType::Bishop,
        Some('R') => PieceType::Rook,
        Some('Q') => PieceType::Queen,
        Some('K') => PieceType::King,
        Some(c) if c.is_ascii_uppercase() => {
            return Err(ChessError::InvalidSan(san.to_string()))
        }
        _ => PieceType::Pawn,
    };
    if kind != PieceType::Pawn {
        chars.next();
    }

    let mut from_file: Option<u8> = None;
    let mut from_rank: Option<u8> = None;
    for c in chars {
        match c {
            'a'..='h' => from_file = Some(c as u8 - b'a'),
            '1'..='8' => from_rank = Some(c as u8 - b'1'),
            _ => return Err(ChessError::InvalidSan(san.to_string())),
        }
    }

    let candidates: Vec<Move> = legal_moves(pos)
        .into_iter()
        .filter(|mv| {
            if mv.to() != to || mv.is_castling() {
                return false;
            }
            if pos.piece_at(mv.from()).map(|p| p.kind) != Some(kind) {
                return false;
            }
            if pos.is_capture(*mv) != is_capture {
                return false;
            }
            match promotion {
                Some(promo) => mv.is_promotion() && mv.promotion() == promo,
                None => !mv.is_promotion(),
            }
        })
        .filter(|mv| {
            from_file.map_or(true, |f| file_of(mv.from()) == f)
                && from_rank.map_or(true, |r| rank_of(mv.from()) == r)
        })
        .collect();

    match candidates.as_slice() {
        [mv] => Ok(*mv),
        [] => Err(ChessError::IllegalMove(san.to_string())),
        _ => Err(ChessError::AmbiguousMove(san.to_string())),
    }
}
