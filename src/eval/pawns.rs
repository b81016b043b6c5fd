use crate::board::bitboard::{
    file_mask, file_of, popcount, rank_mask, rank_of, BitIter, Bitboard, EMPTY,
};
use crate::board::position::{Color, PieceType, Position};

const DOUBLED_PENALTY: i32 = 10;
const ISOLATED_PENALTY: i32 = 15;

/// Doubled, isolated and passed pawns, from white's point of view.
pub fn pawn_structure(pos: &Position) -> i32 {
    let white = pos.piece_bitboard(PieceType::Pawn, Color::White);
    let black = pos.piece_bitboard(PieceType::Pawn, Color::Black);

    side_score(white, black, Color::White) - side_score(black, white, Color::Black)
}

fn side_score(ours: Bitboard, theirs: Bitboard, us: Color) -> i32 {
    let mut score = 0;

    for file in 0..8u8 {
        let on_file = popcount(ours & file_mask(file)) as i32;
        if on_file > 1 {
            score -= DOUBLED_PENALTY * (on_file - 1);
        }
        if on_file > 0 && ours & adjacent_files(file) == EMPTY {
            score -= ISOLATED_PENALTY * on_file;
        }
    }

    for square in BitIter(ours) {
        if front_span(square, us) & theirs == EMPTY {
            let rank = match us {
                Color::White => rank_of(square) as i32,
                Color::Black => 7 - rank_of(square) as i32,
            };
            score += 10 + 5 * rank * rank;
        }
    }

    score
}

fn adjacent_files(file: u8) -> Bitboard {
    let mut mask = EMPTY;
    if file > 0 {
        mask |= file_mask(file - 1);
    }
    if file < 7 {
        mask |= file_mask(file + 1);
    }
    mask
}

// The pawn's file and both neighbours, ranks strictly ahead of it.
fn front_span(square: u8, us: Color) -> Bitboard {
    let lanes = file_mask(file_of(square)) | adjacent_files(file_of(square));
    let rank = rank_of(square);
    let ahead = match us {
        Color::White => {
            let mut mask = EMPTY;
            for r in rank + 1..8 {
                mask |= rank_mask(r);
            }
            mask
        }
        Color::Black => {
            let mut mask = EMPTY;
            for r in 0..rank {
                mask |= rank_mask(r);
            }
            mask
        }
    };
    lanes & ahead
}
