use crate::board::attacks;
use crate::board::bitboard::{file_mask, file_of, popcount, EMPTY};
use crate::board::position::{Color, PieceType, Position};

const PAWN_SHIELD_BONUS: i32 = 10;
const OPEN_FILE_PENALTY: i32 = 20;

/// Pawn shield and near-king open files, from white's point of view.
pub fn king_safety(pos: &Position) -> i32 {
    side_safety(pos, Color::White) - side_safety(pos, Color::Black)
}

fn side_safety(pos: &Position, us: Color) -> i32 {
    let king = pos.king_square(us);
    let pawns = pos.piece_bitboard(PieceType::Pawn, us);
    let mut safety = 0;

    safety += PAWN_SHIELD_BONUS * popcount(attacks::king_attacks(king) & pawns) as i32;

    let king_file = file_of(king) as i8;
    for file in (king_file - 1).max(0)..=(king_file + 1).min(7) {
        if pawns & file_mask(file as u8) == EMPTY {
            safety -= OPEN_FILE_PENALTY;
        }
    }

    safety
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intact_shield_beats_broken_shield() {
        let intact =
            Position::from_fen("rnbqk2r/pppppppp/8/8/8/8/PPPPPPPP/RNBQ1RK1 w kq - 0 1")
                .unwrap();
        let broken =
            Position::from_fen("rnbqk2r/pppppppp/8/8/6P1/8/PPPPPP1P/RNBQ1RK1 w kq - 0 1")
                .unwrap();
        assert!(king_safety(&intact) > king_safety(&broken));
    }

    #[test]
    fn open_files_near_the_king_are_penalized() {
        // No pawns at all: three open files around each king cancel out,
        // shield counts differ by nothing.
        let bare = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(king_safety(&bare), 0);

        // White keeps its f/g/h pawns, black has none.
        let lopsided =
            Position::from_fen("6k1/8/8/8/8/8/5PPP/6K1 w - - 0 1").unwrap();
        assert_eq!(
            king_safety(&lopsided),
            3 * PAWN_SHIELD_BONUS + 3 * OPEN_FILE_PENALTY
        );
    }
}
