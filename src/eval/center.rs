use crate::board::bitboard::{popcount, BitIter, CENTER};
use crate::board::position::{Color, Position};

const CENTER_ATTACK_BONUS: i32 = 10;
const CENTER_OCCUPATION_BONUS: i32 = 15;

/// Attack and occupation of d4, e4, d5 and e5, from white's point of view.
pub fn center_control(pos: &Position) -> i32 {
    let mut score = 0;

    for square in BitIter(CENTER) {
        if pos.is_square_attacked(square, Color::White) {
            score += CENTER_ATTACK_BONUS;
        }
        if pos.is_square_attacked(square, Color::Black) {
            score -= CENTER_ATTACK_BONUS;
        }
    }

    score += CENTER_OCCUPATION_BONUS
        * popcount(CENTER & pos.color_bitboard(Color::White)) as i32;
    score -= CENTER_OCCUPATION_BONUS
        * popcount(CENTER & pos.color_bitboard(Color::Black)) as i32;

    score
}
