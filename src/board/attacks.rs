use once_cell::sync::Lazy;

use super::bitboard::{file_of, rank_of, square_at, square_bb, Bitboard, Square, EMPTY};
use super::position::Color;

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

struct AttackTables {
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    pawn: [[Bitboard; 64]; 2],
    between: Box<[[Bitboard; 64]; 64]>,
}

static TABLES: Lazy<AttackTables> = Lazy::new(AttackTables::build);

impl AttackTables {
    fn build() -> Self {
        let mut knight = [EMPTY; 64];
        let mut king = [EMPTY; 64];
        let mut pawn = [[EMPTY; 64]; 2];
        let mut between = Box::new([[EMPTY; 64]; 64]);

        for sq in 0..64u8 {
            knight[sq as usize] = leaper_targets(sq, &KNIGHT_DELTAS);
            king[sq as usize] = leaper_targets(sq, &KING_DELTAS);
            pawn[Color::White as usize][sq as usize] =
                leaper_targets(sq, &[(1, -1), (1, 1)]);
            pawn[Color::Black as usize][sq as usize] =
                leaper_targets(sq, &[(-1, -1), (-1, 1)]);
        }

        for a in 0..64u8 {
            for b in 0..64u8 {
                between[a as usize][b as usize] = compute_between(a, b);
            }
        }

        AttackTables {
            knight,
            king,
            pawn,
            between,
        }
    }
}

fn leaper_targets(square: Square, deltas: &[(i8, i8)]) -> Bitboard {
    let rank = rank_of(square) as i8;
    let file = file_of(square) as i8;
    let mut targets = EMPTY;
    for &(dr, df) in deltas {
        let r = rank + dr;
        let f = file + df;
        if (0..8).contains(&r) && (0..8).contains(&f) {
            targets |= square_bb(square_at(f as u8, r as u8));
        }
    }
    targets
}

fn compute_between(a: Square, b: Square) -> Bitboard {
    let rank_diff = rank_of(b) as i8 - rank_of(a) as i8;
    let file_diff = file_of(b) as i8 - file_of(a) as i8;

    let aligned = rank_diff == 0 || file_diff == 0 || rank_diff.abs() == file_diff.abs();
    if !aligned || (rank_diff == 0 && file_diff == 0) {
        return EMPTY;
    }

    let dr = rank_diff.signum();
    let df = file_diff.signum();
    let mut ray = EMPTY;
    let mut r = rank_of(a) as i8 + dr;
    let mut f = file_of(a) as i8 + df;
    while (r, f) != (rank_of(b) as i8, file_of(b) as i8) {
        ray |= square_bb(square_at(f as u8, r as u8));
        r += dr;
        f += df;
    }
    ray
}

#[inline(always)]
pub fn knight_attacks(square: Square) -> Bitboard {
    TABLES.knight[square as usize]
}

#[inline(always)]
pub fn king_attacks(square: Square) -> Bitboard {
    TABLES.king[square as usize]
}

#[inline(always)]
pub fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    TABLES.pawn[color as usize][square as usize]
}

/// Squares strictly between `a` and `b` along a shared rank, file or
/// diagonal; empty when the squares are not aligned.
#[inline(always)]
pub fn ray_between(a: Square, b: Square) -> Bitboard {
    TABLES.between[a as usize][b as usize]
}

fn sliding_attacks(square: Square, occupied: Bitboard, directions: &[(i8, i8); 4]) -> Bitboard {
    let mut attacks = EMPTY;
    for &(dr, df) in directions {
        let mut r = rank_of(square) as i8 + dr;
        let mut f = file_of(square) as i8 + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let bb = square_bb(square_at(f as u8, r as u8));
            attacks |= bb;
            if occupied & bb != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}

/// Ray-scan bishop attacks, stopping at the first blocker (inclusive).
pub fn bishop_attacks(square: Square, occupied: Bitboard) -> Bitboard {
    sliding_attacks(square, occupied, &BISHOP_DIRECTIONS)
}

/// Ray-scan rook attacks, stopping at the first blocker (inclusive).
pub fn rook_attacks(square: Square, occupied: Bitboard) -> Bitboard {
    sliding_attacks(square, occupied, &ROOK_DIRECTIONS)
}

pub fn queen_attacks(square: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(square, occupied) | rook_attacks(square, occupied)
}
