use once_cell::sync::Lazy;

use super::position::{Color, PieceType};

/// Random keys for position hashing: one per piece-square pair, one per
/// en-passant file, one per castling-rights state, and one for the side to
/// move.
pub struct ZobristKeys {
    pub pieces: [[u64; 64]; 12],
    pub en_passant: [u64; 8],
    pub castling: [u64; 16],
    pub side_to_move: u64,
}

static KEYS: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::generate);

struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl ZobristKeys {
    fn generate() -> Self {
        let mut rng = XorShift64::new(0x1234_5678_90AB_CDEF);

        let mut pieces = [[0u64; 64]; 12];
        for piece in pieces.iter_mut() {
            for key in piece.iter_mut() {
                *key = rng.next();
            }
        }

        let mut en_passant = [0u64; 8];
        for key in en_passant.iter_mut() {
            *key = rng.next();
        }

        let mut castling = [0u64; 16];
        for key in castling.iter_mut() {
            *key = rng.next();
        }

        ZobristKeys {
            pieces,
            en_passant,
            castling,
            side_to_move: rng.next(),
        }
    }
}

pub fn keys() -> &'static ZobristKeys {
    &KEYS
}

#[inline(always)]
pub fn piece_index(color: Color, kind: PieceType) -> usize {
    color as usize * 6 + kind as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_deterministic_and_distinct() {
        let keys = keys();
        assert_eq!(keys.pieces[0][0], keys.pieces[0][0]);
        assert_ne!(keys.pieces[0][0], keys.pieces[0][1]);
        assert_ne!(keys.side_to_move, 0);
        let mut seen = std::collections::HashSet::new();
        for piece in &keys.pieces {
            for &key in piece {
                assert!(seen.insert(key));
            }
        }
    }

    #[test]
    fn piece_index_covers_both_colors() {
        assert_eq!(piece_index(Color::White, PieceType::Pawn), 0);
        assert_eq!(piece_index(Color::White, PieceType::King), 5);
        assert_eq!(piece_index(Color::Black, PieceType::Pawn), 6);
        assert_eq!(piece_index(Color::Black, PieceType::King), 11);
    }
}
