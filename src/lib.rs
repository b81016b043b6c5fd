//! Chess analysis engine: move generation, static evaluation, bounded-depth
//! best-move search, and standard-notation conversion (FEN, UCI, SAN, PGN).

pub mod board {
    pub mod attacks;
    pub mod bitboard;
    pub mod position;
    pub mod zobrist;
}

pub mod movegen {
    pub mod generate;
    pub mod perft;
}

pub mod notation {
    pub mod san;
    pub mod uci;
}

pub mod eval {
    pub mod center;
    pub mod evaluate;
    pub mod king_safety;
    pub mod material;
    pub mod mobility;
    pub mod pawns;
    pub mod pst;
}

pub mod search {
    pub mod alphabeta;
}

pub mod error;
pub mod explain;
pub mod pgn;

pub use board::position::{
    Color, Move, MoveKind, Piece, PieceType, Position, Promotion, STARTING_FEN,
};
pub use error::ChessError;
pub use explain::TacticalTheme;
pub use pgn::Game;
pub use search::alphabeta::SearchResult;

use movegen::generate;

/// High-level entry point tying the subsystems together: move enumeration,
/// evaluation, search, explanations and whole-game analysis.
#[derive(Debug, Default, Clone, Copy)]
pub struct Analyzer;

impl Analyzer {
    pub fn new() -> Self {
        Analyzer
    }

    pub fn legal_moves(&self, pos: &Position) -> Vec<Move> {
        generate::legal_moves(pos)
    }

    /// Static evaluation in centipawns from the side to move's perspective.
    pub fn evaluate(&self, pos: &Position) -> i32 {
        eval::evaluate::evaluate(pos)
    }

    /// Alpha-beta search to `depth` plies. The result carries the null move
    /// only when no legal move exists.
    pub fn best_move(&self, pos: &Position, depth: u32) -> SearchResult {
        search::alphabeta::find_best_move(pos, depth)
    }

    pub fn explain_move(&self, pos: &Position, mv: Move) -> Result<String, ChessError> {
        explain::explain_move(pos, mv)
    }

    pub fn is_legal_move(&self, pos: &Position, mv: Move) -> bool {
        generate::legal_moves(pos).contains(&mv)
    }

    pub fn tactical_themes(&self, pos: &Position) -> Vec<TacticalTheme> {
        explain::tactical_themes(pos)
    }

    /// Parses a PGN string and explains each move in sequence. Parse
    /// problems surface as a trailing message rather than aborting the
    /// analysis.
    pub fn analyze_game(&self, pgn_text: &str) -> Vec<String> {
        let game = pgn::parse_game(pgn_text);
        let mut analysis = Vec::with_capacity(game.moves.len() + 1);

        let mut pos = match game.starting_position() {
            Ok(pos) => pos,
            Err(err) => return vec![format!("Error parsing game: {err}")],
        };

        for &mv in &game.moves {
            match explain::explain_move(&pos, mv) {
                Ok(text) => analysis.push(text),
                Err(err) => {
                    analysis.push(format!("Error explaining move: {err}"));
                    break;
                }
            }
            pos = pos.make_move(mv);
        }

        if let Some(err) = &game.last_error {
            analysis.push(format!("Error parsing game: {err}"));
        }

        analysis
    }
}
