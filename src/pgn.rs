//! PGN game records: best-effort parsing and emission.

use std::collections::BTreeMap;

use crate::board::position::{Move, Position};
use crate::error::ChessError;
use crate::notation::san::{move_from_san, move_to_san};

/// A parsed game record. Parsing is best-effort: a bad movetext token stops
/// move interpretation but keeps everything accumulated so far, with the
/// failure described in `last_error`.
#[derive(Debug, Clone, Default)]
pub struct Game {
    pub headers: BTreeMap<String, String>,
    pub initial_fen: Option<String>,
    pub moves: Vec<Move>,
    pub result: String,
    pub last_error: Option<String>,
}

impl Game {
    /// The position the movetext starts from.
    pub fn starting_position(&self) -> Result<Position, ChessError> {
        match &self.initial_fen {
            Some(fen) => Position::from_fen(fen),
            None => Ok(Position::startpos()),
        }
    }
}

/// Splits a file into games (headers begin a new game after movetext) and
/// parses each one.
pub fn parse_pgn(text: &str) -> Vec<Game> {
    let mut games = Vec::new();
    let mut block = String::new();
    let mut seen_movetext = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') && seen_movetext {
            games.push(parse_game(&block));
            block.clear();
            seen_movetext = false;
        }
        if !trimmed.is_empty() && !trimmed.starts_with('[') {
            seen_movetext = true;
        }
        block.push_str(line);
        block.push('\n');
    }
    if !block.trim().is_empty() {
        games.push(parse_game(&block));
    }

    games
}

/// Parses one game: tag pairs until the first non-header line, then
/// movetext.
pub fn parse_game(text: &str) -> Game {
    let mut game = Game {
        result: "*".to_string(),
        ..Game::default()
    };

    let mut movetext = String::new();
    let mut in_headers = true;
    for line in text.lines() {
        let trimmed = line.trim();
        if in_headers {
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with('[') {
                match parse_header_line(trimmed) {
                    Ok((key, value)) => {
                        if key == "FEN" {
                            game.initial_fen = Some(value.clone());
                        }
                        if key == "Result" {
                            game.result = value.clone();
                        }
                        game.headers.insert(key, value);
                    }
                    Err(err) => {
                        game.last_error = Some(err.to_string());
                        return game;
                    }
                }
                continue;
            }
            in_headers = false;
        }
        movetext.push_str(line);
        movetext.push(' ');
    }

    let mut pos = match game.starting_position() {
        Ok(pos) => pos,
        Err(err) => {
            game.last_error = Some(err.to_string());
            return game;
        }
    };

    let sanitized = strip_comments_and_variations(&movetext);
    for token in tokenize(&sanitized) {
        if is_move_number(&token) {
            continue;
        }
        if is_result_token(&token) {
            game.result = token;
            break;
        }
        match move_from_san(&pos, &token) {
            Ok(mv) => {
                pos = pos.make_move(mv);
                game.moves.push(mv);
            }
            Err(err) => {
                game.last_error = Some(err.to_string());
                break;
            }
        }
    }

    game
}

/// Re-emits a game: tag pairs, a blank line, numbered SAN movetext and the
/// result token.
pub fn game_to_pgn(game: &Game) -> Result<String, ChessError> {
    let mut out = String::new();

    for (key, value) in &game.headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, value.replace('"', "\\\"")));
    }
    if !game.headers.is_empty() {
        out.push('\n');
    }

    let mut pos = game.starting_position()?;
    let mut parts = Vec::with_capacity(game.moves.len() + 1);
    for (ply, &mv) in game.moves.iter().enumerate() {
        let san = move_to_san(&pos, mv)?;
        if ply % 2 == 0 {
            parts.push(format!("{}. {}", ply / 2 + 1, san));
        } else {
            parts.push(san);
        }
        pos = pos.make_move(mv);
    }
    if !game.result.is_empty() {
        parts.push(game.result.clone());
    }
    out.push_str(&parts.join(" "));
    out.push('\n');

    Ok(out)
}

fn parse_header_line(line: &str) -> Result<(String, String), ChessError> {
    let invalid = || ChessError::InvalidPgn(format!("malformed header line: {line}"));

    if !line.starts_with('[') || !line.ends_with(']') {
        return Err(invalid());
    }
    let inner = &line[1..line.len() - 1];
    let (key, rest) = inner.split_once(' ').ok_or_else(invalid)?;
    let value = rest.trim();
    if key.is_empty() || !value.starts_with('"') || !value.ends_with('"') || value.len() < 2 {
        return Err(invalid());
    }
    Ok((
        key.to_string(),
        value[1..value.len() - 1].replace("\\\"", "\""),
    ))
}

// Drops balanced `{...}` comments and `(...)` variations, either of which
// may nest.
fn strip_comments_and_variations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth += 1,
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' if brace_depth == 0 => paren_depth += 1,
            ')' if brace_depth == 0 => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

// Whitespace-split, with `12.e4`-style tokens split into the number and the
// move. Black continuation dots (`1...e5`) stick to the number part.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for word in text.split_whitespace() {
        match word.find('.') {
            Some(dot) if dot + 1 < word.len() => {
                let (number, rest) = word.split_at(dot + 1);
                tokens.push(number.to_string());
                let rest = rest.trim_start_matches('.');
                if !rest.is_empty() {
                    tokens.push(rest.to_string());
                }
            }
            _ => tokens.push(word.to_string()),
        }
    }
    tokens
}

fn is_move_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit() || c == '.')
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::uci::move_to_uci;

    #[test]
    fn parses_headers_and_moves() {
        let pgn = concat!(
            "[Event \"Casual\"]\n",
            "[White \"Alice\"]\n",
            "[Black \"Bob\"]\n",
            "[Result \"1-0\"]\n",
            "\n",
            "1. e4 e5 2. Nf3 Nc6 3. Bb5 1-0\n",
        );
        let game = parse_game(pgn);
        assert_eq!(game.headers.get("White").map(String::as_str), Some("Alice"));
        assert_eq!(game.result, "1-0");
        assert!(game.last_error.is_none(), "{:?}", game.last_error);
        let uci: Vec<String> = game.moves.iter().map(|&mv| move_to_uci(mv)).collect();
        assert_eq!(uci, ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5"]);
    }

    #[test]
    fn strips_nested_comments_and_variations() {
        let pgn = "1. e4 {the {very} best} e5 (1... c5 (1... e6) 2. Nf3) 2. Nf3 *\n";
        let game = parse_game(pgn);
        assert!(game.last_error.is_none(), "{:?}", game.last_error);
        assert_eq!(game.moves.len(), 3);
        assert_eq!(game.result, "*");
    }

    #[test]
    fn handles_black_continuation_numbers() {
        let pgn = "1. e4 e5 2. Nf3 2... Nc6 *";
        let game = parse_game(pgn);
        assert!(game.last_error.is_none());
        assert_eq!(game.moves.len(), 4);
    }

    #[test]
    fn honors_the_fen_header() {
        let pgn = concat!(
            "[SetUp \"1\"]\n",
            "[FEN \"4k3/P7/8/8/8/8/8/4K3 w - - 0 1\"]\n",
            "\n",
            "1. a8=Q+ *\n",
        );
        let game = parse_game(pgn);
        assert!(game.last_error.is_none(), "{:?}", game.last_error);
        assert_eq!(game.moves.len(), 1);
        assert!(game.moves[0].is_promotion());
    }

    #[test]
    fn bad_token_stops_but_keeps_prefix() {
        let pgn = "1. e4 e5 2. Qxf7 Nc6 *";
        let game = parse_game(pgn);
        assert_eq!(game.moves.len(), 2);
        let err = game.last_error.expect("an error should be recorded");
        assert!(err.contains("Qxf7"), "{err}");
    }

    #[test]
    fn round_trips_through_emission() {
        let pgn = concat!(
            "[Event \"Rematch\"]\n",
            "[Result \"1/2-1/2\"]\n",
            "\n",
            "1. e4 e5 2. Nf3 Nf6 3. Nxe5 d6 1/2-1/2\n",
        );
        let game = parse_game(pgn);
        assert!(game.last_error.is_none());
        let emitted = game_to_pgn(&game).unwrap();
        let reparsed = parse_game(&emitted);
        assert!(reparsed.last_error.is_none(), "{:?}", reparsed.last_error);
        assert_eq!(reparsed.moves, game.moves);
        assert_eq!(reparsed.result, "1/2-1/2");
        assert_eq!(reparsed.headers, game.headers);
    }

    #[test]
    fn splits_multiple_games() {
        let pgn = concat!(
            "[Event \"One\"]\n",
            "\n",
            "1. e4 e5 *\n",
            "\n",
            "[Event \"Two\"]\n",
            "\n",
            "1. d4 d5 0-1\n",
        );
        let games = parse_pgn(pgn);
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].headers.get("Event").map(String::as_str), Some("One"));
        assert_eq!(games[1].result, "0-1");
        assert_eq!(games[1].moves.len(), 2);
    }

    #[test]
    fn rejects_malformed_headers() {
        let game = parse_game("[Event Casual]\n\n1. e4 *\n");
        assert!(game.last_error.is_some());
    }

    #[test]
    fn castling_and_checks_survive_a_round_trip() {
        let pgn = concat!(
            "[Result \"*\"]\n",
            "\n",
            "1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5 4. O-O Nf6 *\n",
        );
        let game = parse_game(pgn);
        assert!(game.last_error.is_none(), "{:?}", game.last_error);
        assert_eq!(game.moves.len(), 8);
        assert!(game.moves[6].is_castling());
        let emitted = game_to_pgn(&game).unwrap();
        assert!(emitted.contains("O-O"));
    }
}
