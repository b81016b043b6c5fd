use std::env;
use std::fs;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use ivory::notation::san::move_to_san;
use ivory::notation::uci::{move_to_uci, resolve_uci};
use ivory::{Analyzer, Position, STARTING_FEN};

const DEFAULT_SEARCH_DEPTH: u32 = 6;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<ExitCode> {
    let program = args.first().map(String::as_str).unwrap_or("ivory");

    let Some(command) = args.get(1) else {
        print_usage(program);
        return Ok(ExitCode::FAILURE);
    };

    match command.as_str() {
        "help" | "-h" | "--help" => {
            print_usage(program);
            Ok(ExitCode::SUCCESS)
        }
        "analyze" if args.len() >= 3 => {
            analyze_position(&args[2])?;
            Ok(ExitCode::SUCCESS)
        }
        "explain" if args.len() >= 4 => {
            explain_move(&args[2], &args[3])?;
            Ok(ExitCode::SUCCESS)
        }
        "best" if args.len() >= 3 => {
            let depth = match args.get(3) {
                Some(raw) => raw
                    .parse()
                    .with_context(|| format!("invalid depth '{raw}'"))?,
                None => DEFAULT_SEARCH_DEPTH,
            };
            find_best_move(&args[2], depth)?;
            Ok(ExitCode::SUCCESS)
        }
        "game" if args.len() >= 3 => {
            analyze_game_file(&args[2])?;
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            eprintln!("invalid command or missing arguments\n");
            print_usage(program);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_usage(program: &str) {
    println!("Chess position analyzer\n");
    println!("Usage: {program} <command> [options]\n");
    println!("Commands:");
    println!("  analyze <fen>         Analyze a position and explain all legal moves");
    println!("  explain <fen> <move>  Explain a specific move in a position");
    println!("  best <fen> [depth]    Find the best move in a position (default depth {DEFAULT_SEARCH_DEPTH})");
    println!("  game <pgn-file>       Analyze all moves in a PGN game");
    println!("  help                  Show this help message\n");
    println!("Examples:");
    println!("  {program} analyze startpos");
    println!("  {program} explain startpos e2e4");
    println!("  {program} best \"r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4\"");
}

fn parse_position(fen: &str) -> Result<Position> {
    let fen = if fen == "startpos" { STARTING_FEN } else { fen };
    Ok(Position::from_fen(fen)?)
}

fn analyze_position(fen: &str) -> Result<()> {
    let analyzer = Analyzer::new();
    let pos = parse_position(fen)?;

    println!("\nPosition Analysis");
    println!("=================");
    println!("FEN: {}", pos.to_fen());
    println!("Evaluation: {} centipawns", analyzer.evaluate(&pos));

    let themes = analyzer.tactical_themes(&pos);
    if !themes.is_empty() {
        let names: Vec<String> = themes.iter().map(|theme| theme.to_string()).collect();
        println!("Tactical Themes: {}", names.join(" "));
    }

    let moves = analyzer.legal_moves(&pos);
    println!("\nLegal Moves ({}):", moves.len());
    println!("{}", "-".repeat(72));
    for mv in moves {
        let san = move_to_san(&pos, mv)?;
        let explanation = analyzer.explain_move(&pos, mv)?;
        println!("{san:<10}{explanation}");
    }

    Ok(())
}

fn explain_move(fen: &str, uci: &str) -> Result<()> {
    let analyzer = Analyzer::new();
    let pos = parse_position(fen)?;
    let mv = resolve_uci(&pos, uci)?;

    if !analyzer.is_legal_move(&pos, mv) {
        bail!("illegal move: {uci}");
    }

    println!("\nMove Explanation");
    println!("================");
    println!(
        "Move: {} ({})",
        move_to_san(&pos, mv)?,
        uci
    );
    println!();
    println!("{}", analyzer.explain_move(&pos, mv)?);

    Ok(())
}

fn find_best_move(fen: &str, depth: u32) -> Result<()> {
    let analyzer = Analyzer::new();
    let pos = parse_position(fen)?;

    println!("\nSearching for best move (depth {depth})...");
    let result = analyzer.best_move(&pos, depth);

    if result.best_move.is_null() {
        if pos.is_in_check() {
            println!("No legal moves: checkmate.");
        } else {
            println!("No legal moves: stalemate.");
        }
        return Ok(());
    }

    println!(
        "\nBest Move: {} ({})",
        move_to_san(&pos, result.best_move)?,
        move_to_uci(result.best_move)
    );
    println!(
        "Explanation: {}",
        analyzer.explain_move(&pos, result.best_move)?
    );

    let after = pos.make_move(result.best_move);
    println!(
        "Evaluation after move: {} centipawns",
        analyzer.evaluate(&after)
    );

    Ok(())
}

fn analyze_game_file(path: &str) -> Result<()> {
    let analyzer = Analyzer::new();
    let text = fs::read_to_string(path).with_context(|| format!("cannot read '{path}'"))?;

    let games = ivory::pgn::parse_pgn(&text);
    if games.is_empty() {
        bail!("no games found in '{path}'");
    }

    for (index, game) in games.iter().enumerate() {
        if games.len() > 1 {
            println!("\nGame {}", index + 1);
            println!("========");
        }
        for key in ["Event", "White", "Black"] {
            if let Some(value) = game.headers.get(key) {
                println!("{key}: {value}");
            }
        }

        let mut pos = game.starting_position()?;
        for (ply, &mv) in game.moves.iter().enumerate() {
            let san = move_to_san(&pos, mv)?;
            let explanation = analyzer.explain_move(&pos, mv)?;
            let number = if ply % 2 == 0 {
                format!("{}.", ply / 2 + 1)
            } else {
                format!("{}...", ply / 2 + 1)
            };
            println!("{number} {san:<10}{explanation}");
            pos = pos.make_move(mv);
        }

        println!("Result: {}", game.result);
        if let Some(err) = &game.last_error {
            eprintln!("warning: movetext parsing stopped early: {err}");
        }
    }

    Ok(())
}
