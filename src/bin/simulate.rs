use std::path::PathBuf;

use checkers::config::RulesConfig;
use checkers::game::{Match, Phase};
use checkers::piece::Side;
use checkers::playout::random_step;
use clap::Parser;
use log::{debug, error, info, warn, LevelFilter};
use rand::Rng;
use serde::Serialize;

#[derive(Parser)]
#[command(about = "Play random checkers games and print a JSON summary")]
struct Arguments {
    /// Number of games to play.
    #[arg(short, long, default_value_t = 100)]
    games: usize,
    /// Moves after which a game is abandoned as unfinished.
    #[arg(short, long, default_value_t = 300)]
    max_moves: u32,
    /// JSON rules file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Won(Side),
    /// The side to move had pieces but nothing to do.
    Blocked(Side),
    MoveLimit,
}

#[derive(Serialize, Default)]
struct Summary {
    games: usize,
    red_wins: u32,
    white_wins: u32,
    blocked: u32,
    unfinished: u32,
    average_moves: f64,
    average_red_score: f64,
    average_white_score: f64,
    rules: RulesConfig,
}

fn play_game(
    config: &RulesConfig,
    max_moves: u32,
    rng: &mut impl Rng,
) -> (Outcome, u32, Match) {
    let mut game = Match::new(config.clone());
    for moves in 0..max_moves {
        if let Some(winner) = game.check_winner() {
            return (Outcome::Won(winner), moves, game);
        }
        let mover = game.turn();
        let chaining = matches!(game.phase(), Phase::CapturingChain { .. });
        if !chaining && !game.has_any_move(mover) {
            return (Outcome::Blocked(mover), moves, game);
        }
        if !random_step(&mut game, rng) {
            warn!("{} could not complete a move", mover.name());
            return (Outcome::Blocked(mover), moves, game);
        }
    }
    match game.check_winner() {
        Some(winner) => (Outcome::Won(winner), max_moves, game),
        None => (Outcome::MoveLimit, max_moves, game),
    }
}

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let arguments = Arguments::parse();
    let config = match &arguments.config {
        Some(path) => match RulesConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                error!("{}: {err}", path.display());
                std::process::exit(1);
            }
        },
        None => RulesConfig::default(),
    };

    info!(
        "playing {} games, move limit {}",
        arguments.games, arguments.max_moves
    );

    let mut rng = rand::thread_rng();
    let mut summary = Summary {
        games: arguments.games,
        rules: config.clone(),
        ..Summary::default()
    };
    let mut total_moves = 0u64;
    let mut total_scores = (0u64, 0u64);

    for index in 0..arguments.games {
        let (outcome, moves, game) = play_game(&config, arguments.max_moves, &mut rng);
        debug!("game {index}: {outcome:?} after {moves} moves");

        match outcome {
            Outcome::Won(Side::Red) => summary.red_wins += 1,
            Outcome::Won(Side::White) => summary.white_wins += 1,
            Outcome::Blocked(_) => summary.blocked += 1,
            Outcome::MoveLimit => summary.unfinished += 1,
        }
        total_moves += moves as u64;
        total_scores.0 += game.scores().red as u64;
        total_scores.1 += game.scores().white as u64;
    }

    if arguments.games > 0 {
        let n = arguments.games as f64;
        summary.average_moves = total_moves as f64 / n;
        summary.average_red_score = total_scores.0 as f64 / n;
        summary.average_white_score = total_scores.1 as f64 / n;
    }

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => error!("could not serialise summary: {err}"),
    }
}
