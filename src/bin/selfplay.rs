use checkers::board::{is_dark, BOARD_SIZE};
use checkers::game::{new_match, Match, Phase};
use checkers::piece::Side;
use checkers::playout::random_step;
use checkers::view::build_event_views;
use log::{info, warn, LevelFilter};

const MAX_STEPS: u32 = 400;

fn render(game: &Match) -> String {
    let mut out = String::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let symbol = match game.board().piece_at(row, col) {
                Some(p) => match (p.side, p.king) {
                    (Side::Red, false) => 'r',
                    (Side::Red, true) => 'R',
                    (Side::White, false) => 'w',
                    (Side::White, true) => 'W',
                },
                None if is_dark(row, col) => '.',
                None => ' ',
            };
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut game = new_match();
    let mut rng = rand::thread_rng();
    let mut steps = 0;

    while game.check_winner().is_none() && steps < MAX_STEPS {
        let mover = game.turn();
        let chaining = matches!(game.phase(), Phase::CapturingChain { .. });
        if !chaining && !game.has_any_move(mover) {
            warn!("{} has no move left", mover.name());
            break;
        }
        if !random_step(&mut game, &mut rng) {
            warn!("{} could not complete a move", mover.name());
            break;
        }
        steps += 1;

        let events = game.drain_events();
        for event in build_event_views(game.board(), &events) {
            info!(
                "step {steps}: {} {} at {:?}",
                event.side.name(),
                event.kind,
                event.square
            );
        }
    }

    let scores = game.scores();
    let result = match game.winner() {
        Some(side) => format!("{} wins", side.name()),
        None => "unfinished".to_string(),
    };
    eprintln!("{}", render(&game));
    eprintln!(
        "Game over after {steps} moves: {result} (Red {} - White {})",
        scores.red, scores.white
    );
}
