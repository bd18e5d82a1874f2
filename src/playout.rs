// =============================================================================
// Random playouts: drive a match through `Match::select` clicks only, the
// same way a player would. Native builds only; shared by the tooling binaries
// and the integration tests.
// =============================================================================

use rand::seq::SliceRandom;
use rand::Rng;

use crate::game::{Match, Phase};

/// Click a random movable piece, then one of its highlighted destinations.
/// During a chain only the destination click is needed. Returns false when
/// the side to move has nothing to click.
pub fn random_step(game: &mut Match, rng: &mut impl Rng) -> bool {
    if let Phase::CapturingChain { selection } = game.phase() {
        let targets: Vec<(usize, usize)> = selection.moves.destinations().collect();
        return match targets.choose(rng) {
            Some(&(row, col)) => game.select(row, col),
            None => false,
        };
    }

    let movable = game.movable_pieces(game.turn());
    let Some(&(row, col)) = movable.choose(rng) else {
        return false;
    };
    if !game.select(row, col) {
        return false;
    }
    let targets: Vec<(usize, usize)> = match game.legal_moves() {
        Some(moves) => moves.destinations().collect(),
        None => return false,
    };
    match targets.choose(rng) {
        Some(&(to_row, to_col)) => game.select(to_row, to_col),
        None => false,
    }
}
