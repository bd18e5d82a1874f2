pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod moves;
pub mod piece;
#[cfg(not(target_arch = "wasm32"))]
pub mod playout;
pub mod view;

#[cfg(target_arch = "wasm32")]
mod wasm_api;

pub use board::{Board, Cell, Event};
pub use config::RulesConfig;
pub use game::{new_match, Match, Phase};
pub use piece::{Piece, PieceId, Side};
