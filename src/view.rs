use serde::Serialize;

use crate::board::{Board, Event, BOARD_SIZE};
use crate::game::{Match, Scores};
use crate::piece::{PieceId, Side};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PieceView {
    pub side: Side,
    pub king: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MoveView {
    pub to: [usize; 2],
    pub captures: Vec<[usize; 2]>,
}

/// Everything a front end needs to draw the board and highlight moves.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MatchView {
    pub cells: Vec<Vec<Option<PieceView>>>,
    pub turn: Side,
    pub phase: &'static str,
    pub selected: Option<[usize; 2]>,
    pub legal_moves: Vec<MoveView>,
    pub red_pieces: usize,
    pub white_pieces: usize,
    pub red_kings: usize,
    pub white_kings: usize,
    pub scores: Scores,
    pub winner: Option<Side>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EventView {
    pub kind: &'static str,
    pub side: Side,
    /// Square of the captured or crowned piece.
    pub square: Option<[usize; 2]>,
}

fn square_of(board: &Board, id: PieceId) -> [usize; 2] {
    let (row, col) = board.piece(id).square();
    [row, col]
}

pub fn build_match_view(game: &Match) -> MatchView {
    let board = game.board();
    let cells = (0..BOARD_SIZE)
        .map(|r| {
            (0..BOARD_SIZE)
                .map(|c| {
                    board.piece_at(r, c).map(|p| PieceView {
                        side: p.side,
                        king: p.king,
                    })
                })
                .collect()
        })
        .collect();

    let legal_moves = game
        .legal_moves()
        .map(|moves| {
            moves
                .iter()
                .map(|m| MoveView {
                    to: [m.to.0, m.to.1],
                    captures: m
                        .captures
                        .iter()
                        .map(|&id| square_of(board, id))
                        .collect(),
                })
                .collect()
        })
        .unwrap_or_default();

    MatchView {
        cells,
        turn: game.turn(),
        phase: game.phase().name(),
        selected: game.selected().map(|id| square_of(board, id)),
        legal_moves,
        red_pieces: board.piece_count(Side::Red),
        white_pieces: board.piece_count(Side::White),
        red_kings: board.king_count(Side::Red),
        white_kings: board.king_count(Side::White),
        scores: game.scores(),
        winner: game.winner(),
    }
}

pub fn build_event_views(board: &Board, events: &[Event]) -> Vec<EventView> {
    events
        .iter()
        .map(|event| match *event {
            Event::Captured { piece, side, .. } => EventView {
                kind: "captured",
                side,
                square: Some(square_of(board, piece)),
            },
            Event::Promoted { piece, side } => EventView {
                kind: "promoted",
                side,
                square: Some(square_of(board, piece)),
            },
            Event::Won { winner } => EventView {
                kind: "won",
                side: winner,
                square: None,
            },
        })
        .collect()
}
