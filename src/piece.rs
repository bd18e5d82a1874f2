use serde::{Deserialize, Serialize};

use crate::board::BOARD_SIZE;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    White,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Red => Side::White,
            Side::White => Side::Red,
        }
    }

    /// Row step of a forward move. Red starts at the bottom (rows 5-7) and moves up.
    pub fn forward(self) -> i32 {
        match self {
            Side::Red => -1,
            Side::White => 1,
        }
    }

    /// The row on which a piece of this side is crowned.
    pub fn crowning_row(self) -> usize {
        match self {
            Side::Red => 0,
            Side::White => BOARD_SIZE - 1,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Red => 0,
            Side::White => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Red => "Red",
            Side::White => "White",
        }
    }
}

/// Handle to a piece owned by a `Board`. Handles are never reused within one board.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u8);

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub side: Side,
    pub row: usize,
    pub col: usize,
    pub king: bool,
}

impl Piece {
    pub fn new(id: PieceId, side: Side, row: usize, col: usize) -> Self {
        Piece {
            id,
            side,
            row,
            col,
            king: false,
        }
    }

    pub fn square(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Row steps this piece may move or capture along.
    pub fn row_steps(&self) -> &'static [i32] {
        match (self.king, self.side) {
            (true, Side::Red) => &[-1, 1],
            (true, Side::White) => &[1, -1],
            (false, Side::Red) => &[-1],
            (false, Side::White) => &[1],
        }
    }
}
