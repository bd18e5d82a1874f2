use serde::{Deserialize, Serialize};

use crate::moves::LegalMoves;
use crate::piece::{Piece, PieceId, Side};

pub const BOARD_SIZE: usize = 8;
/// Rows filled by each side at the start of a match.
pub const START_ROWS: usize = 3;
pub const PIECES_PER_SIDE: usize = START_ROWS * BOARD_SIZE / 2;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(PieceId),
}

/// Notifications emitted while the board or match changes, consumed by
/// score bookkeeping and the presentation layer.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Event {
    /// `side` lost `piece` to a jump made by `by`.
    Captured {
        piece: PieceId,
        side: Side,
        by: Side,
    },
    Promoted { piece: PieceId, side: Side },
    Won { winner: Side },
}

#[derive(Clone, Debug)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    pieces: Vec<Piece>,
    piece_count: [usize; 2],
    king_count: [usize; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            pieces: Vec::new(),
            piece_count: [0; 2],
            king_count: [0; 2],
        }
    }

    /// Standard layout: White on rows 0-2, Red on rows 5-7, dark squares only.
    pub fn new() -> Self {
        let mut board = Board::empty();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if !is_dark(row, col) {
                    continue;
                }
                if row < START_ROWS {
                    board.place(Side::White, row, col);
                } else if row >= BOARD_SIZE - START_ROWS {
                    board.place(Side::Red, row, col);
                }
            }
        }
        board
    }

    /// Put a new man on an empty cell and return its handle.
    pub fn place(&mut self, side: Side, row: usize, col: usize) -> PieceId {
        assert_in_bounds(row, col);
        assert_eq!(
            self.cells[row][col],
            Cell::Empty,
            "cell ({row}, {col}) is already occupied"
        );
        assert!(
            self.pieces.len() < u8::MAX as usize,
            "piece handles exhausted"
        );

        let id = PieceId(self.pieces.len() as u8);
        self.pieces.push(Piece::new(id, side, row, col));
        self.cells[row][col] = Cell::Occupied(id);
        self.piece_count[side.index()] += 1;
        id
    }

    /// Put a new, already crowned piece on an empty cell.
    pub fn place_king(&mut self, side: Side, row: usize, col: usize) -> PieceId {
        let id = self.place(side, row, col);
        self.pieces[id.0 as usize].king = true;
        self.king_count[side.index()] += 1;
        id
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        assert_in_bounds(row, col);
        self.cells[row][col]
    }

    pub fn piece_at(&self, row: usize, col: usize) -> Option<&Piece> {
        match self.cell(row, col) {
            Cell::Empty => None,
            Cell::Occupied(id) => Some(self.piece(id)),
        }
    }

    /// Look up a piece record by handle. Captured pieces keep their last square.
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0 as usize]
    }

    pub fn is_live(&self, id: PieceId) -> bool {
        let piece = self.piece(id);
        self.cells[piece.row][piece.col] == Cell::Occupied(id)
    }

    pub fn live_pieces(&self, side: Side) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces
            .iter()
            .filter(move |p| p.side == side && self.is_live(p.id))
    }

    pub fn piece_count(&self, side: Side) -> usize {
        self.piece_count[side.index()]
    }

    pub fn king_count(&self, side: Side) -> usize {
        self.king_count[side.index()]
    }

    /// Every destination reachable by `id` from its current cell, each with the
    /// pieces jumped on the way.
    ///
    /// Men look only toward the opponent; kings look both ways. For each row
    /// direction the left and right diagonals are scanned independently: an
    /// empty neighbour is a quiet move, a jumpable opponent yields a landing
    /// cell and the scan continues from there along both diagonals of the same
    /// row direction. Intermediate landings of a chain are kept as destinations.
    pub fn valid_moves(&self, id: PieceId) -> LegalMoves {
        let piece = self.piece(id);
        let mut moves = LegalMoves::new();
        for &row_step in piece.row_steps() {
            for col_step in [-1, 1] {
                let found = self.traverse(piece.square(), row_step, col_step, piece.side, &[]);
                moves.merge(found);
            }
        }
        moves
    }

    fn traverse(
        &self,
        from: (usize, usize),
        row_step: i32,
        col_step: i32,
        side: Side,
        skipped: &[PieceId],
    ) -> LegalMoves {
        let mut moves = LegalMoves::new();
        let Some((row, col)) = offset(from, row_step, col_step) else {
            return moves;
        };

        match self.cells[row][col] {
            Cell::Empty => {
                // Quiet moves are single steps and never follow a jump.
                if skipped.is_empty() {
                    moves.insert((row, col), Vec::new());
                }
            }
            Cell::Occupied(other) if self.piece(other).side == side => {}
            Cell::Occupied(jumped) => {
                let Some(landing) = offset((row, col), row_step, col_step) else {
                    return moves;
                };
                if self.cells[landing.0][landing.1] != Cell::Empty {
                    return moves;
                }

                let mut chain = skipped.to_vec();
                chain.push(jumped);
                moves.insert(landing, chain.clone());
                for next_col_step in [-1, 1] {
                    let longer = self.traverse(landing, row_step, next_col_step, side, &chain);
                    moves.merge(longer);
                }
            }
        }
        moves
    }

    /// Move a piece to `(row, col)` and crown it on its crowning row.
    ///
    /// No legality check happens here; the destination must come from
    /// `valid_moves`. Returns the promotion event, if any.
    pub fn apply_move(&mut self, id: PieceId, row: usize, col: usize) -> Option<Event> {
        assert_in_bounds(row, col);
        debug_assert_eq!(self.cells[row][col], Cell::Empty);

        let (from_row, from_col) = self.piece(id).square();
        self.cells[from_row][from_col] = self.cells[row][col];
        self.cells[row][col] = Cell::Occupied(id);

        let piece = &mut self.pieces[id.0 as usize];
        piece.row = row;
        piece.col = col;

        if row == piece.side.crowning_row() && !piece.king {
            piece.king = true;
            let side = piece.side;
            self.king_count[side.index()] += 1;
            return Some(Event::Promoted { piece: id, side });
        }
        None
    }

    /// Clear every listed piece from the grid and update the counts.
    /// Pieces already off the board are skipped.
    pub fn remove_captured(&mut self, pieces: &[PieceId]) -> Vec<Event> {
        let mut events = Vec::with_capacity(pieces.len());
        for &id in pieces {
            if !self.is_live(id) {
                continue;
            }
            let piece = *self.piece(id);
            self.cells[piece.row][piece.col] = Cell::Empty;
            self.piece_count[piece.side.index()] -= 1;
            if piece.king {
                self.king_count[piece.side.index()] -= 1;
            }
            events.push(Event::Captured {
                piece: id,
                side: piece.side,
                by: piece.side.opposite(),
            });
        }
        events
    }
}

pub fn is_dark(row: usize, col: usize) -> bool {
    (row + col) % 2 == 1
}

pub fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

fn assert_in_bounds(row: usize, col: usize) {
    assert!(
        row < BOARD_SIZE && col < BOARD_SIZE,
        "square ({row}, {col}) is off the board"
    );
}

fn offset((row, col): (usize, usize), row_step: i32, col_step: i32) -> Option<(usize, usize)> {
    let r = row as i32 + row_step;
    let c = col as i32 + col_step;
    in_bounds(r, c).then(|| (r as usize, c as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupied_on_grid(board: &Board, side: Side) -> usize {
        (0..BOARD_SIZE)
            .flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)))
            .filter(|&(r, c)| board.piece_at(r, c).is_some_and(|p| p.side == side))
            .count()
    }

    #[test]
    fn initial_setup_has_twelve_per_side_on_dark_squares() {
        let board = Board::new();

        assert_eq!(board.piece_count(Side::Red), PIECES_PER_SIDE);
        assert_eq!(board.piece_count(Side::White), PIECES_PER_SIDE);
        assert_eq!(occupied_on_grid(&board, Side::Red), 12);
        assert_eq!(occupied_on_grid(&board, Side::White), 12);
        assert_eq!(board.king_count(Side::Red), 0);
        assert_eq!(board.king_count(Side::White), 0);

        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if let Some(piece) = board.piece_at(row, col) {
                    assert!(is_dark(row, col), "piece on light square ({row}, {col})");
                    assert_eq!(piece.square(), (row, col));
                    assert!(!piece.king);
                    let expected = if row < 3 { Side::White } else { Side::Red };
                    assert_eq!(piece.side, expected);
                }
            }
        }
        for row in 3..5 {
            for col in 0..BOARD_SIZE {
                assert!(
                    board.piece_at(row, col).is_none(),
                    "row {row} should be empty"
                );
            }
        }
    }

    #[test]
    fn quiet_moves_are_single_forward_diagonal_steps() {
        let mut board = Board::empty();
        let red = board.place(Side::Red, 5, 2);
        let white = board.place(Side::White, 2, 5);

        let red_moves = board.valid_moves(red);
        let red_targets: Vec<_> = red_moves.destinations().collect();
        assert_eq!(red_targets, vec![(4, 1), (4, 3)]);
        assert!(!red_moves.has_capture());

        let white_moves = board.valid_moves(white);
        let white_targets: Vec<_> = white_moves.destinations().collect();
        assert_eq!(white_targets, vec![(3, 4), (3, 6)]);
    }

    #[test]
    fn edge_piece_has_one_quiet_move() {
        let mut board = Board::empty();
        let red = board.place(Side::Red, 5, 0);

        let moves = board.valid_moves(red);
        assert_eq!(moves.destinations().collect::<Vec<_>>(), vec![(4, 1)]);
    }

    #[test]
    fn king_moves_in_all_four_directions() {
        let mut board = Board::empty();
        let king = board.place_king(Side::Red, 4, 3);

        let moves = board.valid_moves(king);
        assert_eq!(
            moves.destinations().collect::<Vec<_>>(),
            vec![(3, 2), (3, 4), (5, 2), (5, 4)]
        );
    }

    #[test]
    fn single_capture_lands_two_cells_away() {
        let mut board = Board::empty();
        let red = board.place(Side::Red, 5, 2);
        let white = board.place(Side::White, 4, 3);

        let moves = board.valid_moves(red);
        assert_eq!(moves.captures_for((3, 4)), Some(&[white][..]));
        assert_eq!(moves.captures_for((4, 1)), Some(&[][..]));
        assert!(!moves.contains((4, 3)));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn blocked_capture_adds_no_move() {
        let mut board = Board::empty();
        let red = board.place(Side::Red, 5, 2);
        board.place(Side::White, 4, 3);
        board.place(Side::White, 3, 4);

        let moves = board.valid_moves(red);
        assert_eq!(moves.destinations().collect::<Vec<_>>(), vec![(4, 1)]);
    }

    #[test]
    fn capture_off_the_board_adds_no_move() {
        let mut board = Board::empty();
        let red = board.place(Side::Red, 2, 1);
        board.place(Side::White, 1, 0);

        let moves = board.valid_moves(red);
        assert_eq!(moves.destinations().collect::<Vec<_>>(), vec![(1, 2)]);
    }

    #[test]
    fn own_piece_blocks_direction_entirely() {
        let mut board = Board::empty();
        let red = board.place(Side::Red, 5, 2);
        board.place(Side::Red, 4, 3);
        board.place(Side::White, 3, 4);

        let moves = board.valid_moves(red);
        assert_eq!(moves.destinations().collect::<Vec<_>>(), vec![(4, 1)]);
        assert!(!moves.has_capture());
    }

    #[test]
    fn chain_search_follows_both_diagonals() {
        let mut board = Board::empty();
        let red = board.place(Side::Red, 6, 1);
        let first = board.place(Side::White, 5, 2);
        let right = board.place(Side::White, 3, 4);
        let left = board.place(Side::White, 3, 2);

        let moves = board.valid_moves(red);
        assert_eq!(moves.captures_for((4, 3)), Some(&[first][..]));
        assert_eq!(moves.captures_for((2, 5)), Some(&[first, right][..]));
        assert_eq!(moves.captures_for((2, 1)), Some(&[first, left][..]));
        assert_eq!(moves.captures_for((5, 0)), Some(&[][..]));
        assert_eq!(moves.len(), 4);
    }

    #[test]
    fn chain_search_does_not_add_quiet_steps_after_a_jump() {
        let mut board = Board::empty();
        let red = board.place(Side::Red, 5, 2);
        board.place(Side::White, 4, 3);

        let moves = board.valid_moves(red);
        assert!(!moves.contains((2, 3)));
        assert!(!moves.contains((2, 5)));
    }

    #[test]
    fn apply_move_updates_cells_and_piece() {
        let mut board = Board::empty();
        let red = board.place(Side::Red, 5, 2);

        let event = board.apply_move(red, 4, 3);

        assert_eq!(event, None);
        assert_eq!(board.cell(5, 2), Cell::Empty);
        assert_eq!(board.cell(4, 3), Cell::Occupied(red));
        assert_eq!(board.piece(red).square(), (4, 3));
    }

    #[test]
    fn promotion_happens_exactly_once() {
        let mut board = Board::empty();
        let red = board.place(Side::Red, 1, 2);

        let event = board.apply_move(red, 0, 1);
        assert_eq!(
            event,
            Some(Event::Promoted {
                piece: red,
                side: Side::Red,
            })
        );
        assert!(board.piece(red).king);
        assert_eq!(board.king_count(Side::Red), 1);

        board.apply_move(red, 1, 2);
        let again = board.apply_move(red, 0, 3);
        assert_eq!(again, None);
        assert_eq!(board.king_count(Side::Red), 1);
    }

    #[test]
    fn remove_captured_clears_cells_and_counts() {
        let mut board = Board::empty();
        let a = board.place(Side::White, 2, 1);
        let b = board.place_king(Side::White, 2, 3);
        board.place(Side::White, 0, 1);

        let events = board.remove_captured(&[a, b]);

        assert_eq!(
            events,
            vec![
                Event::Captured {
                    piece: a,
                    side: Side::White,
                    by: Side::Red,
                },
                Event::Captured {
                    piece: b,
                    side: Side::White,
                    by: Side::Red,
                },
            ]
        );
        assert_eq!(board.cell(2, 1), Cell::Empty);
        assert_eq!(board.cell(2, 3), Cell::Empty);
        assert_eq!(board.piece_count(Side::White), 1);
        assert_eq!(board.king_count(Side::White), 0);
        assert_eq!(occupied_on_grid(&board, Side::White), 1);
        assert!(!board.is_live(a));
    }

    #[test]
    fn removing_twice_does_not_double_count() {
        let mut board = Board::empty();
        let a = board.place(Side::White, 2, 1);

        board.remove_captured(&[a]);
        let events = board.remove_captured(&[a]);

        assert!(events.is_empty());
        assert_eq!(board.piece_count(Side::White), 0);
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn out_of_bounds_access_panics() {
        let board = Board::new();
        board.piece_at(8, 0);
    }
}
