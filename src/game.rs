// =============================================================================
// Match: turn order, selection and the capture-chain rule
//
// A match moves through three phases. While `Selecting`, the side to move may
// pick any of its pieces and move it along one of the destinations offered.
// A jump that leaves further jumps open for the same piece switches to
// `CapturingChain`, where only those jumps are offered and the turn cannot
// pass until the chain is exhausted. `Terminal` is entered by `check_winner`
// once a side has no pieces left; nothing changes after that.
//
// Scores are bookkeeping for the presentation layer and never affect play.
// =============================================================================

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, Event};
use crate::config::RulesConfig;
use crate::moves::LegalMoves;
use crate::piece::{PieceId, Side};

/// The selected piece and the destinations currently offered to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub piece: PieceId,
    pub moves: LegalMoves,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Selecting { selected: Option<Selection> },
    /// A jump was made and the same piece must keep jumping.
    CapturingChain { selection: Selection },
    Terminal { winner: Side },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Selecting { .. } => "selecting",
            Phase::CapturingChain { .. } => "capturing_chain",
            Phase::Terminal { .. } => "terminal",
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct Scores {
    pub red: u32,
    pub white: u32,
}

impl Scores {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Red => self.red,
            Side::White => self.white,
        }
    }

    fn add(&mut self, side: Side, points: u32) {
        match side {
            Side::Red => self.red += points,
            Side::White => self.white += points,
        }
    }
}

/// Start a match from the standard layout with default rules.
pub fn new_match() -> Match {
    Match::new(RulesConfig::default())
}

#[derive(Clone, Debug)]
pub struct Match {
    board: Board,
    config: RulesConfig,
    turn: Side,
    phase: Phase,
    scores: Scores,
    events: Vec<Event>,
}

impl Match {
    pub fn new(config: RulesConfig) -> Self {
        let turn = config.first_turn;
        Self::from_position(Board::new(), turn, config)
    }

    /// Start from an arbitrary position, e.g. one built with `Board::empty`.
    pub fn from_position(board: Board, turn: Side, config: RulesConfig) -> Self {
        Match {
            board,
            config,
            turn,
            phase: Phase::Selecting { selected: None },
            scores: Scores::default(),
            events: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Terminal { .. })
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::Terminal { winner } => Some(winner),
            _ => None,
        }
    }

    fn selection(&self) -> Option<&Selection> {
        match &self.phase {
            Phase::Selecting { selected } => selected.as_ref(),
            Phase::CapturingChain { selection } => Some(selection),
            Phase::Terminal { .. } => None,
        }
    }

    pub fn selected(&self) -> Option<PieceId> {
        self.selection().map(|s| s.piece)
    }

    /// Destinations offered to the selected piece, for highlighting.
    pub fn legal_moves(&self) -> Option<&LegalMoves> {
        self.selection().map(|s| &s.moves)
    }

    /// Hand all events queued since the last call to the caller.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// React to a click on `(row, col)`.
    ///
    /// With a piece selected, first try to move it there. If that fails the
    /// selection is dropped and the click is treated as a fresh selection,
    /// except during a capture chain, where the chaining piece stays selected.
    /// Returns true when a move was made or a piece got selected.
    pub fn select(&mut self, row: usize, col: usize) -> bool {
        if self.is_terminal() {
            return false;
        }

        if self.selection().is_some() {
            if self.try_move(row, col) {
                return true;
            }
            if matches!(self.phase, Phase::CapturingChain { .. }) {
                debug!("{} must continue the capture chain", self.turn.name());
                return false;
            }
            self.phase = Phase::Selecting { selected: None };
        }

        let piece = match self.board.piece_at(row, col) {
            Some(piece) if piece.side == self.turn => piece.id,
            _ => return false,
        };
        let moves = self.offered_moves(piece);
        debug!(
            "{} selected ({row}, {col}) with {} destinations",
            self.turn.name(),
            moves.len()
        );
        self.phase = Phase::Selecting {
            selected: Some(Selection { piece, moves }),
        };
        true
    }

    /// Move the selected piece to `(row, col)` if that is one of its offered
    /// destinations. A failed attempt changes nothing.
    pub fn try_move(&mut self, row: usize, col: usize) -> bool {
        let Some(selection) = self.selection() else {
            return false;
        };
        if self.board.cell(row, col) != Cell::Empty {
            return false;
        }
        let Some(captures) = selection.moves.captures_for((row, col)) else {
            return false;
        };
        let piece = selection.piece;
        let captures = captures.to_vec();

        let from = self.board.piece(piece).square();
        debug!("{} moves {from:?} -> ({row}, {col})", self.turn.name());
        if let Some(event) = self.board.apply_move(piece, row, col) {
            self.record(event);
        }

        if !captures.is_empty() {
            for event in self.board.remove_captured(&captures) {
                self.record(event);
            }
            let follow_up = self.board.valid_moves(piece).captures_only();
            if !follow_up.is_empty() {
                info!(
                    "{} continues capturing from ({row}, {col}), {} jumps open",
                    self.turn.name(),
                    follow_up.len()
                );
                self.phase = Phase::CapturingChain {
                    selection: Selection {
                        piece,
                        moves: follow_up,
                    },
                };
                return true;
            }
        }

        self.change_turn();
        true
    }

    /// Drop the selection and pass the move to the other side.
    pub fn change_turn(&mut self) {
        self.phase = Phase::Selecting { selected: None };
        self.turn = self.turn.opposite();
        debug!("turn passes to {}", self.turn.name());
    }

    /// Declare the match over once a side has no pieces left. The win bonus
    /// is awarded only on the first call that finds the winner.
    pub fn check_winner(&mut self) -> Option<Side> {
        if let Phase::Terminal { winner } = self.phase {
            return Some(winner);
        }

        let loser = [Side::Red, Side::White]
            .into_iter()
            .find(|&side| self.board.piece_count(side) == 0)?;
        let winner = loser.opposite();

        self.scores.add(winner, self.config.win_bonus);
        self.events.push(Event::Won { winner });
        self.phase = Phase::Terminal { winner };
        info!(
            "{} wins (Red {} - White {})",
            winner.name(),
            self.scores.red,
            self.scores.white
        );
        Some(winner)
    }

    /// Squares of the pieces `side` may select with something to do. Under
    /// mandatory capture, only pieces that can jump qualify while any can.
    pub fn movable_pieces(&self, side: Side) -> Vec<(usize, usize)> {
        let forced = self.config.mandatory_capture && self.side_has_capture(side);
        self.board
            .live_pieces(side)
            .filter(|p| {
                let moves = self.board.valid_moves(p.id);
                if forced {
                    moves.has_capture()
                } else {
                    !moves.is_empty()
                }
            })
            .map(|p| p.square())
            .collect()
    }

    /// Whether `side` could move any of its pieces right now.
    pub fn has_any_move(&self, side: Side) -> bool {
        !self.movable_pieces(side).is_empty()
    }

    fn side_has_capture(&self, side: Side) -> bool {
        self.board
            .live_pieces(side)
            .any(|p| self.board.valid_moves(p.id).has_capture())
    }

    fn offered_moves(&self, piece: PieceId) -> LegalMoves {
        let moves = self.board.valid_moves(piece);
        if self.config.mandatory_capture && self.side_has_capture(self.turn) {
            return moves.captures_only();
        }
        moves
    }

    fn record(&mut self, event: Event) {
        match event {
            Event::Captured { piece, by, .. } => {
                debug!("{} captured piece {}", by.name(), piece.0);
                self.scores.add(by, self.config.piece_value);
            }
            Event::Promoted { piece, side } => {
                debug!("{} piece {} crowned", side.name(), piece.0);
                self.scores.add(side, self.config.king_bonus);
            }
            Event::Won { .. } => {}
        }
        self.events.push(event);
    }
}
