use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::piece::PieceId;

/// A single destination for a selected piece and the pieces jumped to reach it.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Move {
    pub to: (usize, usize),
    pub captures: Vec<PieceId>,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }
}

/// Destination cell -> pieces captured along the way, in capture order.
///
/// Produced fresh for every selection and never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegalMoves {
    map: BTreeMap<(usize, usize), Vec<PieceId>>,
}

impl LegalMoves {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn contains(&self, to: (usize, usize)) -> bool {
        self.map.contains_key(&to)
    }

    pub fn captures_for(&self, to: (usize, usize)) -> Option<&[PieceId]> {
        self.map.get(&to).map(Vec::as_slice)
    }

    /// Records a destination. When two chains land on the same cell the one
    /// capturing more pieces wins; on a tie the first recorded stays.
    pub fn insert(&mut self, to: (usize, usize), captures: Vec<PieceId>) {
        match self.map.get(&to) {
            Some(existing) if existing.len() >= captures.len() => {}
            _ => {
                self.map.insert(to, captures);
            }
        }
    }

    pub fn merge(&mut self, other: LegalMoves) {
        for (to, captures) in other.map {
            self.insert(to, captures);
        }
    }

    pub fn has_capture(&self) -> bool {
        self.iter().any(|m| m.is_capture())
    }

    /// The subset of moves that capture at least one piece.
    pub fn captures_only(&self) -> LegalMoves {
        LegalMoves {
            map: self
                .iter()
                .filter(Move::is_capture)
                .map(|m| (m.to, m.captures))
                .collect(),
        }
    }

    pub fn destinations(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.map.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.map.iter().map(|(to, captures)| Move {
            to: *to,
            captures: captures.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longer_chain_replaces_shorter_on_same_landing() {
        let mut moves = LegalMoves::new();
        moves.insert((4, 4), vec![PieceId(1)]);
        moves.insert((4, 4), vec![PieceId(2), PieceId(3)]);
        moves.insert((4, 4), vec![PieceId(9)]);
        assert_eq!(moves.captures_for((4, 4)), Some(&[PieceId(2), PieceId(3)][..]));
    }

    #[test]
    fn captures_only_drops_quiet_moves() {
        let mut moves = LegalMoves::new();
        moves.insert((2, 1), vec![]);
        moves.insert((1, 4), vec![PieceId(5)]);
        assert!(moves.has_capture());

        let captures = moves.captures_only();
        assert_eq!(captures.len(), 1);
        assert!(captures.contains((1, 4)));
        assert!(!captures.contains((2, 1)));
    }
}
