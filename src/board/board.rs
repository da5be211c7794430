//! Board structure backed by per-color bitboards

use super::bitboard::Bitboard;
use super::{Pos, Stone, BOARD_SIZE};

/// Game board: one bitboard per color.
///
/// Invariant: a position is set in at most one of the two bitboards;
/// the mutation methods below preserve this.
#[derive(Debug, Clone, Default)]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone. No occupancy or turn validation (caller's
    /// responsibility); use `GameSession::apply_move` for game moves.
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => {}
        }
    }

    /// Remove a stone
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.black.clear(pos);
        self.white.clear(pos);
    }

    /// Set every cell back to empty
    #[inline]
    pub fn reset(&mut self) {
        self.black = Bitboard::new();
        self.white = Bitboard::new();
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }
}
