//! Game session: turn management, validated moves, undo, reset
//!
//! `GameSession` is the single source of truth for one game. Both local
//! input and remote records from the network bridge flow through the same
//! `apply_move`/`undo` entry points, so the invariants hold no matter
//! where a move originated.

use crate::board::{Board, Pos, Stone};
use crate::history::{Move, MoveHistory};
use crate::rules;

/// How this session is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Two players alternating on one machine
    Hotseat,
    /// Two machines over a socket; this side plays `local_color`
    /// (the host plays Black, the joiner White)
    Network { local_color: Stone },
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::Hotseat
    }
}

/// Why a move was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("coordinates outside the board")]
    OutOfRange,
    #[error("cell is already occupied")]
    CellOccupied,
    #[error("not your turn")]
    NotYourTurn,
}

/// Result of an attempted move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Stone placed, turn flipped
    Applied,
    /// Stone completed five-in-a-row; the session has already reset.
    /// Carries the winner, recorded before the reset.
    Win(Stone),
    /// Nothing changed
    Rejected(MoveError),
}

/// Result of an undo request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    /// The returned move was removed from board and history
    Undone(Move),
    /// No moves recorded; nothing changed
    Empty,
}

/// Main game state
pub struct GameSession {
    pub board: Board,
    pub history: MoveHistory,
    pub current_turn: Stone,
    pub mode: GameMode,
    pub last_move: Option<Pos>,
}

impl GameSession {
    pub fn new(mode: GameMode) -> Self {
        Self {
            board: Board::new(),
            history: MoveHistory::new(),
            current_turn: Stone::Black,
            mode,
            last_move: None,
        }
    }

    /// Clear board and history, Black to move
    pub fn reset(&mut self) {
        self.board.reset();
        self.history.clear();
        self.current_turn = Stone::Black;
        self.last_move = None;
    }

    /// Check whether the side to move is controlled from this machine
    pub fn is_local_turn(&self) -> bool {
        match self.mode {
            GameMode::Hotseat => true,
            GameMode::Network { local_color } => self.current_turn == local_color,
        }
    }

    /// UI entry point: apply a move for the local player.
    ///
    /// In networked mode the click is rejected outright when it is the
    /// remote side's turn; remote moves bypass this gate and go through
    /// `apply_move` directly.
    pub fn try_local_move(&mut self, col: i32, row: i32) -> MoveOutcome {
        if !self.is_local_turn() {
            return MoveOutcome::Rejected(MoveError::NotYourTurn);
        }
        self.apply_move(col, row)
    }

    /// Apply a move for the side to move.
    ///
    /// On a winning move the session resets before returning; the caller
    /// announces the winner carried in the outcome.
    pub fn apply_move(&mut self, col: i32, row: i32) -> MoveOutcome {
        if !Pos::is_valid(row, col) {
            return MoveOutcome::Rejected(MoveError::OutOfRange);
        }
        let pos = Pos::new(row as u8, col as u8);
        if !self.board.is_empty(pos) {
            return MoveOutcome::Rejected(MoveError::CellOccupied);
        }

        let stone = self.current_turn;
        self.board.place_stone(pos, stone);
        self.history.push(Move { pos, stone });
        self.last_move = Some(pos);

        if rules::has_five_at_pos(&self.board, pos, stone) {
            // Announce-and-restart: the winning move stays recorded only
            // until the reset discards it along with the rest.
            self.reset();
            return MoveOutcome::Win(stone);
        }

        self.current_turn = stone.opponent();
        MoveOutcome::Applied
    }

    /// Undo exactly one ply. The undone move's player becomes the side
    /// to move again.
    pub fn undo(&mut self) -> UndoOutcome {
        match self.history.pop() {
            Some(mv) => {
                self.board.remove_stone(mv.pos);
                self.current_turn = mv.stone;
                self.last_move = self.history.last().map(|m| m.pos);
                UndoOutcome::Undone(mv)
            }
            None => UndoOutcome::Empty,
        }
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_sets_cell_and_flips_turn() {
        let mut session = GameSession::new(GameMode::Hotseat);
        assert_eq!(session.current_turn, Stone::Black);

        assert_eq!(session.apply_move(7, 7), MoveOutcome::Applied);
        assert_eq!(session.board.get(Pos::new(7, 7)), Stone::Black);
        assert_eq!(session.current_turn, Stone::White);
        assert_eq!(session.last_move, Some(Pos::new(7, 7)));

        assert_eq!(session.apply_move(8, 7), MoveOutcome::Applied);
        assert_eq!(session.board.get(Pos::new(7, 8)), Stone::White);
        assert_eq!(session.current_turn, Stone::Black);
    }

    #[test]
    fn test_out_of_range_rejected_idempotently() {
        let mut session = GameSession::new(GameMode::Hotseat);
        for _ in 0..3 {
            assert_eq!(
                session.apply_move(15, 0),
                MoveOutcome::Rejected(MoveError::OutOfRange)
            );
            assert_eq!(
                session.apply_move(-1, 7),
                MoveOutcome::Rejected(MoveError::OutOfRange)
            );
        }
        assert!(session.board.is_board_empty());
        assert_eq!(session.current_turn, Stone::Black);
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn test_occupied_cell_rejected_idempotently() {
        let mut session = GameSession::new(GameMode::Hotseat);
        assert_eq!(session.apply_move(3, 4), MoveOutcome::Applied);

        for _ in 0..3 {
            assert_eq!(
                session.apply_move(3, 4),
                MoveOutcome::Rejected(MoveError::CellOccupied)
            );
        }
        // Still White to move, board unchanged
        assert_eq!(session.current_turn, Stone::White);
        assert_eq!(session.board.stone_count(), 1);
        assert_eq!(session.move_count(), 1);
    }

    #[test]
    fn test_win_resets_session() {
        let mut session = GameSession::new(GameMode::Hotseat);

        // Black builds a vertical line at col 7, White answers far away.
        // After (7,10) Black has only four in a row.
        let black_rows = [7, 8, 9, 10];
        for (i, row) in black_rows.iter().enumerate() {
            assert_eq!(session.apply_move(7, *row), MoveOutcome::Applied);
            assert_eq!(session.apply_move(0, i as i32), MoveOutcome::Applied);
        }
        assert_eq!(session.board.stone_count(), 8);

        // The fifth stone wins; session resets to a fresh game.
        assert_eq!(session.apply_move(7, 11), MoveOutcome::Win(Stone::Black));
        assert!(session.board.is_board_empty());
        assert!(session.history.is_empty());
        assert_eq!(session.current_turn, Stone::Black);
        assert_eq!(session.last_move, None);
    }

    #[test]
    fn test_white_can_win_too() {
        let mut session = GameSession::new(GameMode::Hotseat);
        // Black scatters, White builds a horizontal line on row 0.
        for i in 0..4 {
            assert_eq!(session.apply_move(i, 14), MoveOutcome::Applied);
            assert_eq!(session.apply_move(i, 0), MoveOutcome::Applied);
        }
        assert_eq!(session.apply_move(10, 14), MoveOutcome::Applied);
        assert_eq!(session.apply_move(4, 0), MoveOutcome::Win(Stone::White));
    }

    #[test]
    fn test_undo_is_exact_inverse_of_apply() {
        let mut session = GameSession::new(GameMode::Hotseat);
        session.apply_move(7, 7);
        session.apply_move(8, 8);

        let undone = session.undo();
        assert_eq!(
            undone,
            UndoOutcome::Undone(Move {
                pos: Pos::new(8, 8),
                stone: Stone::White,
            })
        );
        // White is to move again, the cell is free, last_move points at
        // the remaining stone.
        assert_eq!(session.current_turn, Stone::White);
        assert_eq!(session.board.get(Pos::new(8, 8)), Stone::Empty);
        assert_eq!(session.last_move, Some(Pos::new(7, 7)));

        session.undo();
        assert_eq!(session.current_turn, Stone::Black);
        assert!(session.board.is_board_empty());
        assert_eq!(session.last_move, None);
    }

    #[test]
    fn test_undo_fresh_session_is_noop() {
        let mut session = GameSession::new(GameMode::Hotseat);
        assert_eq!(session.undo(), UndoOutcome::Empty);
        assert_eq!(session.current_turn, Stone::Black);
        assert!(session.board.is_board_empty());
    }

    #[test]
    fn test_network_turn_gating() {
        // Joiner plays White: Black's opening move is not ours to make.
        let mut session = GameSession::new(GameMode::Network {
            local_color: Stone::White,
        });
        assert_eq!(
            session.try_local_move(7, 7),
            MoveOutcome::Rejected(MoveError::NotYourTurn)
        );
        assert!(session.board.is_board_empty());

        // Remote Black move arrives through the ungated entry point.
        assert_eq!(session.apply_move(7, 7), MoveOutcome::Applied);
        // Now it is our turn.
        assert_eq!(session.try_local_move(8, 7), MoveOutcome::Applied);
    }

    #[test]
    fn test_hotseat_every_turn_is_local() {
        let mut session = GameSession::new(GameMode::Hotseat);
        assert!(session.is_local_turn());
        session.apply_move(0, 0);
        assert!(session.is_local_turn());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = GameSession::new(GameMode::Hotseat);
        session.apply_move(5, 5);
        session.apply_move(6, 6);
        session.reset();

        assert!(session.board.is_board_empty());
        assert!(session.history.is_empty());
        assert_eq!(session.current_turn, Stone::Black);
        assert_eq!(session.last_move, None);
    }
}
