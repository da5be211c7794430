//! Two-mode Gomoku: local hot-seat and two-player networked play
//!
//! A 15x15 five-in-a-row game that can be played by two people at one
//! machine or across a direct TCP connection (one side hosts, the other
//! joins). Both modes share one game-logic kernel; in networked play
//! each machine holds its own board copy and the peers exchange
//! newline-delimited text records to stay consistent.
//!
//! # Architecture
//!
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Win detection (five-in-a-row)
//! - [`history`]: Move history stack for undo
//! - [`session`]: Game session — turns, validated moves, undo, reset
//! - [`net`]: Wire protocol, peer endpoint and session bridge
//! - [`ui`]: egui application shell
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{GameMode, GameSession, MoveOutcome, Pos, Stone};
//!
//! let mut session = GameSession::new(GameMode::Hotseat);
//!
//! // Black opens in the center, White answers
//! assert_eq!(session.apply_move(7, 7), MoveOutcome::Applied);
//! assert_eq!(session.apply_move(7, 8), MoveOutcome::Applied);
//! assert_eq!(session.board.get(Pos::new(7, 7)), Stone::Black);
//!
//! // Take the last move back; White is to move again
//! session.undo();
//! assert_eq!(session.current_turn, Stone::White);
//! ```
//!
//! In networked play the same entry points apply remote moves, so a
//! peer cannot bypass validation:
//!
//! - local click → `try_local_move` (gated to the local color) → send
//! - received record → `apply_move`/`undo` → redraw

pub mod board;
pub mod history;
pub mod net;
pub mod rules;
pub mod session;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE};
pub use history::{Move, MoveHistory};
pub use net::{NetSync, SyncNotice};
pub use session::{GameMode, GameSession, MoveError, MoveOutcome, UndoOutcome};
