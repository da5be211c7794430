//! Bridge between one `GameSession` and one peer connection
//!
//! Outbound: every accepted local move and undo is encoded and sent.
//! Inbound: `pump` drains the endpoint and replays remote records
//! through the session's own validated entry points, so a buggy peer
//! cannot corrupt the board any more than a bad local click could.
//!
//! The bridge never stores a session reference; the caller lends the
//! session to `pump` each frame.

use std::net::SocketAddr;
use std::time::Duration;

use tracing::warn;

use crate::board::{Pos, Stone};
use crate::session::{GameSession, MoveOutcome, UndoOutcome};

use super::endpoint::{NetEndpoint, NetError, PeerEvent, Role, CONNECT_TIMEOUT};
use super::protocol::WireRecord;

/// Session-level happenings the UI should surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncNotice {
    /// Peer link established
    Connected(SocketAddr),
    /// Peer link dropped; no reconnection will be attempted
    Disconnected,
    /// Chat line from the peer
    Chat(String),
    /// A remote move completed five-in-a-row; the session has reset
    RemoteWin(Stone),
    /// The peer took back the most recent ply
    RemoteUndo,
}

/// Network synchronization for one game session
pub struct NetSync {
    endpoint: NetEndpoint,
}

impl NetSync {
    /// Start hosting; the host plays Black.
    pub fn host(port: u16) -> Result<Self, NetError> {
        Ok(Self {
            endpoint: NetEndpoint::host(port)?,
        })
    }

    /// Join a host; the joiner plays White.
    pub fn join(host: &str, port: u16) -> Result<Self, NetError> {
        Self::join_with_timeout(host, port, CONNECT_TIMEOUT)
    }

    pub fn join_with_timeout(host: &str, port: u16, timeout: Duration) -> Result<Self, NetError> {
        Ok(Self {
            endpoint: NetEndpoint::join(host, port, timeout)?,
        })
    }

    pub fn role(&self) -> Role {
        self.endpoint.role()
    }

    pub fn is_connected(&self) -> bool {
        self.endpoint.is_connected()
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.endpoint.local_addr()
    }

    /// Transmit an accepted local move (called for Applied and Win
    /// outcomes alike).
    pub fn on_local_move(&mut self, pos: Pos) {
        self.endpoint.send(&WireRecord::Move {
            col: pos.col,
            row: pos.row,
        });
    }

    /// Transmit a local undo.
    pub fn on_local_undo(&mut self) {
        self.endpoint.send(&WireRecord::Undo);
    }

    /// Send a chat line; blank input is dropped.
    pub fn send_chat(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.endpoint.send(&WireRecord::Chat(text.to_string()));
    }

    /// Apply all pending remote events to the session and report what
    /// the UI should announce. Rejected remote moves are logged and
    /// dropped; they cannot mutate state.
    pub fn pump(&mut self, session: &mut GameSession) -> Vec<SyncNotice> {
        let mut notices = Vec::new();
        while let Some(event) = self.endpoint.poll() {
            match event {
                PeerEvent::Connected(peer) => notices.push(SyncNotice::Connected(peer)),
                PeerEvent::Disconnected => notices.push(SyncNotice::Disconnected),
                PeerEvent::Record(WireRecord::Move { col, row }) => {
                    match session.apply_move(col as i32, row as i32) {
                        MoveOutcome::Applied => {}
                        MoveOutcome::Win(winner) => notices.push(SyncNotice::RemoteWin(winner)),
                        MoveOutcome::Rejected(e) => {
                            warn!(col, row, error = %e, "rejected remote move");
                        }
                    }
                }
                PeerEvent::Record(WireRecord::Undo) => {
                    if let UndoOutcome::Undone(_) = session.undo() {
                        notices.push(SyncNotice::RemoteUndo);
                    }
                }
                PeerEvent::Record(WireRecord::Chat(text)) => {
                    notices.push(SyncNotice::Chat(text));
                }
            }
        }
        notices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::GameMode;
    use std::thread;
    use std::time::Instant;

    /// Pump both ends until `done` holds or the deadline passes,
    /// collecting notices per side.
    fn pump_until(
        host: &mut NetSync,
        host_session: &mut GameSession,
        joiner: &mut NetSync,
        joiner_session: &mut GameSession,
        done: impl Fn(&GameSession, &GameSession) -> bool,
    ) -> (Vec<SyncNotice>, Vec<SyncNotice>) {
        let deadline = Instant::now() + Duration::from_secs(2);
        let mut host_notices = Vec::new();
        let mut joiner_notices = Vec::new();
        loop {
            host_notices.extend(host.pump(host_session));
            joiner_notices.extend(joiner.pump(joiner_session));
            if done(host_session, joiner_session) || Instant::now() >= deadline {
                return (host_notices, joiner_notices);
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn connected_sync_pair() -> (NetSync, GameSession, NetSync, GameSession) {
        let mut host = NetSync::host(0).expect("host");
        let port = host.local_addr().expect("addr").port();
        let mut joiner =
            NetSync::join_with_timeout("127.0.0.1", port, Duration::from_secs(2)).expect("join");

        let mut host_session = GameSession::new(GameMode::Network {
            local_color: Stone::Black,
        });
        let joiner_session = GameSession::new(GameMode::Network {
            local_color: Stone::White,
        });

        // Wait for the host to see the peer before any traffic flows.
        let deadline = Instant::now() + Duration::from_secs(2);
        while !host.is_connected() {
            host.pump(&mut host_session);
            assert!(Instant::now() < deadline, "host never saw the joiner connect");
            thread::sleep(Duration::from_millis(5));
        }
        (host, host_session, joiner, joiner_session)
    }

    /// Run one local ply and mirror it to the peer, like the UI does.
    fn play(session: &mut GameSession, sync: &mut NetSync, col: i32, row: i32) -> MoveOutcome {
        let outcome = session.try_local_move(col, row);
        match outcome {
            MoveOutcome::Applied | MoveOutcome::Win(_) => {
                sync.on_local_move(Pos::new(row as u8, col as u8));
            }
            MoveOutcome::Rejected(_) => {}
        }
        outcome
    }

    #[test]
    fn test_remote_move_replays_through_session() {
        let (mut host, mut host_session, mut joiner, mut joiner_session) = connected_sync_pair();

        assert_eq!(play(&mut host_session, &mut host, 3, 4), MoveOutcome::Applied);

        pump_until(
            &mut host,
            &mut host_session,
            &mut joiner,
            &mut joiner_session,
            |_, j| j.move_count() == 1,
        );
        assert_eq!(joiner_session.board.get(Pos::new(4, 3)), Stone::Black);
        assert_eq!(joiner_session.current_turn, Stone::White);
    }

    #[test]
    fn test_boards_stay_consistent_through_a_win() {
        let (mut host, mut host_session, mut joiner, mut joiner_session) = connected_sync_pair();

        // Black builds col 7 rows 3..7, White scatters on row 0. Play
        // each ply locally and wait for it to land on the other side.
        for i in 0..4 {
            assert_eq!(
                play(&mut host_session, &mut host, 7, 3 + i),
                MoveOutcome::Applied
            );
            pump_until(
                &mut host,
                &mut host_session,
                &mut joiner,
                &mut joiner_session,
                |h, j| j.move_count() == h.move_count(),
            );
            assert_eq!(
                play(&mut joiner_session, &mut joiner, i, 0),
                MoveOutcome::Applied
            );
            pump_until(
                &mut host,
                &mut host_session,
                &mut joiner,
                &mut joiner_session,
                |h, j| h.move_count() == j.move_count(),
            );
        }

        // Fifth Black stone wins on both sides.
        assert_eq!(
            play(&mut host_session, &mut host, 7, 7),
            MoveOutcome::Win(Stone::Black)
        );
        let (_, joiner_notices) = pump_until(
            &mut host,
            &mut host_session,
            &mut joiner,
            &mut joiner_session,
            |_, j| j.board.is_board_empty() && j.move_count() == 0,
        );
        assert!(joiner_notices.contains(&SyncNotice::RemoteWin(Stone::Black)));
        assert!(host_session.board.is_board_empty());
        assert!(joiner_session.board.is_board_empty());
        assert_eq!(joiner_session.current_turn, Stone::Black);
    }

    #[test]
    fn test_remote_undo_and_chat() {
        let (mut host, mut host_session, mut joiner, mut joiner_session) = connected_sync_pair();

        play(&mut host_session, &mut host, 7, 7);
        pump_until(
            &mut host,
            &mut host_session,
            &mut joiner,
            &mut joiner_session,
            |_, j| j.move_count() == 1,
        );

        // Host takes the move back and says so.
        host_session.undo();
        host.on_local_undo();
        host.send_chat("my mistake");

        // The chat record is written after the undo, so seeing it
        // means the undo has been applied too.
        let deadline = Instant::now() + Duration::from_secs(2);
        let mut joiner_notices = Vec::new();
        while !joiner_notices.contains(&SyncNotice::Chat("my mistake".to_string())) {
            joiner_notices.extend(joiner.pump(&mut joiner_session));
            assert!(Instant::now() < deadline, "records never arrived");
            thread::sleep(Duration::from_millis(5));
        }
        assert!(joiner_notices.contains(&SyncNotice::RemoteUndo));
        assert!(joiner_session.board.is_board_empty());
        assert_eq!(joiner_session.current_turn, Stone::Black);
    }

    #[test]
    fn test_rejected_remote_move_does_not_mutate() {
        let (mut host, mut host_session, mut joiner, mut joiner_session) = connected_sync_pair();

        play(&mut host_session, &mut host, 7, 7);
        pump_until(
            &mut host,
            &mut host_session,
            &mut joiner,
            &mut joiner_session,
            |_, j| j.move_count() == 1,
        );

        // A duplicate of the same record arrives (e.g. a confused
        // peer): the occupied cell rejects it, state unchanged. The
        // chat record behind it proves the duplicate was processed,
        // since the stream delivers in order.
        host.on_local_move(Pos::new(7, 7));
        host.send_chat("done");
        let deadline = Instant::now() + Duration::from_secs(2);
        let mut joiner_notices = Vec::new();
        while !joiner_notices.contains(&SyncNotice::Chat("done".to_string())) {
            joiner_notices.extend(joiner.pump(&mut joiner_session));
            assert!(Instant::now() < deadline, "chat marker never arrived");
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(joiner_session.move_count(), 1);
        assert_eq!(joiner_session.board.stone_count(), 1);
    }
}
