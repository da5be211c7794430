//! Network play: wire protocol, peer endpoint, session bridge
//!
//! Two machines hold independent copies of the game; this module keeps
//! them consistent by mirroring accepted local moves and undos to the
//! peer as newline-delimited text records, and replaying received
//! records through the same validated `GameSession` entry points used
//! for local input.

pub mod endpoint;
pub mod protocol;
pub mod sync;

// Re-exports
pub use endpoint::{NetEndpoint, NetError, PeerEvent, Role, CONNECT_TIMEOUT, DEFAULT_PORT};
pub use protocol::WireRecord;
pub use sync::{NetSync, SyncNotice};
