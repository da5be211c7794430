//! Wire protocol: newline-delimited UTF-8 text records
//!
//! One record per line over a single reliable stream:
//! - move: `"<col>,<row>"`, e.g. `"7,7"`
//! - undo: the literal `"undo"`
//! - anything else: free-text chat
//!
//! No handshake, no version negotiation, no heartbeats. Decoding never
//! fails: a line that is neither the undo sentinel nor two integers is
//! surfaced as chat, and empty lines are dropped. Range validation of
//! move coordinates is left to the session, which rejects illegal
//! placements no matter where they came from.

/// The undo record
pub const UNDO_SENTINEL: &str = "undo";

/// One decoded line from the peer, or one outgoing record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireRecord {
    /// A stone placement, board coordinates in [0,15) when legal
    Move { col: u8, row: u8 },
    /// Take back the most recent ply
    Undo,
    /// Free-text chat line
    Chat(String),
}

impl WireRecord {
    /// Encode as a newline-terminated record. Inner newlines in chat
    /// text are stripped so one record stays one line.
    pub fn encode(&self) -> String {
        match self {
            WireRecord::Move { col, row } => format!("{},{}\n", col, row),
            WireRecord::Undo => format!("{}\n", UNDO_SENTINEL),
            WireRecord::Chat(text) => {
                let mut line: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
                line.push('\n');
                line
            }
        }
    }

    /// Decode one received line. Returns `None` for blank lines.
    pub fn decode(line: &str) -> Option<WireRecord> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if line == UNDO_SENTINEL {
            return Some(WireRecord::Undo);
        }
        if let Some((col, row)) = line.split_once(',') {
            if let (Ok(col), Ok(row)) = (col.trim().parse::<u8>(), row.trim().parse::<u8>()) {
                return Some(WireRecord::Move { col, row });
            }
        }
        Some(WireRecord::Chat(line.to_string()))
    }
}
