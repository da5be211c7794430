//! One-peer TCP endpoint for the networked mode
//!
//! The host binds a listen socket and accepts exactly one inbound
//! connection; the joiner dials out with a bounded timeout. Either way
//! the established stream gets a dedicated reader thread that decodes
//! whole lines and funnels them into an mpsc channel, which the UI
//! thread drains between frames with `poll`. Sends are fire-and-forget
//! writes on the caller's thread.
//!
//! There is no reconnection: once the peer goes away the endpoint stays
//! `Disconnected` and sends become no-ops until a new session is set up.

use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::protocol::WireRecord;

/// Default listen port for the host role
pub const DEFAULT_PORT: u16 = 12345;

/// How long an outbound connect may block before giving up
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Which side of the connection this endpoint is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Host,
    Joiner,
    Disconnected,
}

/// Connection setup failures. All are reported to the user and none are
/// retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("invalid address: {0}")]
    InvalidAddr(String),
    #[error("failed to bind listen socket: {0}")]
    Bind(std::io::Error),
    #[error("failed to connect: {0}")]
    Connect(std::io::Error),
    #[error("connection attempt timed out")]
    Timeout,
}

/// What `poll` hands to the caller
#[derive(Debug)]
pub enum PeerEvent {
    /// Peer link established
    Connected(SocketAddr),
    /// One decoded record from the peer
    Record(WireRecord),
    /// The connection dropped; the endpoint is now `Disconnected`
    Disconnected,
}

/// Channel payload from the accept/reader threads. Carries the write
/// half of the stream along with the host's Connected signal, since the
/// accepting thread is the one that owns the stream first.
enum Signal {
    Connected { peer: SocketAddr, writer: TcpStream },
    Record(WireRecord),
    Closed,
}

/// Endpoint owning at most one active peer connection
pub struct NetEndpoint {
    role: Role,
    events: Receiver<Signal>,
    writer: Option<TcpStream>,
    local_addr: Option<SocketAddr>,
}

impl NetEndpoint {
    /// Bind `0.0.0.0:port` and wait (in the background) for exactly one
    /// inbound connection. Once it is accepted the listener is closed,
    /// so further connection attempts are refused while the first peer
    /// is active.
    pub fn host(port: u16) -> Result<Self, NetError> {
        let listener = TcpListener::bind(("0.0.0.0", port)).map_err(NetError::Bind)?;
        let local_addr = listener.local_addr().ok();
        info!(port = local_addr.map(|a| a.port()), "listening for a peer");

        let (tx, rx) = channel();
        thread::spawn(move || accept_one(listener, tx));

        Ok(Self {
            role: Role::Host,
            events: rx,
            writer: None,
            local_addr,
        })
    }

    /// Connect out to `host:port`, blocking up to `timeout`.
    pub fn join(host: &str, port: u16, timeout: Duration) -> Result<Self, NetError> {
        let addr = (host, port)
            .to_socket_addrs()
            .map_err(|_| NetError::InvalidAddr(format!("{host}:{port}")))?
            .next()
            .ok_or_else(|| NetError::InvalidAddr(format!("{host}:{port}")))?;

        let stream = TcpStream::connect_timeout(&addr, timeout).map_err(|e| {
            if e.kind() == std::io::ErrorKind::TimedOut {
                NetError::Timeout
            } else {
                NetError::Connect(e)
            }
        })?;
        stream.set_nodelay(true).ok();
        info!(%addr, "connected to host");

        let writer = stream.try_clone().map_err(NetError::Connect)?;
        let local_addr = stream.local_addr().ok();
        let (tx, rx) = channel();
        thread::spawn(move || read_lines(stream, tx));

        Ok(Self {
            role: Role::Joiner,
            events: rx,
            writer: Some(writer),
            local_addr,
        })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_connected(&self) -> bool {
        self.writer.is_some()
    }

    /// Local socket address; for a host this carries the actual listen
    /// port (useful when binding port 0).
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Drain one pending event without blocking. Call repeatedly per
    /// frame until it returns `None`.
    pub fn poll(&mut self) -> Option<PeerEvent> {
        match self.events.try_recv() {
            Ok(Signal::Connected { peer, writer }) => {
                self.writer = Some(writer);
                Some(PeerEvent::Connected(peer))
            }
            Ok(Signal::Record(record)) => Some(PeerEvent::Record(record)),
            Ok(Signal::Closed) => {
                self.drop_connection();
                Some(PeerEvent::Disconnected)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // Reader thread gone without a Closed signal; report the
                // drop once.
                if self.role != Role::Disconnected {
                    self.drop_connection();
                    Some(PeerEvent::Disconnected)
                } else {
                    None
                }
            }
        }
    }

    /// Fire-and-forget send. A no-op while no peer is connected; a
    /// write failure drops the connection.
    pub fn send(&mut self, record: &WireRecord) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        if let Err(e) = writer.write_all(record.encode().as_bytes()) {
            warn!(error = %e, "peer write failed, dropping connection");
            self.drop_connection();
        }
    }

    /// Shut the connection down locally.
    pub fn close(&mut self) {
        if let Some(writer) = self.writer.take() {
            let _ = writer.shutdown(Shutdown::Both);
        }
        self.role = Role::Disconnected;
    }

    fn drop_connection(&mut self) {
        self.writer = None;
        self.role = Role::Disconnected;
    }
}

impl Drop for NetEndpoint {
    fn drop(&mut self) {
        self.close();
    }
}

/// Accept a single connection, then become its reader. The listener is
/// dropped before the Connected signal is delivered, so by the time the
/// caller learns about the peer, extra connection attempts are already
/// being refused.
fn accept_one(listener: TcpListener, tx: Sender<Signal>) {
    let (stream, peer) = match listener.accept() {
        Ok(accepted) => accepted,
        Err(e) => {
            warn!(error = %e, "accept failed");
            let _ = tx.send(Signal::Closed);
            return;
        }
    };
    drop(listener);
    stream.set_nodelay(true).ok();
    info!(%peer, "peer connected");

    let writer = match stream.try_clone() {
        Ok(writer) => writer,
        Err(e) => {
            warn!(error = %e, "failed to clone stream");
            let _ = tx.send(Signal::Closed);
            return;
        }
    };
    if tx.send(Signal::Connected { peer, writer }).is_err() {
        return;
    }
    read_lines(stream, tx);
}

/// Deliver decoded lines until EOF or error, then signal the drop.
fn read_lines(stream: TcpStream, tx: Sender<Signal>) {
    let reader = BufReader::new(stream);
    for line in reader.lines() {
        match line {
            Ok(line) => {
                let Some(record) = WireRecord::decode(&line) else {
                    continue;
                };
                debug!(?record, "received record");
                if tx.send(Signal::Record(record)).is_err() {
                    return;
                }
            }
            Err(e) => {
                debug!(error = %e, "peer read failed");
                break;
            }
        }
    }
    let _ = tx.send(Signal::Closed);
}
