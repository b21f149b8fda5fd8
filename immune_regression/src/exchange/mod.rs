//! Ring-topology exchange of candidate batches over TCP.
//!
//! Every node serves a snapshot of the batch it offers to whoever connects,
//! and fetches the batch offered by its peers one at a time, in ring order.
//! Both sides run as background tasks on the current tokio runtime; the
//! search only ever touches the two in-memory buffers.

mod peer;
mod ring;
mod wire;

use core::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

pub use peer::PeerExchanger;
pub use ring::RingTopology;
pub use wire::{REQUEST_TOKEN, decode_batch, encode_batch, read_message, write_message};

/// How a reply is delimited on the wire. Both ends must agree.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Framing {
    /// The payload runs until the server closes the connection.
    #[default]
    CloseDelimited,
    /// A big-endian `u32` length followed by that many payload bytes.
    LengthPrefixed,
}

#[derive(Clone, Debug)]
pub struct ExchangeConfig {
    pub listen: SocketAddr,
    /// Peers in the order they are fetched from.
    pub peers: Vec<SocketAddr>,
    pub framing: Framing,
    /// Pause after a failed fetch before trying the next peer.
    pub retry_delay: Duration,
    /// Pause after a successful fetch.
    pub fetch_interval: Duration,
    /// Upper bound on one fetch or one served request; unbounded when `None`.
    pub fetch_timeout: Option<Duration>,
    pub max_frame_len: usize,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from((Ipv4Addr::LOCALHOST, 5000)),
            peers: Vec::new(),
            framing: Framing::default(),
            retry_delay: Duration::from_millis(200),
            fetch_interval: Duration::from_millis(50),
            fetch_timeout: None,
            max_frame_len: 16 * 1024 * 1024,
        }
    }
}

impl ExchangeConfig {
    /// Listen on the node's own address and fetch from the rest of the ring,
    /// upstream first.
    pub fn for_ring(ring: &RingTopology) -> Self {
        Self {
            listen: ring.listen_addr(),
            peers: ring.peer_addrs(),
            ..Default::default()
        }
    }
}

#[derive(Debug)]
pub enum ExchangeError {
    Io(std::io::Error),
    Decode(serde_json::Error),
    FrameTooLarge { len: usize, max: usize },
    Timeout(Duration),
    InvalidTopology { index: usize, count: usize, base_port: u16 },
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeError::Io(e) => write!(f, "i/o error: {e}"),
            ExchangeError::Decode(e) => write!(f, "malformed batch: {e}"),
            ExchangeError::FrameTooLarge { len, max } => {
                write!(f, "message of {len} bytes exceeds the {max} byte limit")
            }
            ExchangeError::Timeout(d) => write!(f, "timed out after {d:?}"),
            ExchangeError::InvalidTopology {
                index,
                count,
                base_port,
            } => write!(
                f,
                "node {index} of {count} does not fit a ring starting at port {base_port}"
            ),
        }
    }
}

impl std::error::Error for ExchangeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExchangeError::Io(e) => Some(e),
            ExchangeError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExchangeError {
    fn from(e: std::io::Error) -> Self {
        ExchangeError::Io(e)
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(e: serde_json::Error) -> Self {
        ExchangeError::Decode(e)
    }
}
