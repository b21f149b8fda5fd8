use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use immune_expressions::Expression;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::wire::{REQUEST_TOKEN, decode_batch, encode_batch, read_message, write_message};
use super::{ExchangeConfig, ExchangeError, Framing};
use crate::migration::Exchanger;

/// Requests are read once and ignored.
const MAX_REQUEST_LEN: usize = 1024;

/// A silent client gets its reply after this long instead of holding up the
/// accept loop.
const REQUEST_READ_DEADLINE: Duration = Duration::from_millis(500);

type Snapshot = Arc<Vec<Expression>>;

#[derive(Debug, Default)]
struct Buffers {
    offered: Mutex<Snapshot>,
    received: Mutex<Snapshot>,
}

impl Buffers {
    fn offered(&self) -> Snapshot {
        self.offered.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn received(&self) -> Snapshot {
        self.received.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_offered(&self, batch: Vec<Expression>) {
        *self.offered.lock().unwrap_or_else(PoisonError::into_inner) = Arc::new(batch);
    }

    fn set_received(&self, batch: Vec<Expression>) {
        *self.received.lock().unwrap_or_else(PoisonError::into_inner) = Arc::new(batch);
    }
}

/// [`Exchanger`] backed by a TCP listener and a round-robin fetch loop.
///
/// Must be created inside a tokio runtime. Dropping it stops both
/// background tasks.
#[derive(Debug)]
pub struct PeerExchanger {
    local_addr: SocketAddr,
    buffers: Arc<Buffers>,
    serve_task: JoinHandle<()>,
    fetch_task: JoinHandle<()>,
}

impl PeerExchanger {
    pub async fn bind(config: ExchangeConfig) -> Result<Self, ExchangeError> {
        let listener = TcpListener::bind(config.listen).await?;
        Self::from_listener(listener, config)
    }

    /// Use an already bound listener; `config.listen` is ignored.
    pub fn from_listener(listener: TcpListener, config: ExchangeConfig) -> Result<Self, ExchangeError> {
        let local_addr = listener.local_addr()?;
        info!(addr = %local_addr, peers = config.peers.len(), framing = ?config.framing, "exchange listening");

        let buffers = Arc::new(Buffers::default());
        let config = Arc::new(config);
        let serve_task = tokio::spawn(serve_loop(listener, buffers.clone(), config.clone()));
        let fetch_task = tokio::spawn(fetch_loop(buffers.clone(), config));
        Ok(Self {
            local_addr,
            buffers,
            serve_task,
            fetch_task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn offered(&self) -> Arc<Vec<Expression>> {
        self.buffers.offered()
    }

    pub fn received(&self) -> Arc<Vec<Expression>> {
        self.buffers.received()
    }

    pub fn shutdown(&self) {
        self.serve_task.abort();
        self.fetch_task.abort();
    }
}

impl Drop for PeerExchanger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Exchanger for PeerExchanger {
    fn publish(&self, batch: Vec<Expression>) {
        self.buffers.set_offered(batch);
    }

    fn fetch_latest(&self) -> Vec<Expression> {
        self.buffers.received().as_ref().clone()
    }
}

async fn with_timeout<T>(
    limit: Option<Duration>,
    fut: impl Future<Output = Result<T, ExchangeError>>,
) -> Result<T, ExchangeError> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| ExchangeError::Timeout(limit))?,
        None => fut.await,
    }
}

async fn serve_loop(listener: TcpListener, buffers: Arc<Buffers>, config: Arc<ExchangeConfig>) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "accept failed");
                tokio::time::sleep(config.retry_delay).await;
                continue;
            }
        };
        let served = with_timeout(config.fetch_timeout, serve_one(stream, &buffers, config.framing)).await;
        match served {
            Ok(n) => debug!(peer = %peer, expressions = n, "served batch"),
            Err(e) => warn!(peer = %peer, error = %e, "serving batch failed"),
        }
    }
}

async fn serve_one(mut stream: TcpStream, buffers: &Buffers, framing: Framing) -> Result<usize, ExchangeError> {
    let mut request = [0u8; MAX_REQUEST_LEN];
    // One read: returns on the first bytes or on EOF, whether or not the
    // client half-closed.
    if let Ok(read) = tokio::time::timeout(REQUEST_READ_DEADLINE, stream.read(&mut request)).await {
        read?;
    }
    let snapshot = buffers.offered();
    let payload = encode_batch(&snapshot)?;
    write_message(&mut stream, &payload, framing).await?;
    stream.shutdown().await?;
    Ok(snapshot.len())
}

async fn fetch_loop(buffers: Arc<Buffers>, config: Arc<ExchangeConfig>) {
    if config.peers.is_empty() {
        return;
    }
    let mut next = 0;
    loop {
        let peer = config.peers[next];
        next = (next + 1) % config.peers.len();
        match with_timeout(config.fetch_timeout, fetch_one(peer, &config)).await {
            Ok(batch) => {
                debug!(peer = %peer, expressions = batch.len(), "fetched batch");
                buffers.set_received(batch);
                tokio::time::sleep(config.fetch_interval).await;
            }
            Err(e) => {
                warn!(peer = %peer, error = %e, "fetch failed");
                tokio::time::sleep(config.retry_delay).await;
            }
        }
    }
}

async fn fetch_one(peer: SocketAddr, config: &ExchangeConfig) -> Result<Vec<Expression>, ExchangeError> {
    let mut stream = TcpStream::connect(peer).await?;
    stream.write_all(REQUEST_TOKEN).await?;
    stream.shutdown().await?;
    let payload = read_message(&mut stream, config.framing, config.max_frame_len).await?;
    decode_batch(&payload)
}
