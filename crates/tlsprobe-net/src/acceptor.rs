//! Peek-wrapped acceptor (C10): wraps a [`tokio::net::TcpListener`] so every
//! accepted connection already carries its pre-read client-hello.
//!
//! The accept call must not block on handshake reads from other pending
//! connections (spec.md §5), so each accepted socket's pre-read runs on its
//! own spawned task; results are handed back to `accept()` through a bounded
//! rendezvous channel. Closing the listener drops the sender side, which
//! makes any further `accept()` return [`AcceptError::Closed`] promptly and
//! causes in-flight pre-reads that complete afterward to have their
//! connections dropped (and thus closed) rather than delivered.

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::AcceptError;
use crate::peek::PeekedConn;

type AcceptResult = Result<(PeekedConn<TcpStream>, SocketAddr), AcceptError>;

/// Wraps a [`TcpListener`]; `accept()` yields connections whose client-hello
/// has already been pre-read (see [`PeekedConn`]).
pub struct PeekedListener {
    rx: mpsc::Receiver<AcceptResult>,
    accept_task: JoinHandle<()>,
}

impl PeekedListener {
    /// Spawns the background acceptor task and returns immediately. The
    /// channel capacity bounds how many completed pre-reads can queue up
    /// waiting for a caller to `accept()` them; it does not bound how many
    /// pre-reads run concurrently (that's governed by the host's own
    /// connection limit, per spec.md §5).
    #[must_use]
    pub fn new(inner: TcpListener) -> Self {
        let (tx, rx) = mpsc::channel(64);
        let accept_task = tokio::spawn(Self::run(inner, tx));
        Self { rx, accept_task }
    }

    async fn run(inner: TcpListener, tx: mpsc::Sender<AcceptResult>) {
        loop {
            let accepted = inner.accept().await;
            let tx = tx.clone();
            match accepted {
                Ok((stream, addr)) => {
                    tokio::spawn(async move {
                        let result = PeekedConn::new(stream)
                            .await
                            .map(|conn| (conn, addr))
                            .map_err(AcceptError::from);
                        if tx.send(result).await.is_err() {
                            tracing::debug!(
                                peer = %addr,
                                "listener closed before pre-read could be delivered; dropping connection"
                            );
                        }
                    });
                }
                Err(err) => {
                    tracing::warn!(error = %err, "inner acceptor error");
                    if tx.send(Err(AcceptError::from(err))).await.is_err() {
                        return;
                    }
                }
            }
        }
    }

    /// Waits for the next pre-read connection, or a transient error from
    /// the inner acceptor. Returns [`AcceptError::Closed`] once [`Self::close`]
    /// has been called and all in-flight work has drained.
    pub async fn accept(&mut self) -> AcceptResult {
        match self.rx.recv().await {
            Some(result) => result,
            None => Err(AcceptError::Closed),
        }
    }

    /// Terminates the acceptor: stops the background accept loop and causes
    /// any subsequent `accept()` to return [`AcceptError::Closed`]. In-flight
    /// pre-reads are abandoned; any that succeed afterward are dropped
    /// (closing their socket) because nothing is left to receive them.
    pub fn close(self) {
        self.accept_task.abort();
    }
}
