//! Error taxonomy for the connection-interception shim (spec.md §7).

use std::io;
use std::sync::Arc;

use thiserror::Error;

/// A pre-read failure while constructing [`crate::PeekedConn`]. Wraps the
/// underlying I/O error; always treated as transient by [`AcceptError`].
#[derive(Debug, Clone, Error)]
#[error("client-hello pre-read failed: {0}")]
pub struct PeekError(#[source] Arc<io::Error>);

impl PeekError {
    #[must_use]
    pub fn io_error(&self) -> &io::Error {
        &self.0
    }
}

impl From<io::Error> for PeekError {
    fn from(err: io::Error) -> Self {
        Self(Arc::new(err))
    }
}

/// An error returned from [`crate::PeekedListener::accept`].
#[derive(Debug, Clone, Error)]
pub enum AcceptError {
    /// The inner acceptor or the pre-read failed for one connection. The
    /// acceptor loop keeps running; callers should retry `accept`.
    #[error("transient accept error: {0}")]
    Transient(#[source] PeekError),
    /// The listener was closed; no further connections will be produced.
    #[error("listener closed")]
    Closed,
}

impl AcceptError {
    /// Whether a standard acceptor loop should treat this as recoverable
    /// (keep calling `accept`) rather than fatal.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, AcceptError::Transient(_))
    }
}

impl From<io::Error> for AcceptError {
    fn from(err: io::Error) -> Self {
        AcceptError::Transient(PeekError::from(err))
    }
}

impl From<PeekError> for AcceptError {
    fn from(err: PeekError) -> Self {
        AcceptError::Transient(err)
    }
}
