//! Connection-interception shim (C9, C10): peeks a client-hello off a live
//! async byte stream without consuming it, so a standard TLS implementation
//! layered on top still sees a complete, untouched handshake.
//!
//! This crate never decodes the bytes it captures — decoding the typed tree
//! is [`tlsprobe_hello`](../tlsprobe_hello/index.html)'s job, deferred to
//! whichever consumer retrieves [`PeekedConn::client_hello_bytes`], per
//! spec.md §7's "decoding is deferred to whoever retrieves the bytes from
//! context" error-propagation policy.

pub mod acceptor;
pub mod error;
pub mod peek;

pub use acceptor::PeekedListener;
pub use error::{AcceptError, PeekError};
pub use peek::PeekedConn;
