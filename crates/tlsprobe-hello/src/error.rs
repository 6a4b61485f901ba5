//! Internal decode error, collapsed to a single `None` sentinel at the crate
//! boundary.
//!
//! [`crate::decode::unmarshal_client_hello`] stays a pure `Option<ClientHello>`
//! per the library surface spec.md defines: callers never see which step
//! failed, only that the bytes were not a valid client-hello. The internal
//! [`DecodeError`] exists purely so the decode steps can use `?` like any
//! other multi-step Rust parser instead of a pyramid of `if let ... else`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("truncated client-hello")]
    Truncated,
    #[error("handshake type {0} is not client_hello (1)")]
    WrongHandshakeType(u8),
    #[error("trailing bytes after the handshake message body")]
    TrailingAfterMessage,
    #[error("trailing bytes after the client-hello body")]
    TrailingAfterBody,
    #[error("trailing bytes after the extensions block")]
    TrailingAfterExtensions,
}
