//! Client-hello decoder and JA3-style fingerprint derivation.
//!
//! Builds on [`tlsprobe_wire`]'s byte cursor and static lookup tables to
//! strictly validate a TLS client-hello handshake message into a typed tree
//! ([`model::ClientHello`]), then derives a canonical fingerprint string and
//! its MD5 digest from that tree. Nothing here touches a live connection;
//! that's [`tlsprobe_net`](../tlsprobe_net/index.html)'s job.

pub mod decode;
pub mod error;
pub mod extensions;
pub mod fingerprint;
pub mod model;

#[cfg(feature = "serde")]
pub mod json;

pub use decode::unmarshal_client_hello;
pub use fingerprint::{ja3_fingerprint, ja3_string};
pub use model::ClientHello;
