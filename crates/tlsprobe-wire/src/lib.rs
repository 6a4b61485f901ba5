//! Leaf-level wire primitives shared by the TLS client-hello decoder and the
//! connection-interception shim: a length-checked byte cursor, TLS record
//! framing, handshake-message re-assembly, and the static cipher-suite /
//! extension lookup tables.
//!
//! Nothing in this crate understands client-hello semantics; it only knows
//! how bytes are framed on the wire.

pub mod cursor;
pub mod record;
pub mod tables;

#[cfg(feature = "async")]
pub mod async_record;

pub use cursor::Reader;
pub use record::{read_handshake_message, read_record_header, HandshakeReader, RecordHeader};
