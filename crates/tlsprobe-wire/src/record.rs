//! Transport record framing and handshake-message re-assembly.
//!
//! A TLS record on the wire looks like `[type:1][ver:2][len:2][payload:len]`.
//! [`HandshakeReader`] adapts any blocking [`std::io::Read`] source into one
//! that yields only the bytes of content-type-22 (handshake) records,
//! silently draining and discarding any interleaved records of other types
//! (e.g. change-cipher-spec, alert). This isolates [`read_handshake_message`]
//! from transport-record fragmentation.

use std::io::{self, Read};

/// Content type marking a handshake record (RFC 8446 §5.1).
pub const CONTENT_TYPE_HANDSHAKE: u8 = 22;

/// Handshake message type marking a client-hello (RFC 8446 §4.1.2).
pub const HANDSHAKE_TYPE_CLIENT_HELLO: u8 = 1;

/// The `(content_type, length)` pair parsed from a 5-byte record header. No
/// validation is performed on either field: any content type is legal at this
/// layer, and the legacy version bytes are ignored entirely.
pub struct RecordHeader {
    pub content_type: u8,
    pub length: u16,
}

/// Parses one 5-byte transport record header from `reader`.
pub fn read_record_header<R: Read>(reader: &mut R) -> io::Result<RecordHeader> {
    let mut buf = [0u8; 5];
    reader.read_exact(&mut buf)?;
    Ok(RecordHeader {
        content_type: buf[0],
        // buf[1..3] is the legacy record version; ignored per spec.
        length: u16::from_be_bytes([buf[3], buf[4]]),
    })
}

/// Adapts a blocking byte stream into one that yields only handshake-content
/// bytes. Records of any other content type are fully drained and dropped.
pub struct HandshakeReader<R> {
    reader: R,
    bytes_remaining: usize,
}

impl<R: Read> HandshakeReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            bytes_remaining: 0,
        }
    }

    /// Reads one 4-byte handshake header (1 byte type, 3 byte big-endian
    /// length) and the declared number of payload bytes, returning the full
    /// framed message including the header.
    pub fn read_message(&mut self) -> io::Result<Vec<u8>> {
        let mut header = [0u8; 4];
        self.read_exact(&mut header)?;
        let length = (u32::from(header[1]) << 16) | (u32::from(header[2]) << 8) | u32::from(header[3]);
        let mut message = vec![0u8; 4 + length as usize];
        message[..4].copy_from_slice(&header);
        self.read_exact(&mut message[4..])?;
        Ok(message)
    }
}

impl<R: Read> Read for HandshakeReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while self.bytes_remaining == 0 {
            let header = read_record_header(&mut self.reader)?;
            if header.content_type == CONTENT_TYPE_HANDSHAKE {
                self.bytes_remaining = usize::from(header.length);
            } else {
                io::copy(
                    &mut self.reader.by_ref().take(u64::from(header.length)),
                    &mut io::sink(),
                )?;
            }
        }

        let cap = buf.len().min(self.bytes_remaining);
        let read = self.reader.read(&mut buf[..cap])?;
        self.bytes_remaining -= read;
        Ok(read)
    }
}

/// Reads one handshake message (header + body) from `reader`, silently
/// skipping records of other content types. Equivalent to constructing a
/// [`HandshakeReader`] and calling [`HandshakeReader::read_message`] once.
pub fn read_handshake_message<R: Read>(reader: R) -> io::Result<Vec<u8>> {
    HandshakeReader::new(reader).read_message()
}
