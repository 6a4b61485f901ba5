//! Async counterpart of [`crate::record`], used by the connection-peeking
//! shim where the underlying transport is a [`tokio::io::AsyncRead`] socket
//! rather than a blocking [`std::io::Read`].

use tokio::io::{self, AsyncRead, AsyncReadExt};

use crate::record::{RecordHeader, CONTENT_TYPE_HANDSHAKE};

async fn read_record_header<R: AsyncRead + Unpin>(reader: &mut R) -> io::Result<RecordHeader> {
    let mut buf = [0u8; 5];
    reader.read_exact(&mut buf).await?;
    Ok(RecordHeader {
        content_type: buf[0],
        length: u16::from_be_bytes([buf[3], buf[4]]),
    })
}

/// Reads one handshake message (header + body) from an async byte stream,
/// draining and discarding any interleaved non-handshake records exactly as
/// [`crate::record::read_handshake_message`] does for blocking streams.
pub async fn read_handshake_message<R: AsyncRead + Unpin>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut bytes_remaining: usize = 0;
    let mut message = Vec::new();

    // Pull exactly `len` handshake-content bytes, skipping other records.
    async fn pull<R: AsyncRead + Unpin>(
        reader: &mut R,
        bytes_remaining: &mut usize,
        out: &mut [u8],
    ) -> io::Result<()> {
        let mut filled = 0;
        while filled < out.len() {
            while *bytes_remaining == 0 {
                let header = read_record_header(reader).await?;
                if header.content_type == CONTENT_TYPE_HANDSHAKE {
                    *bytes_remaining = usize::from(header.length);
                } else {
                    let mut sink = vec![0u8; usize::from(header.length)];
                    reader.read_exact(&mut sink).await?;
                }
            }
            let take = (out.len() - filled).min(*bytes_remaining);
            reader.read_exact(&mut out[filled..filled + take]).await?;
            *bytes_remaining -= take;
            filled += take;
        }
        Ok(())
    }

    let mut header = [0u8; 4];
    pull(&mut reader, &mut bytes_remaining, &mut header).await?;
    let length =
        (u32::from(header[1]) << 16) | (u32::from(header[2]) << 8) | u32::from(header[3]);
    message.extend_from_slice(&header);
    message.resize(4 + length as usize, 0);
    let body = &mut message[4..];
    pull(&mut reader, &mut bytes_remaining, body).await?;

    Ok(message)
}
