//! Peek-wrapped connection (C9): pre-reads a client-hello off a live async
//! byte stream without consuming it for downstream readers.
//!
//! Construction tees every byte pulled off the socket into an owned buffer
//! while [`tlsprobe_wire::async_record`] walks handshake records looking for
//! one complete client-hello message. Once construction finishes, reads
//! first replay that tee'd buffer — which holds the *raw* record bytes,
//! headers and any skipped non-handshake records included, not just the
//! handshake payload — and only then continue from the live socket. This is
//! what lets a standard TLS implementation still parse correct record
//! framing after the peek, per spec.md §4.8.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use tokio::io::{self, AsyncRead, AsyncWrite, ReadBuf};

use crate::error::PeekError;

/// An [`AsyncRead`] adapter that forwards to `inner` while appending every
/// byte it successfully reads into `buf`. Built from "two concatenated
/// readers" per spec.md §9's design note, except here the tee runs during
/// construction rather than being one of the two permanent halves.
struct TeeReader<'a, IO> {
    inner: &'a mut IO,
    buf: &'a mut Vec<u8>,
}

impl<'a, IO: AsyncRead + Unpin> AsyncRead for TeeReader<'a, IO> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let before = buf.filled().len();
        let this = self.get_mut();
        let poll = Pin::new(&mut *this.inner).poll_read(cx, buf);
        if poll.is_ready() {
            this.buf.extend_from_slice(&buf.filled()[before..]);
        }
        poll
    }
}

/// Wraps a live byte-stream connection, having already pre-read one
/// client-hello message off it. `client_hello_bytes()` returns the parsed
/// handshake message (header + body) for decoding; reads through this type
/// itself replay the raw bytes observed on the wire, then continue from the
/// live connection, so a TLS implementation driven through this type sees
/// an unmodified byte stream.
pub struct PeekedConn<IO> {
    inner: IO,
    peeked: Bytes,
    peek_pos: usize,
    client_hello: Vec<u8>,
}

impl<IO: AsyncRead + AsyncWrite + Unpin> PeekedConn<IO> {
    /// Pre-reads one client-hello handshake message off `inner`. Fails if
    /// the underlying stream errors or closes before a complete handshake
    /// message (across any number of framed records) is observed.
    pub async fn new(mut inner: IO) -> Result<Self, PeekError> {
        let mut raw = Vec::new();
        let client_hello = {
            let mut tee = TeeReader {
                inner: &mut inner,
                buf: &mut raw,
            };
            tlsprobe_wire::async_record::read_handshake_message(&mut tee).await?
        };
        Ok(Self {
            inner,
            peeked: Bytes::from(raw),
            peek_pos: 0,
            client_hello,
        })
    }

    /// The parsed client-hello handshake message (header included), exactly
    /// as [`tlsprobe_wire::record::read_handshake_message`] produced it.
    /// Hand this to `tlsprobe_hello::unmarshal_client_hello`.
    #[must_use]
    pub fn client_hello_bytes(&self) -> &[u8] {
        &self.client_hello
    }

    /// Borrows the wrapped connection without disturbing the replay state.
    #[must_use]
    pub fn get_ref(&self) -> &IO {
        &self.inner
    }

    /// Unwraps back to the inner connection, discarding any unreplayed
    /// peeked bytes. Only safe to call before any `Read` has observed the
    /// peeked prefix; otherwise a downstream consumer loses those bytes.
    #[must_use]
    pub fn into_inner(self) -> IO {
        self.inner
    }
}

impl<IO: AsyncRead + Unpin> AsyncRead for PeekedConn<IO> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if this.peek_pos < this.peeked.len() {
            let remaining = &this.peeked[this.peek_pos..];
            let n = remaining.len().min(buf.remaining());
            buf.put_slice(&remaining[..n]);
            this.peek_pos += n;
            return Poll::Ready(Ok(()));
        }
        Pin::new(&mut this.inner).poll_read(cx, buf)
    }
}

impl<IO: AsyncWrite + Unpin> AsyncWrite for PeekedConn<IO> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().inner).poll_write(cx, buf)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_shutdown(cx)
    }
}
