//! Byte-level reading and writing over the live socket.
//!
//! Unlike a framed protocol where each packet carries its own length prefix,
//! 4D's reply frame has no overall length: the header block is terminated by
//! a blank line, and the binary row payload's shape is only known from the
//! `Column-*` headers that preceded it. So reads happen incrementally,
//! straight off the connection, rather than out of a pre-filled buffer.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{Error, Result};

/// Reads exact byte counts and CRLF-terminated lines from an async byte stream.
///
/// Wraps any `AsyncRead` half of a duplex transport (the teacher's
/// `PacketStream` plays the same role over a length-prefixed packet stream;
/// here there is no packet framing to strip).
pub struct ByteReader<R> {
    inner: R,
}

impl<R: AsyncRead + Unpin> ByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read exactly `n` bytes, blocking until they arrive.
    ///
    /// There is no short-read success: fewer than `n` bytes before EOF is an
    /// I/O error.
    pub async fn read_exact(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.inner.read_exact(&mut buf).await?;
        Ok(buf)
    }

    /// Read bytes one at a time until the two-byte sequence `\r\n` is seen.
    /// The returned line includes the terminator.
    pub async fn read_until_crlf(&mut self) -> Result<Vec<u8>> {
        let mut line = Vec::new();
        loop {
            let mut byte = [0u8; 1];
            self.inner.read_exact(&mut byte).await?;
            line.push(byte[0]);
            if line.len() >= 2 && line[line.len() - 2] == b'\r' && line[line.len() - 1] == b'\n' {
                return Ok(line);
            }
        }
    }

    pub async fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_exact(1).await?[0])
    }

    pub async fn read_u16_le(&mut self) -> Result<u16> {
        let b = self.read_exact(2).await?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub async fn read_u32_le(&mut self) -> Result<u32> {
        let b = self.read_exact(4).await?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub async fn read_u64_le(&mut self) -> Result<u64> {
        let b = self.read_exact(8).await?;
        Ok(u64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    pub async fn read_f64_le(&mut self) -> Result<f64> {
        let b = self.read_exact(8).await?;
        Ok(f64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }
}

/// Writes a fully formed request frame to an async byte sink.
pub struct ByteWriter<W> {
    inner: W,
}

impl<W: AsyncWrite + Unpin> ByteWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub async fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes).await?;
        self.inner.flush().await?;
        Ok(())
    }
}

/// Decode a length-prefixed blob of raw bytes: `u32` length then that many bytes.
pub async fn read_length_prefixed_bytes<R: AsyncRead + Unpin>(
    reader: &mut ByteReader<R>,
) -> Result<Vec<u8>> {
    let len = reader.read_u32_le().await? as usize;
    reader.read_exact(len).await
}

/// Turn a short read into a [`Error::DecodeError`] with context, for decoders
/// that parse already-collected bytes rather than streaming from the reader.
pub fn require_len(bytes: &[u8], n: usize, what: &str) -> Result<()> {
    if bytes.len() < n {
        return Err(Error::decode(format!(
            "{what}: expected at least {n} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(())
}
