//! Fixed-layout scalar decoders: booleans, bytes, words, longs, longs8, durations, reals.
//!
//! All integer fields on the wire are little-endian. `VK_BOOLEAN`, `VK_BYTE`
//! and `VK_WORD` are transmitted as a `u16`; the source's bug of combining two
//! already-ordinal bytes via `* 256` is equivalent to a little-endian `u16`
//! read as long as both bytes are in `0..255`, so that's what this decodes.

use tokio::io::AsyncRead;

use crate::error::Result;
use crate::protocol::buffer::ByteReader;

/// `VK_BOOLEAN`: a `u16`, false iff zero.
pub async fn decode_bool<R: AsyncRead + Unpin>(reader: &mut ByteReader<R>) -> Result<bool> {
    Ok(reader.read_u16_le().await? != 0)
}

/// `VK_BYTE` / `VK_WORD`: a `u16`, returned as a signed 32-bit integer.
pub async fn decode_word<R: AsyncRead + Unpin>(reader: &mut ByteReader<R>) -> Result<i32> {
    Ok(reader.read_u16_le().await? as i32)
}

/// `VK_LONG`: a `u32`, returned as a signed 32-bit integer.
pub async fn decode_long<R: AsyncRead + Unpin>(reader: &mut ByteReader<R>) -> Result<i32> {
    Ok(reader.read_u32_le().await? as i32)
}

/// `VK_LONG8` / `VK_DURATION`: a `u64`, returned as a signed 64-bit integer.
pub async fn decode_long8<R: AsyncRead + Unpin>(reader: &mut ByteReader<R>) -> Result<i64> {
    Ok(reader.read_u64_le().await? as i64)
}

/// `VK_REAL`: the raw little-endian IEEE-754 double the server sends.
pub async fn decode_real<R: AsyncRead + Unpin>(reader: &mut ByteReader<R>) -> Result<f64> {
    reader.read_f64_le().await
}
