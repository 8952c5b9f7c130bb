//! Variable-length decoders: `VK_STRING`, `VK_BLOB`, `VK_IMAGE`.

use tokio::io::AsyncRead;

use crate::error::{Error, Result};
use crate::protocol::buffer::ByteReader;

/// `VK_STRING`: a `u32` "raw" length whose effective length is
/// `2^32 - raw_len`, followed by that many UTF-16LE code units.
///
/// A `raw_len` of zero is the wire's way of saying "empty string" rather
/// than an effective length of `2^32` code units; that boundary case is
/// handled explicitly instead of falling out of wrapping arithmetic.
pub async fn decode_string<R: AsyncRead + Unpin>(reader: &mut ByteReader<R>) -> Result<String> {
    let raw_len = reader.read_u32_le().await?;
    if raw_len == 0 {
        return Ok(String::new());
    }
    let effective_len = (1u64 << 32) - raw_len as u64;
    let byte_len = effective_len as usize * 2;
    let bytes = reader.read_exact(byte_len).await?;

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| Error::decode(format!("invalid UTF-16 string: {e}")))
}

/// `VK_BLOB` / `VK_IMAGE`: a `u32` length then that many raw bytes.
pub async fn decode_blob<R: AsyncRead + Unpin>(reader: &mut ByteReader<R>) -> Result<Vec<u8>> {
    let len = reader.read_u32_le().await? as usize;
    reader.read_exact(len).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn raw_len_zero_is_empty_string() {
        let mut r = ByteReader::new(Cursor::new(vec![0x00, 0x00, 0x00, 0x00]));
        assert_eq!(decode_string(&mut r).await.unwrap(), "");
    }

    #[tokio::test]
    async fn inverted_length_prefix_decodes_utf16le() {
        // raw_len = 0xFFFFFFFC -> effective length 4, "ABCD" as UTF-16LE.
        let mut bytes = 0xFFFFFFFCu32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0x41, 0x00, 0x42, 0x00, 0x43, 0x00, 0x44, 0x00]);
        let mut r = ByteReader::new(Cursor::new(bytes));
        assert_eq!(decode_string(&mut r).await.unwrap(), "ABCD");
    }

    #[tokio::test]
    async fn blob_reads_length_prefixed_bytes() {
        let mut bytes = 3u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[1, 2, 3]);
        let mut r = ByteReader::new(Cursor::new(bytes));
        assert_eq!(decode_blob(&mut r).await.unwrap(), vec![1, 2, 3]);
    }
}
