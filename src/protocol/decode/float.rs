//! `VK_FLOAT`: the server's own variable-precision float encoding.
//!
//! Wire layout: `u32` exponent, 1 byte sign, `u32` data length `L`, then `L`
//! ASCII bytes holding the mantissa as a decimal integer. The value is
//! `(-1)^sign * (1 + mantissa * 2^-23) * 2^(exponent - 127)`.
//!
//! This is non-standard and must match the server bit-for-bit; see the
//! open question in the design notes about whether `L` and the digit
//! content mean something other than a literal decimal integer on all
//! server versions.

use tokio::io::AsyncRead;

use crate::error::{Error, Result};
use crate::protocol::buffer::ByteReader;

pub async fn decode_float<R: AsyncRead + Unpin>(reader: &mut ByteReader<R>) -> Result<f64> {
    let exponent = reader.read_u32_le().await?;
    let sign = reader.read_u8().await?;
    let data_len = reader.read_u32_le().await? as usize;
    let digits = reader.read_exact(data_len).await?;

    let text = std::str::from_utf8(&digits)
        .map_err(|e| Error::decode(format!("VK_FLOAT mantissa is not ASCII: {e}")))?;
    let mantissa: f64 = if text.is_empty() {
        0.0
    } else {
        text.trim()
            .parse()
            .map_err(|e| Error::decode(format!("VK_FLOAT mantissa '{text}' is not numeric: {e}")))?
    };

    let sign_factor = if sign != 0 { -1.0 } else { 1.0 };
    let value =
        sign_factor * (1.0 + mantissa * 2f64.powi(-23)) * 2f64.powi(exponent as i32 - 127);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn frame(exponent: u32, sign: u8, digits: &str) -> Vec<u8> {
        let mut bytes = exponent.to_le_bytes().to_vec();
        bytes.push(sign);
        bytes.extend_from_slice(&(digits.len() as u32).to_le_bytes());
        bytes.extend_from_slice(digits.as_bytes());
        bytes
    }

    #[tokio::test]
    async fn zero_mantissa_positive_sign_gives_power_of_two() {
        // exponent=127 -> 2^(127-127) = 1.0, mantissa 0 -> (1 + 0) * 1.0 = 1.0
        let mut r = ByteReader::new(Cursor::new(frame(127, 0, "0")));
        assert_eq!(decode_float(&mut r).await.unwrap(), 1.0);
    }

    #[tokio::test]
    async fn negative_sign_flips_value() {
        let mut r = ByteReader::new(Cursor::new(frame(127, 1, "0")));
        assert_eq!(decode_float(&mut r).await.unwrap(), -1.0);
    }

    #[tokio::test]
    async fn empty_mantissa_is_zero() {
        let mut r = ByteReader::new(Cursor::new(frame(127, 0, "")));
        assert_eq!(decode_float(&mut r).await.unwrap(), 1.0);
    }
}
