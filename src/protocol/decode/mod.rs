//! Primitive value decoders for the 4D wire protocol.
//!
//! Each supported column type has its own decode function; [`decode_value`]
//! dispatches on the type tag announced in the preceding `Column-Types`
//! header.
//!
//! | Type tag | Module |
//! |---|---|
//! | `VK_BOOLEAN`, `VK_BYTE`, `VK_WORD`, `VK_LONG`, `VK_LONG8`, `VK_DURATION`, `VK_REAL` | `scalar` |
//! | `VK_FLOAT` | `float` |
//! | `VK_STRING`, `VK_BLOB`, `VK_IMAGE` | `text` |
//! | `VK_TIMESTAMP`, `VK_TIME` | `datetime` |

pub mod datetime;
pub mod float;
pub mod scalar;
pub mod text;

use tokio::io::AsyncRead;

use crate::error::{Error, Result};
use crate::protocol::buffer::ByteReader;
use crate::protocol::constants::*;
use crate::protocol::types::value::Value;

/// Decode one column value, given its announced type tag.
///
/// Callers are expected to have already consumed the 1-byte null/value/error
/// flag that precedes every value on the wire.
pub async fn decode_value<R: AsyncRead + Unpin>(
    type_tag: &str,
    reader: &mut ByteReader<R>,
) -> Result<Value> {
    match type_tag {
        VK_BOOLEAN => Ok(Value::Bool(scalar::decode_bool(reader).await?)),
        VK_BYTE | VK_WORD => Ok(Value::Int(scalar::decode_word(reader).await?)),
        VK_LONG => Ok(Value::Int(scalar::decode_long(reader).await?)),
        VK_LONG8 | VK_DURATION => Ok(Value::Long(scalar::decode_long8(reader).await?)),
        VK_REAL => Ok(Value::Double(scalar::decode_real(reader).await?)),
        VK_FLOAT => Ok(Value::Double(float::decode_float(reader).await?)),
        VK_STRING => Ok(Value::String(text::decode_string(reader).await?)),
        VK_BLOB | VK_IMAGE => Ok(Value::Blob(text::decode_blob(reader).await?)),
        VK_TIMESTAMP | VK_TIME => Ok(Value::DateTime(datetime::decode_timestamp(reader).await?)),
        other => Err(Error::type_not_supported(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn dispatches_long_by_type_tag() {
        let mut r = ByteReader::new(Cursor::new(vec![0x2A, 0x00, 0x00, 0x00]));
        let value = decode_value(VK_LONG, &mut r).await.unwrap();
        assert_eq!(value, Value::Int(42));
    }

    #[tokio::test]
    async fn unknown_type_tag_is_an_error() {
        let mut r = ByteReader::new(Cursor::new(Vec::new()));
        assert!(decode_value("VK_NONSENSE", &mut r).await.is_err());
    }
}
