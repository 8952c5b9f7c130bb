//! Error types for the 4D SQL engine client.

use std::io;
use thiserror::Error;

/// Result type alias for 4D client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Strip embedded CR/LF from a server-supplied message before it reaches a caller.
fn sanitize(message: impl Into<String>) -> String {
    message.into().replace(['\r', '\n'], " ")
}

/// Error type for 4D client operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during network communication.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The socket could not be allocated (e.g. the process is out of file
    /// descriptors), distinct from a refused or unreachable TCP connect.
    #[error("failed to create transport: {message}")]
    TransportCreationError { message: String },

    /// TCP connect refused, host unreachable.
    #[error("failed to connect to {host}:{port}: {message}")]
    TransportConnectError {
        host: String,
        port: u16,
        message: String,
    },

    /// Connect attempt did not complete before the configured deadline.
    #[error("connection to {host}:{port} timed out after {timeout:?}")]
    ConnectionTimeout {
        host: String,
        port: u16,
        timeout: std::time::Duration,
    },

    /// DNS resolution of the configured host failed.
    #[error("failed to resolve hostname '{hostname}': {message}")]
    DnsResolutionFailed { hostname: String, message: String },

    /// Server replied `ERROR` to `LOGIN`.
    #[error("login failed ({error_code}): {error_description}")]
    LoginError {
        error_code: String,
        error_description: String,
    },

    /// Server replied `ERROR` to `EXECUTE-STATEMENT`.
    #[error("statement failed ({error_code}): {error_description}")]
    StatementError {
        error_code: String,
        error_description: String,
    },

    /// A column type tag was not in the known catalogue.
    #[error("unsupported column type: {type_tag}")]
    TypeNotSupported { type_tag: String },

    /// The number of `?` placeholders did not match the number of bound arguments.
    #[error("argument count mismatch: statement has {expected} placeholder(s), {actual} argument(s) supplied")]
    ArgumentCountMismatch { expected: usize, actual: usize },

    /// A value could not be decoded: a per-value error marker, a malformed length
    /// prefix, or invalid UTF-16 in a string column.
    #[error("failed to decode value: {message}")]
    DecodeError { message: String },

    /// A bound argument has no SQL literal rendering. Spec §4.4's rendering
    /// rules cover null/boolean/string/integer/float only; binding a blob
    /// fails loudly rather than silently substituting `NULL`.
    #[error("cannot bind a {type_name} value as a SQL literal")]
    UnbindableArgument { type_name: &'static str },

    /// The connection was already closed when an operation was attempted.
    #[error("connection closed")]
    ConnectionClosed,
}

impl Error {
    /// Build a [`Error::LoginError`], stripping CR/LF from the server description.
    pub fn login(error_code: impl Into<String>, error_description: impl Into<String>) -> Self {
        Self::LoginError {
            error_code: error_code.into(),
            error_description: sanitize(error_description),
        }
    }

    /// Build a [`Error::StatementError`], stripping CR/LF from the server description.
    pub fn statement(error_code: impl Into<String>, error_description: impl Into<String>) -> Self {
        Self::StatementError {
            error_code: error_code.into(),
            error_description: sanitize(error_description),
        }
    }

    /// Build a [`Error::DecodeError`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeError {
            message: sanitize(message),
        }
    }

    /// Build a [`Error::TypeNotSupported`].
    pub fn type_not_supported(type_tag: impl Into<String>) -> Self {
        Self::TypeNotSupported {
            type_tag: type_tag.into(),
        }
    }

    /// Build a [`Error::UnbindableArgument`].
    pub fn unbindable_argument(type_name: &'static str) -> Self {
        Self::UnbindableArgument { type_name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_error_strips_crlf() {
        let err = Error::login("-10001", "bad password\r\nretry later");
        match err {
            Error::LoginError {
                error_description, ..
            } => assert_eq!(error_description, "bad password  retry later"),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn display_omits_raw_newlines() {
        let err = Error::statement("-1", "syntax error\r\n");
        assert!(!err.to_string().contains('\n'));
        assert!(!err.to_string().contains('\r'));
    }
}
