//! 4D thin client for Rust
//!
//! A pure Rust client for 4D's SQL engine wire protocol: CRLF-delimited
//! text headers, a two-phase execute-then-fetch exchange, and a binary
//! decoder for the protocol's scalar, temporal, and variable-length
//! column types.
//!
//! # Example
//!
//! ```no_run
//! use fourd_thin_rs::{ConnectParams, Connection, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let params = ConnectParams::new("localhost", 19812, "admin", "password");
//!     let mut conn = Connection::connect(&params).await?;
//!
//!     let mut stmt = conn.prepare("SELECT id, name FROM Employees WHERE id = ?").await?;
//!     stmt.execute(&mut conn, &[42.into()]).await?;
//!     while let Some(row) = stmt.fetch_combined() {
//!         println!("{:?}", row.by_name);
//!     }
//!
//!     conn.close().await?;
//!     Ok(())
//! }
//! ```

pub mod connection;
pub mod error;
pub mod protocol;
pub mod statement;

pub use connection::{ConnectParams, Connection, ExecuteOutcome};
pub use error::{Error, Result};
pub use protocol::types::{CombinedRow, ResponseMetadata, ResultType, Row, Value};
pub use statement::Statement;

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Long(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
