//! Decoded value, row, and response-metadata types.

pub mod metadata;
pub mod row;
pub mod value;

pub use metadata::{ResponseMetadata, ResultType};
pub use row::{CombinedRow, Row};
pub use value::Value;
