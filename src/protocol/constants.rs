//! Wire-protocol constants: type tags, header field names, fetch styles.

/// Column value type tags, as sent by the server in `Column-Types` headers.
pub const VK_BOOLEAN: &str = "VK_BOOLEAN";
pub const VK_BYTE: &str = "VK_BYTE";
pub const VK_WORD: &str = "VK_WORD";
pub const VK_LONG: &str = "VK_LONG";
pub const VK_LONG8: &str = "VK_LONG8";
pub const VK_REAL: &str = "VK_REAL";
pub const VK_FLOAT: &str = "VK_FLOAT";
pub const VK_STRING: &str = "VK_STRING";
pub const VK_BLOB: &str = "VK_BLOB";
pub const VK_IMAGE: &str = "VK_IMAGE";
pub const VK_TIMESTAMP: &str = "VK_TIMESTAMP";
pub const VK_TIME: &str = "VK_TIME";
pub const VK_DURATION: &str = "VK_DURATION";

/// Fetch-style constants (see `types::row`).
pub const FETCH_NUMERIC: u8 = 0xA0;
pub const FETCH_ASSOCIATIVE: u8 = 0xA1;
pub const FETCH_COMBINED: u8 = 0xA2;

/// Header field names recognised by the header parser.
pub const FIELD_STATEMENT_ID: &str = "Statement-ID";
pub const FIELD_COMMAND_COUNT: &str = "Command-Count";
pub const FIELD_RESULT_TYPE: &str = "Result-Type";
pub const FIELD_COLUMN_COUNT: &str = "Column-Count";
pub const FIELD_ROW_COUNT: &str = "Row-Count";
pub const FIELD_COLUMN_TYPES: &str = "Column-Types";
pub const FIELD_COLUMN_ALIASES: &str = "Column-Aliases";
pub const FIELD_COLUMN_UPDATEABILITY: &str = "Column-Updateability";
pub const FIELD_ROW_COUNT_SENT: &str = "Row-Count-Sent";
pub const FIELD_ERROR_CODE: &str = "Error-Code";
pub const FIELD_ERROR_COMPONENT_CODE: &str = "Error-Component-Code";
pub const FIELD_ERROR_DESCRIPTION: &str = "Error-Description";

/// `Result-Type` value meaning the statement produced an update count.
pub const RESULT_TYPE_UPDATE_COUNT: &str = "Update-Count";
/// `Result-Type` value meaning the statement produced a result set.
pub const RESULT_TYPE_RESULT_SET: &str = "Result-Set";

/// Request command verbs.
pub const VERB_LOGIN: &str = "LOGIN";
pub const VERB_EXECUTE_STATEMENT: &str = "EXECUTE-STATEMENT";
pub const VERB_CLOSE_STATEMENT: &str = "CLOSE-STATEMENT";

/// Protocol version string sent on `LOGIN`.
pub const PROTOCOL_VERSION: &str = "0.1a";

/// Default transport connect deadline.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 20;
