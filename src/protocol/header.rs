//! Header block parser.
//!
//! Consumes CRLF-terminated lines, recognises the known field set, and
//! populates a [`ResponseMetadata`]. Unknown lines are ignored for
//! forward-compatibility.

use crate::protocol::constants::*;
use crate::protocol::types::{ResponseMetadata, ResultType};

/// Outcome of parsing a single header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// A recognised or unknown field line; keep reading.
    Consumed,
    /// The status line announced success.
    StatusOk,
    /// The status line announced failure.
    StatusError,
    /// A blank line: the header block is complete.
    BlockEnd,
}

/// Parse one line (including its `\r\n` terminator) into `metadata`.
pub fn parse_line(line: &str, metadata: &mut ResponseMetadata) -> LineOutcome {
    let trimmed = line.trim_end_matches(['\r', '\n']);

    if trimmed.is_empty() {
        return LineOutcome::BlockEnd;
    }
    if trimmed.contains(" OK") {
        metadata.error = false;
        return LineOutcome::StatusOk;
    }
    if trimmed.contains(" ERROR") {
        metadata.error = true;
        return LineOutcome::StatusError;
    }

    let Some((field, value)) = trimmed.split_once(':') else {
        return LineOutcome::Consumed;
    };
    let field = field.trim();
    let value = value.trim();

    match field {
        FIELD_STATEMENT_ID => metadata.statement_id = value.parse().ok(),
        FIELD_COMMAND_COUNT => metadata.command_count = value.parse().ok(),
        FIELD_RESULT_TYPE => {
            if value == RESULT_TYPE_UPDATE_COUNT {
                metadata.set_result_type(ResultType::UpdateCount);
            } else if value == RESULT_TYPE_RESULT_SET {
                metadata.set_result_type(ResultType::ResultSet);
            }
        }
        FIELD_COLUMN_COUNT => {} // derived from column_names.len(); informational only
        FIELD_ROW_COUNT => metadata.row_count = value.parse().unwrap_or(0),
        FIELD_ROW_COUNT_SENT => metadata.row_count_sent = value.parse().unwrap_or(0),
        FIELD_COLUMN_TYPES => {
            metadata.column_types = value.split_whitespace().map(str::to_string).collect();
        }
        FIELD_COLUMN_ALIASES => {
            metadata.column_names = parse_column_aliases(value);
        }
        FIELD_COLUMN_UPDATEABILITY => {
            metadata.column_updateability = parse_updateability(value);
        }
        FIELD_ERROR_CODE => metadata.error_code = Some(value.to_string()),
        FIELD_ERROR_COMPONENT_CODE => metadata.error_component_code = Some(value.to_string()),
        FIELD_ERROR_DESCRIPTION => metadata.error_description = Some(value.to_string()),
        _ => {}
    }

    LineOutcome::Consumed
}

/// `Column-Aliases` is a list like ` [name1] [name2] …`; split on `]`,
/// stripping ` [` / `[` / `]`, and discard the trailing empty fragment.
fn parse_column_aliases(value: &str) -> Vec<String> {
    value
        .split(']')
        .map(|fragment| fragment.trim().trim_start_matches('[').trim())
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

/// `Column-Updateability` is whitespace-separated; the first token is a
/// count/label and is dropped.
fn parse_updateability(value: &str) -> Vec<bool> {
    value
        .split_whitespace()
        .skip(1)
        .map(|token| token.eq_ignore_ascii_case("Y"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_ends_the_block() {
        let mut meta = ResponseMetadata::new();
        assert_eq!(parse_line("\r\n", &mut meta), LineOutcome::BlockEnd);
    }

    #[test]
    fn status_line_sets_error_flag() {
        let mut meta = ResponseMetadata::new();
        assert_eq!(parse_line("001 OK\r\n", &mut meta), LineOutcome::StatusOk);
        assert!(!meta.error);

        let mut meta = ResponseMetadata::new();
        assert_eq!(
            parse_line("001 ERROR\r\n", &mut meta),
            LineOutcome::StatusError
        );
        assert!(meta.error);
    }

    #[test]
    fn parses_result_type_and_row_count() {
        let mut meta = ResponseMetadata::new();
        parse_line("Result-Type : Update-Count\r\n", &mut meta);
        parse_line("Row-Count : 7\r\n", &mut meta);
        assert_eq!(meta.result_type(), Some(ResultType::UpdateCount));
        assert_eq!(meta.row_count, 7);
    }

    #[test]
    fn column_aliases_split_on_brackets() {
        let mut meta = ResponseMetadata::new();
        parse_line("Column-Aliases : [id] [name] \r\n", &mut meta);
        assert_eq!(meta.column_names, vec!["id", "name"]);
    }

    #[test]
    fn column_types_split_on_whitespace() {
        let mut meta = ResponseMetadata::new();
        parse_line("Column-Types : VK_LONG VK_STRING \r\n", &mut meta);
        assert_eq!(meta.column_types, vec!["VK_LONG", "VK_STRING"]);
    }

    #[test]
    fn column_updateability_drops_leading_token() {
        let mut meta = ResponseMetadata::new();
        parse_line("Column-Updateability : 2 N Y\r\n", &mut meta);
        assert_eq!(meta.column_updateability, vec![false, true]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut meta = ResponseMetadata::new();
        assert_eq!(
            parse_line("Some-Future-Field : whatever\r\n", &mut meta),
            LineOutcome::Consumed
        );
    }

    #[test]
    fn error_fields_populate_description() {
        let mut meta = ResponseMetadata::new();
        parse_line("Error-Code : -10001\r\n", &mut meta);
        parse_line("Error-Description : bad statement\r\n", &mut meta);
        assert_eq!(meta.error_code.as_deref(), Some("-10001"));
        assert_eq!(meta.error_description.as_deref(), Some("bad statement"));
    }
}
