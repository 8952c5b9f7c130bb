//! Request frame construction.
//!
//! The two-phase execute rewrites the first-phase request for its second
//! round trip; rather than patching the first request's bytes textually,
//! phase 2 is built fresh from the same structured fields with the command
//! id and page size swapped in.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::protocol::constants::*;

/// Format a command id as a zero-padded 3-digit decimal string.
pub fn format_command_id(command_id: u32) -> String {
    format!("{command_id:03}")
}

/// Build the `LOGIN` request frame.
pub fn build_login(command_id: u32, user: &str, password: &str) -> String {
    format!(
        "{} {VERB_LOGIN}\r\nUSER-NAME-BASE64 : {}\r\nUSER-PASSWORD-BASE64 : {}\r\nREPLY-WITH-BASE64-TEXT : N\r\nPROTOCOL-VERSION : {PROTOCOL_VERSION}\r\n\r\n",
        format_command_id(command_id),
        BASE64.encode(user),
        BASE64.encode(password),
    )
}

/// Build an `EXECUTE-STATEMENT` request frame for the given page size.
pub fn build_execute_statement(command_id: u32, sql: &str, first_page_size: u64) -> String {
    format!(
        "{} {VERB_EXECUTE_STATEMENT}\r\nSTATEMENT : {sql}\r\nOUTPUT-MODE : RELEASE\r\nFIRST-PAGE-SIZE : {first_page_size}\r\n\r\n",
        format_command_id(command_id),
    )
}

/// Build a `CLOSE-STATEMENT` request frame.
pub fn build_close_statement(command_id: u32, statement_id: u32) -> String {
    format!(
        "{} {VERB_CLOSE_STATEMENT}\r\nSTATEMENT-ID : {statement_id}\r\n\r\n",
        format_command_id(command_id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_id_is_zero_padded_to_three_digits() {
        assert_eq!(format_command_id(1), "001");
        assert_eq!(format_command_id(101), "101");
    }

    #[test]
    fn login_frame_carries_base64_credentials() {
        let frame = build_login(1, "alice", "s3cret");
        assert!(frame.starts_with("001 LOGIN\r\n"));
        assert!(frame.contains(&format!("USER-NAME-BASE64 : {}", BASE64.encode("alice"))));
        assert!(frame.contains(&format!(
            "USER-PASSWORD-BASE64 : {}",
            BASE64.encode("s3cret")
        )));
        assert!(frame.ends_with("\r\n\r\n"));
    }

    #[test]
    fn execute_statement_carries_first_page_size() {
        let frame = build_execute_statement(3, "SELECT 1 FROM T", 1);
        assert!(frame.starts_with("003 EXECUTE-STATEMENT\r\n"));
        assert!(frame.contains("STATEMENT : SELECT 1 FROM T\r\n"));
        assert!(frame.contains("FIRST-PAGE-SIZE : 1\r\n"));
    }

    #[test]
    fn close_statement_references_statement_id() {
        let frame = build_close_statement(5, 17);
        assert_eq!(frame, "005 CLOSE-STATEMENT\r\nSTATEMENT-ID : 17\r\n\r\n");
    }
}
