//! Parameter binder: substitutes positional `?` markers with SQL literals.

use crate::error::{Error, Result};
use crate::protocol::types::Value;

/// Sentinel used to protect `?` characters embedded in a rendered string
/// literal from being mistaken for the next placeholder.
const QUESTION_MARK_SENTINEL: &str = ":QUOT:";

/// Render one argument as an SQL literal.
///
/// Spec §4.4's rendering rules cover null, boolean, string, and
/// integer/float only; a blob has no SQL literal form, so binding one
/// fails with [`Error::UnbindableArgument`] instead of silently
/// substituting `NULL` and losing the bytes.
fn render_literal(value: &Value) -> Result<String> {
    Ok(match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => format!("CAST({} as BOOLEAN)", if *b { 1 } else { 0 }),
        Value::Int(n) => n.to_string(),
        Value::Long(n) => n.to_string(),
        Value::Double(n) => n.to_string(),
        Value::String(s) | Value::DateTime(s) => {
            let stripped = s.replace(['\r', '\n'], "");
            let escaped = stripped.replace('\'', "''").replace('?', QUESTION_MARK_SENTINEL);
            format!("'{escaped}'")
        }
        Value::Blob(_) => return Err(Error::unbindable_argument("blob")),
    })
}

/// Substitute every `?` in `body` with the corresponding argument's rendered
/// literal, left to right, protecting `?` characters embedded inside
/// rendered string literals so they aren't consumed as placeholders.
///
/// Fails with [`Error::ArgumentCountMismatch`] if the number of `?`
/// occurrences in `body` doesn't match `args.len()`, or with
/// [`Error::UnbindableArgument`] if an argument (currently: a blob) has no
/// SQL literal rendering.
pub fn bind(body: &str, args: &[Value]) -> Result<String> {
    let placeholder_count = body.matches('?').count();
    if placeholder_count != args.len() {
        return Err(Error::ArgumentCountMismatch {
            expected: placeholder_count,
            actual: args.len(),
        });
    }

    let mut result = String::with_capacity(body.len());
    let mut args = args.iter();
    for part in body.split('?') {
        result.push_str(part);
        if let Some(arg) = args.next() {
            result.push_str(&render_literal(arg)?);
        }
    }

    Ok(result.replace(QUESTION_MARK_SENTINEL, "?"))
}
