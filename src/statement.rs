//! A prepared statement and the two-phase execute it drives.

use std::collections::VecDeque;

use crate::connection::{Connection, ExecuteOutcome};
use crate::error::{Error, Result};
use crate::protocol::binder;
use crate::protocol::types::{CombinedRow, ResponseMetadata, Row, Value};

/// A statement prepared against a connection.
///
/// Immutable after construction except for the state `execute` and the
/// subsequent fetch operations accumulate. Command ids for both phases of
/// the eventual two-phase execute are reserved at `prepare` time, so a
/// statement can only be executed once; a second `execute` call fails.
pub struct Statement {
    sql: String,
    phase1_id: u32,
    phase2_id: u32,
    executed: bool,
    metadata: Option<ResponseMetadata>,
    rows: VecDeque<Row>,
    closed: bool,
}

impl Statement {
    pub(crate) fn new(sql: String, phase1_id: u32, phase2_id: u32) -> Self {
        Self {
            sql,
            phase1_id,
            phase2_id,
            executed: false,
            metadata: None,
            rows: VecDeque::new(),
            closed: false,
        }
    }

    /// Bind `args` into this statement's `?` placeholders and run the
    /// two-phase execute against `conn`.
    pub async fn execute(&mut self, conn: &mut Connection, args: &[Value]) -> Result<ExecuteOutcome> {
        if self.executed {
            return Err(Error::statement(
                "ALREADY-EXECUTED",
                "statement was already executed",
            ));
        }

        let bound_sql = binder::bind(&self.sql, args)?;
        let (outcome, metadata, phase1_rows) =
            conn.execute_phase_one(&bound_sql, self.phase1_id).await?;

        let rows = match outcome {
            ExecuteOutcome::UpdateCount(_) => Vec::new(),
            ExecuteOutcome::ResultSet { row_count: 0 } => phase1_rows,
            ExecuteOutcome::ResultSet { row_count } => {
                conn.execute_phase_two(&bound_sql, self.phase2_id, row_count)
                    .await?
            }
        };

        self.executed = true;
        self.metadata = Some(metadata);
        self.rows = rows.into();
        Ok(outcome)
    }

    /// Close the cursor on the server. Safe to call even if `execute` was
    /// never called; idempotent.
    pub async fn close(&mut self, conn: &mut Connection) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let Some(statement_id) = self.metadata.as_ref().and_then(|m| m.statement_id) else {
            return Ok(());
        };
        conn.close_cursor(statement_id).await
    }

    pub fn row_count(&self) -> u64 {
        self.metadata.as_ref().map(|m| m.row_count).unwrap_or(0)
    }

    pub fn rows_remaining(&self) -> usize {
        self.rows.len()
    }

    /// Remove and return the next row in numeric-indexed form.
    pub fn fetch_row(&mut self) -> Option<Vec<Value>> {
        self.rows.pop_front().map(|row| row.fetch_numeric())
    }

    /// Remove the next row and return the value of one of its columns.
    pub fn fetch_column(&mut self, index: usize) -> Option<Value> {
        let row = self.rows.pop_front()?;
        row.fetch_numeric().into_iter().nth(index)
    }

    /// Remove and return the next row in associative form.
    pub fn fetch_associative(&mut self) -> Option<std::collections::HashMap<String, Value>> {
        self.rows.pop_front().map(|row| row.fetch_associative())
    }

    /// Remove and return the next row in the default, combined form.
    pub fn fetch_combined(&mut self) -> Option<CombinedRow> {
        self.rows.pop_front().map(|row| row.fetch_combined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn make_row(id: i32, name: &str) -> Row {
        let column_names = Arc::new(vec!["ID".to_string(), "NAME".to_string()]);
        let mut values = std::collections::HashMap::new();
        values.insert("ID".to_string(), Value::Int(id));
        values.insert("NAME".to_string(), Value::String(name.to_string()));
        Row::new(column_names, values)
    }

    #[test]
    fn fetch_row_is_destructive() {
        let mut stmt = Statement::new("SELECT * FROM T".to_string(), 1, 3);
        stmt.rows = VecDeque::from(vec![make_row(1, "a"), make_row(2, "b")]);

        assert_eq!(stmt.rows_remaining(), 2);
        let first = stmt.fetch_row().unwrap();
        assert_eq!(first[0], Value::Int(1));
        assert_eq!(stmt.rows_remaining(), 1);

        let second = stmt.fetch_row().unwrap();
        assert_eq!(second[0], Value::Int(2));
        assert_eq!(stmt.rows_remaining(), 0);
        assert!(stmt.fetch_row().is_none());
    }

    #[test]
    fn fetch_column_consumes_one_row() {
        let mut stmt = Statement::new("SELECT * FROM T".to_string(), 1, 3);
        stmt.rows = VecDeque::from(vec![make_row(1, "a")]);

        assert_eq!(stmt.fetch_column(1), Some(Value::String("a".to_string())));
        assert_eq!(stmt.rows_remaining(), 0);
    }
}
