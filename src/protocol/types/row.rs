//! Row buffer and fetch shaping.
//!
//! A decoded row is stored once, as a name-keyed map plus the column order
//! needed for numeric-indexed access and an optional record id. Fetch
//! shaping (numeric / associative / combined) is just a projection over that
//! storage; it never re-decodes anything.

use std::collections::HashMap;
use std::sync::Arc;

use super::value::Value;

/// One decoded row.
#[derive(Debug, Clone)]
pub struct Row {
    column_names: Arc<Vec<String>>,
    values: HashMap<String, Value>,
    record_id: Option<u32>,
}

impl Row {
    pub fn new(column_names: Arc<Vec<String>>, values: HashMap<String, Value>) -> Self {
        Self {
            column_names,
            values,
            record_id: None,
        }
    }

    pub fn with_record_id(mut self, record_id: u32) -> Self {
        self.record_id = Some(record_id);
        self
    }

    pub fn record_id(&self) -> Option<u32> {
        self.record_id
    }

    /// Value for a column by name (case-sensitive; names are taken verbatim
    /// from `Column-Aliases`).
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Numeric-indexed projection: a list ordered `0..column_count-1`.
    pub fn fetch_numeric(&self) -> Vec<Value> {
        self.column_names
            .iter()
            .map(|name| self.values.get(name).cloned().unwrap_or(Value::Null))
            .collect()
    }

    /// Associative projection: a mapping from column name to value. `_ID` is
    /// never included; use [`Row::record_id`] for the record id.
    pub fn fetch_associative(&self) -> HashMap<String, Value> {
        self.values.clone()
    }

    /// Combined projection: both numeric and associative views over the same
    /// row, the default fetch style.
    pub fn fetch_combined(&self) -> CombinedRow {
        CombinedRow {
            by_index: self.fetch_numeric(),
            by_name: self.fetch_associative(),
        }
    }
}

/// Result of [`Row::fetch_combined`]: the row viewed both ways at once.
#[derive(Debug, Clone)]
pub struct CombinedRow {
    pub by_index: Vec<Value>,
    pub by_name: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row() -> Row {
        let column_names = Arc::new(vec!["ID".to_string(), "NAME".to_string()]);
        let mut values = HashMap::new();
        values.insert("ID".to_string(), Value::Int(42));
        values.insert("NAME".to_string(), Value::String("ABCD".to_string()));
        Row::new(column_names, values).with_record_id(7)
    }

    #[test]
    fn numeric_and_associative_agree() {
        let row = make_row();
        let numeric = row.fetch_numeric();
        let associative = row.fetch_associative();

        assert_eq!(numeric[0], associative["ID"]);
        assert_eq!(numeric[1], associative["NAME"]);
    }

    #[test]
    fn combined_exposes_both_views() {
        let row = make_row();
        let combined = row.fetch_combined();
        assert_eq!(combined.by_index[0], Value::Int(42));
        assert_eq!(combined.by_name["NAME"], Value::String("ABCD".to_string()));
    }

    #[test]
    fn record_id_is_not_a_value_key() {
        let row = make_row();
        assert_eq!(row.record_id(), Some(7));
        assert!(row.get("_ID").is_none());
        assert!(!row.fetch_associative().contains_key("_ID"));
    }
}
