use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::value::Value;

/// Name of the auto-assigned key column present in every table.
pub const ID_COLUMN: &str = "ID";

/// One record: a field-to-value mapping including its immutable ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Row {
    fields: BTreeMap<String, Value>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(id: i64) -> Self {
        let mut row = Self::default();
        row.fields.insert(ID_COLUMN.to_string(), Value::Integer(id));
        row
    }

    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.fields.get(ID_COLUMN).and_then(Value::as_int)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }
}

/// One table's full row set, loaded and saved as a unit.
pub type TableData = Vec<Row>;
