use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::column::Column;
use super::data_type::DataType;
use super::row::ID_COLUMN;

/// Ordered column definitions for one table. The first column is always
/// `(ID, int)`; it is added here and never supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<Column>,
}

impl TableSchema {
    #[must_use]
    pub fn new(name: String, declared: Vec<Column>) -> Self {
        let mut columns = Vec::with_capacity(declared.len() + 1);
        columns.push(Column::new(ID_COLUMN, DataType::Integer));
        columns.extend(declared);
        Self { name, columns }
    }

    /// Columns the caller supplies values for: everything after ID.
    #[must_use]
    pub fn value_columns(&self) -> &[Column] {
        &self.columns[1..]
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// One line per table in `list_tables` output: `name: ID:int, col:type, ...`
    #[must_use]
    pub fn describe(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{}:{}", c.name, c.data_type))
            .collect();
        format!("{}: {}", self.name, columns.join(", "))
    }
}

/// Table-name to schema mapping, persisted as `catalog.json`.
///
/// An emptied catalog serializes without the `tables` key at all; absent
/// and empty are equivalent on read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalog {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    tables: BTreeMap<String, TableSchema>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn insert(&mut self, schema: TableSchema) {
        self.tables.insert(schema.name.clone(), schema);
    }

    pub fn remove(&mut self, name: &str) -> Option<TableSchema> {
        self.tables.remove(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.values()
    }
}
