//! Schema operations: create and drop tables in the catalog.
//!
//! These functions only transform the catalog; the persistence side
//! effects (creating or removing the table's row file) are handled by the
//! dispatching [`Executor`](super::Executor).

use std::collections::HashSet;
use std::str::FromStr;

use crate::core::{Catalog, Column, DataType, DbError, TableSchema};

/// Builds the schema (ID column first), validates type names and column
/// uniqueness, and stores it in the catalog. Returns the stored schema so
/// the caller can report it.
pub fn create_table(
    catalog: &mut Catalog,
    name: &str,
    columns: &[(String, String)],
) -> Result<TableSchema, DbError> {
    if catalog.contains(name) {
        return Err(DbError::TableAlreadyExists(name.to_string()));
    }

    let mut declared = Vec::with_capacity(columns.len());
    for (column, type_name) in columns {
        let data_type = DataType::from_str(type_name).map_err(|_| DbError::InvalidColumnType {
            column: column.clone(),
            type_name: type_name.clone(),
        })?;
        declared.push(Column::new(column.clone(), data_type));
    }

    // ID is prepended by the schema constructor, so a declared `ID` column
    // shows up here as a duplicate.
    let schema = TableSchema::new(name.to_string(), declared);
    let mut seen = HashSet::new();
    for column in &schema.columns {
        if !seen.insert(column.name.as_str()) {
            return Err(DbError::DuplicateColumn(column.name.clone()));
        }
    }

    catalog.insert(schema.clone());
    Ok(schema)
}

/// Removes the schema from the catalog.
pub fn drop_table(catalog: &mut Catalog, name: &str) -> Result<(), DbError> {
    catalog
        .remove(name)
        .map(|_| ())
        .ok_or_else(|| DbError::TableNotFound(name.to_string()))
}
