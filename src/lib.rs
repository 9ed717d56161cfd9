// Flatbase - flat-file JSON record store with a line-oriented command shell

// Core data model (values, columns, schemas, rows, catalog)
pub mod core;

// Command and clause parsing
pub mod parser;

// Command execution (DDL, DML, SELECT, policies)
pub mod executor;

// JSON persistence (catalog and per-table row files)
pub mod storage;

// Re-export commonly used types for convenience
pub use crate::core::{
    Catalog, Column, DataType, DbError, ErrorKind, Row, TableData, TableSchema, Value, ID_COLUMN,
};
pub use crate::executor::{Executor, QueryResult, SelectCache};
pub use crate::parser::{parse_command, parse_set, parse_where, Clause, Command};
pub use crate::storage::JsonStorage;
