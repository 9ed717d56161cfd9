use thiserror::Error;

/// Broad failure classes the command loop uses to decide how a failure is
/// handled. See [`DbError::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid command arguments; prior state is kept and the loop continues.
    User,
    /// A value or clause could not be parsed; the write was rejected.
    Parse,
    /// Persistence failure; degrades to an empty default at the storage boundary.
    Storage,
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Table '{0}' not found")]
    TableNotFound(String),
    #[error("Table '{0}' already exists")]
    TableAlreadyExists(String),
    #[error("Invalid type '{type_name}' for column '{column}'. Allowed types: int, str, bool")]
    InvalidColumnType { column: String, type_name: String },
    #[error("Duplicate column '{0}'")]
    DuplicateColumn(String),
    #[error("Expected {expected} values, got {got}")]
    ValueCountMismatch { expected: usize, got: usize },
    #[error("Cannot store '{value}' in {type_name} column '{column}'")]
    Coercion {
        column: String,
        type_name: &'static str,
        value: String,
    },
    #[error("DELETE requires a WHERE clause")]
    MissingWhere,
    #[error("Malformed clause '{0}': expected field=value")]
    MalformedClause(String),
    #[error("Unknown command '{0}'. Type 'help' for the command list")]
    UnknownCommand(String),
    #[error("Malformed command: {0}")]
    MalformedCommand(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DbError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Coercion { .. } | Self::MalformedClause(_) => ErrorKind::Parse,
            Self::Io(_) | Self::Serialization(_) => ErrorKind::Storage,
            _ => ErrorKind::User,
        }
    }
}
