use serde::{Deserialize, Serialize};

use super::data_type::DataType;
use super::error::DbError;

/// A typed scalar. Untagged so rows serialize as plain JSON objects,
/// e.g. `{"ID": 1, "name": "Alice", "active": true}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Text(String),
}

impl Value {
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Coerces a raw token to the column's declared type.
    ///
    /// Integer columns reject non-numeric input, which rejects the whole
    /// insert. Boolean columns read `true`, `1` and `yes` (any case) as
    /// true and anything else as false. Text columns keep the token
    /// verbatim.
    pub fn coerce(raw: &str, data_type: DataType, column: &str) -> Result<Self, DbError> {
        match data_type {
            DataType::Integer => {
                raw.trim()
                    .parse::<i64>()
                    .map(Self::Integer)
                    .map_err(|_| DbError::Coercion {
                        column: column.to_string(),
                        type_name: data_type.name(),
                        value: raw.to_string(),
                    })
            }
            DataType::Boolean => Ok(Self::Boolean(matches!(
                raw.to_ascii_lowercase().as_str(),
                "true" | "1" | "yes"
            ))),
            DataType::Text => Ok(Self::Text(raw.to_string())),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}
