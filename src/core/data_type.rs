use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Declared column type. The textual names (`int`, `str`, `bool`) are what
/// the command grammar accepts and what the catalog file stores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DataType {
    #[serde(rename = "int")]
    Integer,
    #[serde(rename = "bool")]
    Boolean,
    #[serde(rename = "str")]
    Text,
}

impl DataType {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "int",
            Self::Boolean => "bool",
            Self::Text => "str",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(Self::Integer),
            "bool" => Ok(Self::Boolean),
            "str" => Ok(Self::Text),
            _ => Err(()),
        }
    }
}
