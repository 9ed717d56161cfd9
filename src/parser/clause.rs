//! WHERE and SET clause parsing.
//!
//! A clause is a non-empty field-to-value mapping used either as a
//! conjunctive equality predicate (WHERE) or as an assignment list (SET).
//! Callers express the absence of a clause as `Option<Clause>`; this parser
//! never produces an empty clause, so a present-but-empty WHERE that would
//! silently match every row is unrepresentable.

use std::collections::BTreeMap;

use crate::core::{DbError, Row, Value};

use super::common::scalar;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    pairs: BTreeMap<String, Value>,
}

impl Clause {
    /// True when every pair equals the row's field. A field the row does
    /// not have never matches.
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        self.pairs
            .iter()
            .all(|(field, value)| row.get(field) == Some(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.pairs.iter().map(|(field, value)| (field.as_str(), value))
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.pairs.get(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for Clause {
    fn from_iter<I: IntoIterator<Item = (S, Value)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(field, value)| (field.into(), value))
                .collect(),
        }
    }
}

fn assignment(text: &str) -> Result<(String, Value), DbError> {
    let Some((field, raw)) = text.split_once('=') else {
        return Err(DbError::MalformedClause(text.trim().to_string()));
    };
    let field = field.trim();
    if field.is_empty() {
        return Err(DbError::MalformedClause(text.trim().to_string()));
    }
    Ok((field.to_string(), scalar(raw.trim())))
}

/// Parses exactly one `field=value` pair. No AND/OR support.
pub fn parse_where(text: &str) -> Result<Clause, DbError> {
    let (field, value) = assignment(text)?;
    Ok(Clause {
        pairs: BTreeMap::from([(field, value)]),
    })
}

/// Parses a comma-separated assignment list, each pair exactly like
/// WHERE's. At least one assignment is required.
pub fn parse_set(text: &str) -> Result<Clause, DbError> {
    if text.trim().is_empty() {
        return Err(DbError::MalformedClause(String::new()));
    }
    let mut pairs = BTreeMap::new();
    for part in text.split(',') {
        let (field, value) = assignment(part)?;
        pairs.insert(field, value);
    }
    Ok(Clause { pairs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;

    #[test]
    fn test_parse_where_single_pair() {
        let clause = parse_where("age = 28").unwrap();
        assert_eq!(clause.len(), 1);
        assert_eq!(clause.get("age"), Some(&Value::Integer(28)));
    }

    #[test]
    fn test_parse_where_quoted_value() {
        let clause = parse_where("name = 'John Smith'").unwrap();
        assert_eq!(clause.get("name"), Some(&Value::Text("John Smith".to_string())));
    }

    #[test]
    fn test_parse_where_missing_equals() {
        let err = parse_where("age 28").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_parse_set_multiple_assignments() {
        let clause = parse_set("name='John', age=30, active=true").unwrap();
        assert_eq!(clause.len(), 3);
        assert_eq!(clause.get("name"), Some(&Value::Text("John".to_string())));
        assert_eq!(clause.get("age"), Some(&Value::Integer(30)));
        assert_eq!(clause.get("active"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn test_parse_set_rejects_bad_assignment() {
        assert!(parse_set("name='John', age").is_err());
        assert!(parse_set("").is_err());
        assert!(parse_set("   ").is_err());
    }

    #[test]
    fn test_matches_conjunction_and_missing_field() {
        let mut row = Row::with_id(1);
        row.set("name", Value::Text("Alice".to_string()));
        row.set("age", Value::Integer(30));

        let clause: Clause = [
            ("name", Value::Text("Alice".to_string())),
            ("age", Value::Integer(30)),
        ]
        .into_iter()
        .collect();
        assert!(clause.matches(&row));

        let wrong_age: Clause = [
            ("name", Value::Text("Alice".to_string())),
            ("age", Value::Integer(31)),
        ]
        .into_iter()
        .collect();
        assert!(!wrong_age.matches(&row));

        // A field the row does not have is a non-match, not an error.
        let missing: Clause = [("city", Value::Text("Oslo".to_string()))]
            .into_iter()
            .collect();
        assert!(!missing.matches(&row));
    }
}
