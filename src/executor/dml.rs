//! Row mutations: INSERT, UPDATE, DELETE.

use crate::core::{DbError, Row, TableData, TableSchema, Value, ID_COLUMN};
use crate::parser::Clause;

/// Appends a new row built from raw value tokens, coerced per the declared
/// column types, and returns the assigned ID.
///
/// IDs follow a last-used-max strategy: the new ID is one past the highest
/// ID currently present, so deleting the highest-ID row makes that ID
/// available again on the next insert.
pub fn insert(
    schema: &TableSchema,
    rows: &mut TableData,
    raw_values: &[String],
) -> Result<i64, DbError> {
    let expected = schema.columns.len() - 1;
    if raw_values.len() != expected {
        return Err(DbError::ValueCountMismatch {
            expected,
            got: raw_values.len(),
        });
    }

    let id = rows.iter().filter_map(Row::id).max().unwrap_or(0) + 1;
    let mut row = Row::with_id(id);
    for (column, raw) in schema.value_columns().iter().zip(raw_values) {
        let value = Value::coerce(raw, column.data_type, &column.name)?;
        row.set(column.name.clone(), value);
    }

    rows.push(row);
    Ok(id)
}

/// Applies every SET pair to each row matching the filter (`None` matches
/// all rows), mutating in place. `ID` is never written even when the SET
/// clause names it, and fields the row does not already have are skipped.
/// Returns the matched-row count.
pub fn update(rows: &mut TableData, set: &Clause, filter: Option<&Clause>) -> usize {
    let mut updated = 0;
    for row in rows.iter_mut() {
        if filter.map_or(true, |clause| clause.matches(row)) {
            for (field, value) in set.iter() {
                if field != ID_COLUMN && row.contains(field) {
                    row.set(field.to_string(), value.clone());
                }
            }
            updated += 1;
        }
    }
    updated
}

/// Drops every row matching the clause; the kept and removed rows
/// partition the input. The dispatching executor enforces that a clause is
/// present and the operation confirmed before this runs.
pub fn delete(rows: TableData, filter: &Clause) -> (TableData, usize) {
    let before = rows.len();
    let kept: TableData = rows.into_iter().filter(|row| !filter.matches(row)).collect();
    let removed = before - kept.len();
    (kept, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, DataType};

    fn users_schema() -> TableSchema {
        TableSchema::new(
            "users".to_string(),
            vec![
                Column::new("name", DataType::Text),
                Column::new("age", DataType::Integer),
            ],
        )
    }

    fn seeded_rows() -> TableData {
        let schema = users_schema();
        let mut rows = TableData::new();
        insert(&schema, &mut rows, &["Alice".to_string(), "30".to_string()]).unwrap();
        insert(&schema, &mut rows, &["Bob".to_string(), "25".to_string()]).unwrap();
        rows
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let rows = seeded_rows();
        assert_eq!(rows[0].id(), Some(1));
        assert_eq!(rows[1].id(), Some(2));
        assert_eq!(rows[0].get("name"), Some(&Value::Text("Alice".to_string())));
        assert_eq!(rows[0].get("age"), Some(&Value::Integer(30)));
    }

    #[test]
    fn test_insert_reuses_id_after_deleting_max() {
        let schema = users_schema();
        let rows = seeded_rows();

        let clause: Clause = [("ID", Value::Integer(2))].into_iter().collect();
        let (mut kept, removed) = delete(rows, &clause);
        assert_eq!(removed, 1);

        let id = insert(
            &schema,
            &mut kept,
            &["Carol".to_string(), "41".to_string()],
        )
        .unwrap();
        assert_eq!(id, 2);
    }

    #[test]
    fn test_insert_wrong_value_count() {
        let schema = users_schema();
        let mut rows = TableData::new();
        let err = insert(&schema, &mut rows, &["Alice".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            DbError::ValueCountMismatch {
                expected: 2,
                got: 1
            }
        ));
        assert!(rows.is_empty());
    }

    #[test]
    fn test_insert_coercion_failure_leaves_rows_untouched() {
        let schema = users_schema();
        let mut rows = seeded_rows();
        let err = insert(
            &schema,
            &mut rows,
            &["Carol".to_string(), "unknown".to_string()],
        )
        .unwrap_err();
        assert!(matches!(err, DbError::Coercion { .. }));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_update_matching_rows_only() {
        let mut rows = seeded_rows();
        let set: Clause = [("age", Value::Integer(31))].into_iter().collect();
        let filter: Clause = [("name", Value::Text("Alice".to_string()))]
            .into_iter()
            .collect();

        let updated = update(&mut rows, &set, Some(&filter));
        assert_eq!(updated, 1);
        assert_eq!(rows[0].get("age"), Some(&Value::Integer(31)));
        assert_eq!(rows[1].get("age"), Some(&Value::Integer(25)));
    }

    #[test]
    fn test_update_without_filter_matches_all() {
        let mut rows = seeded_rows();
        let set: Clause = [("age", Value::Integer(0))].into_iter().collect();
        let updated = update(&mut rows, &set, None);
        assert_eq!(updated, 2);
        assert!(rows.iter().all(|r| r.get("age") == Some(&Value::Integer(0))));
    }

    #[test]
    fn test_update_never_touches_id() {
        let mut rows = seeded_rows();
        let set: Clause = [("ID", Value::Integer(99)), ("age", Value::Integer(31))]
            .into_iter()
            .collect();
        let filter: Clause = [("ID", Value::Integer(1))].into_iter().collect();

        let updated = update(&mut rows, &set, Some(&filter));
        assert_eq!(updated, 1);
        assert_eq!(rows[0].id(), Some(1));
        assert_eq!(rows[0].get("age"), Some(&Value::Integer(31)));
    }

    #[test]
    fn test_update_skips_unknown_fields() {
        let mut rows = seeded_rows();
        let set: Clause = [("city", Value::Text("Oslo".to_string()))]
            .into_iter()
            .collect();
        let updated = update(&mut rows, &set, None);
        assert_eq!(updated, 2);
        assert!(rows.iter().all(|r| !r.contains("city")));
    }

    #[test]
    fn test_delete_partitions_rows() {
        let rows = seeded_rows();
        let clause: Clause = [("name", Value::Text("Bob".to_string()))]
            .into_iter()
            .collect();

        let (kept, removed) = delete(rows, &clause);
        assert_eq!(removed, 1);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].get("name"), Some(&Value::Text("Alice".to_string())));
    }

    #[test]
    fn test_delete_no_match_keeps_everything() {
        let rows = seeded_rows();
        let clause: Clause = [("name", Value::Text("Zoe".to_string()))]
            .into_iter()
            .collect();
        let (kept, removed) = delete(rows, &clause);
        assert_eq!(removed, 0);
        assert_eq!(kept.len(), 2);
    }
}
