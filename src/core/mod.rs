// Module declarations
pub mod column;
pub mod data_type;
pub mod error;
pub mod row;
pub mod schema;
pub mod value;

// Re-exports for convenience
pub use column::Column;
pub use data_type::DataType;
pub use error::{DbError, ErrorKind};
pub use row::{Row, TableData, ID_COLUMN};
pub use schema::{Catalog, TableSchema};
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Text("hello".to_string()).to_string(), "hello");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Integer(42).as_int(), Some(42));
        assert_eq!(Value::Text("hello".to_string()).as_int(), None);
        assert_eq!(Value::Text("hello".to_string()).as_text(), Some("hello"));
        assert_eq!(Value::Boolean(false).as_bool(), Some(false));
        assert_eq!(Value::Integer(1).as_bool(), None);
    }

    #[test]
    fn test_coerce_integer() {
        let value = Value::coerce("30", DataType::Integer, "age").unwrap();
        assert_eq!(value, Value::Integer(30));

        let value = Value::coerce(" -7 ", DataType::Integer, "age").unwrap();
        assert_eq!(value, Value::Integer(-7));

        let err = Value::coerce("thirty", DataType::Integer, "age").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_coerce_boolean() {
        for raw in ["true", "TRUE", "1", "yes", "Yes"] {
            assert_eq!(
                Value::coerce(raw, DataType::Boolean, "active").unwrap(),
                Value::Boolean(true)
            );
        }
        for raw in ["false", "0", "no", "anything"] {
            assert_eq!(
                Value::coerce(raw, DataType::Boolean, "active").unwrap(),
                Value::Boolean(false)
            );
        }
    }

    #[test]
    fn test_coerce_text_verbatim() {
        assert_eq!(
            Value::coerce("30", DataType::Text, "name").unwrap(),
            Value::Text("30".to_string())
        );
    }

    #[test]
    fn test_schema_id_column_first() {
        let schema = TableSchema::new(
            "users".to_string(),
            vec![
                Column::new("name", DataType::Text),
                Column::new("age", DataType::Integer),
            ],
        );
        assert_eq!(schema.columns.len(), 3);
        assert_eq!(schema.columns[0], Column::new(ID_COLUMN, DataType::Integer));
        assert_eq!(schema.columns[1].name, "name");
        assert_eq!(schema.columns[2].name, "age");
        assert_eq!(schema.value_columns().len(), 2);
        assert_eq!(schema.describe(), "users: ID:int, name:str, age:int");
    }

    #[test]
    fn test_row_json_shape() {
        let mut row = Row::with_id(1);
        row.set("name", Value::Text("Alice".to_string()));
        row.set("age", Value::Integer(30));

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"ID": 1, "name": "Alice", "age": 30})
        );

        let back: Row = serde_json::from_value(json).unwrap();
        assert_eq!(back, row);
        assert_eq!(back.id(), Some(1));
    }

    #[test]
    fn test_empty_catalog_serializes_without_table_map() {
        let catalog = Catalog::new();
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json, serde_json::json!({}));

        // Absent and empty read back the same.
        let from_absent: Catalog = serde_json::from_str("{}").unwrap();
        let from_empty: Catalog = serde_json::from_str(r#"{"tables": {}}"#).unwrap();
        assert!(from_absent.is_empty());
        assert!(from_empty.is_empty());
    }

    #[test]
    fn test_catalog_round_trip_preserves_column_order() {
        let mut catalog = Catalog::new();
        catalog.insert(TableSchema::new(
            "users".to_string(),
            vec![
                Column::new("name", DataType::Text),
                Column::new("age", DataType::Integer),
                Column::new("active", DataType::Boolean),
            ],
        ));

        let text = serde_json::to_string(&catalog).unwrap();
        let back: Catalog = serde_json::from_str(&text).unwrap();
        assert_eq!(back, catalog);
        let names = back.get("users").unwrap().column_names();
        assert_eq!(names, ["ID", "name", "age", "active"]);
    }
}
