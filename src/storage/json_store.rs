//! JSON persistence for the catalog and per-table row files.
//!
//! Everything is whole-file: a load reads and parses one document, a save
//! rewrites it. Missing files read as empty defaults; corrupt files surface
//! as errors the executor degrades at its boundary.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{Catalog, DbError, TableData};

/// On-disk layout: `<data_dir>/catalog.json` for the schemas and
/// `<data_dir>/tables/<name>.json` for each table's rows.
pub struct JsonStorage {
    data_dir: PathBuf,
}

impl JsonStorage {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self, DbError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(data_dir.join("tables"))?;
        Ok(Self { data_dir })
    }

    fn catalog_path(&self) -> PathBuf {
        self.data_dir.join("catalog.json")
    }

    fn rows_path(&self, table: &str) -> PathBuf {
        self.data_dir.join("tables").join(format!("{table}.json"))
    }

    pub fn load_catalog(&self) -> Result<Catalog, DbError> {
        let path = self.catalog_path();
        if !path.exists() {
            return Ok(Catalog::new());
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save_catalog(&self, catalog: &Catalog) -> Result<(), DbError> {
        let text = serde_json::to_string_pretty(catalog)?;
        fs::write(self.catalog_path(), text)?;
        Ok(())
    }

    pub fn load_rows(&self, table: &str) -> Result<TableData, DbError> {
        let path = self.rows_path(table);
        if !path.exists() {
            return Ok(TableData::new());
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save_rows(&self, table: &str, rows: &TableData) -> Result<(), DbError> {
        let text = serde_json::to_string_pretty(rows)?;
        fs::write(self.rows_path(table), text)?;
        Ok(())
    }

    pub fn remove_rows(&self, table: &str) -> Result<(), DbError> {
        let path = self.rows_path(table);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
