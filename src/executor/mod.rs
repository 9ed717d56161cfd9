// Module declarations
pub mod ddl;
pub mod dml;
mod policy;
pub mod queries;

// Re-export the execution surface
pub use policy::{
    AutoConfirm, ConfirmPolicy, ConsoleSink, DenyAll, MemorySink, MessageSink, StdinConfirm,
};
pub use queries::{select, SelectCache};

use std::time::Instant;

use crate::core::{Catalog, DbError, TableData, TableSchema};
use crate::parser::{Clause, Command};
use crate::storage::JsonStorage;

/// Outcome of one executed command.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Operation finished; the message describes it.
    Success(String),
    /// SELECT output: column names in schema order plus the matching rows.
    Rows {
        columns: Vec<String>,
        rows: TableData,
    },
    /// A destructive operation the confirmation policy declined.
    Cancelled,
}

/// Dispatches parsed commands to the schema and row operations, wiring in
/// persistence, the select cache, confirmation, and diagnostics.
///
/// The catalog is reloaded before every command and persisted after every
/// successful mutation; row files are loaded and saved whole. Unreadable
/// files degrade to empty defaults with a warning through the sink, so a
/// corrupt store never takes down the command loop.
pub struct Executor {
    storage: JsonStorage,
    cache: SelectCache,
    confirm: Box<dyn ConfirmPolicy>,
    sink: Box<dyn MessageSink>,
}

impl Executor {
    #[must_use]
    pub fn new(
        storage: JsonStorage,
        confirm: Box<dyn ConfirmPolicy>,
        sink: Box<dyn MessageSink>,
    ) -> Self {
        Self {
            storage,
            cache: SelectCache::new(),
            confirm,
            sink,
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<QueryResult, DbError> {
        match command {
            Command::CreateTable { table, columns } => self.create_table(&table, &columns),
            Command::DropTable { table } => self.drop_table(&table),
            Command::ListTables => self.list_tables(),
            Command::Insert { table, values } => self.insert(&table, &values),
            Command::Select { table, filter } => self.select(&table, filter.as_ref()),
            Command::Update { table, set, filter } => self.update(&table, &set, filter.as_ref()),
            Command::Delete { table, filter } => self.delete(&table, filter.as_ref()),
            // The shell intercepts these; keep them no-ops for library callers.
            Command::Help | Command::Exit => Ok(QueryResult::Success(String::new())),
        }
    }

    fn load_catalog(&self) -> Catalog {
        match self.storage.load_catalog() {
            Ok(catalog) => catalog,
            Err(err) => {
                self.sink.emit(&format!(
                    "warning: catalog unreadable ({err}); starting from an empty catalog"
                ));
                Catalog::new()
            }
        }
    }

    fn load_rows(&self, table: &str) -> TableData {
        match self.storage.load_rows(table) {
            Ok(rows) => rows,
            Err(err) => {
                self.sink.emit(&format!(
                    "warning: rows for '{table}' unreadable ({err}); treating the table as empty"
                ));
                TableData::new()
            }
        }
    }

    fn create_table(
        &mut self,
        table: &str,
        columns: &[(String, String)],
    ) -> Result<QueryResult, DbError> {
        let mut catalog = self.load_catalog();
        let schema = ddl::create_table(&mut catalog, table, columns)?;
        self.storage.save_catalog(&catalog)?;
        self.storage.save_rows(table, &TableData::new())?;
        Ok(QueryResult::Success(format!(
            "Table created: {}",
            schema.describe()
        )))
    }

    fn drop_table(&mut self, table: &str) -> Result<QueryResult, DbError> {
        let mut catalog = self.load_catalog();
        if !catalog.contains(table) {
            return Err(DbError::TableNotFound(table.to_string()));
        }
        if !self.confirm.confirm(&format!("dropping table '{table}'")) {
            return Ok(QueryResult::Cancelled);
        }
        ddl::drop_table(&mut catalog, table)?;
        self.storage.save_catalog(&catalog)?;
        self.storage.remove_rows(table)?;
        self.cache.invalidate();
        Ok(QueryResult::Success(format!("Table '{table}' dropped")))
    }

    fn list_tables(&mut self) -> Result<QueryResult, DbError> {
        let catalog = self.load_catalog();
        if catalog.is_empty() {
            return Ok(QueryResult::Success("No tables defined".to_string()));
        }
        let lines: Vec<String> = catalog.iter().map(TableSchema::describe).collect();
        Ok(QueryResult::Success(format!(
            "Tables:\n  {}",
            lines.join("\n  ")
        )))
    }

    fn insert(&mut self, table: &str, values: &[String]) -> Result<QueryResult, DbError> {
        let started = Instant::now();
        let catalog = self.load_catalog();
        let schema = catalog
            .get(table)
            .ok_or_else(|| DbError::TableNotFound(table.to_string()))?;

        let mut rows = self.load_rows(table);
        let id = dml::insert(schema, &mut rows, values)?;
        self.storage.save_rows(table, &rows)?;
        self.cache.invalidate();

        self.emit_timing("insert", started);
        Ok(QueryResult::Success(format!(
            "Row inserted into '{table}' (ID: {id})"
        )))
    }

    fn select(&mut self, table: &str, filter: Option<&Clause>) -> Result<QueryResult, DbError> {
        let started = Instant::now();
        let catalog = self.load_catalog();
        let schema = catalog
            .get(table)
            .ok_or_else(|| DbError::TableNotFound(table.to_string()))?;
        let columns = schema.column_names();

        let rows = self.load_rows(table);
        let matched = queries::select(&rows, filter, &mut self.cache);

        self.emit_timing("select", started);
        Ok(QueryResult::Rows {
            columns,
            rows: matched,
        })
    }

    fn update(
        &mut self,
        table: &str,
        set: &Clause,
        filter: Option<&Clause>,
    ) -> Result<QueryResult, DbError> {
        let catalog = self.load_catalog();
        if !catalog.contains(table) {
            return Err(DbError::TableNotFound(table.to_string()));
        }

        let mut rows = self.load_rows(table);
        let updated = dml::update(&mut rows, set, filter);
        self.storage.save_rows(table, &rows)?;
        self.cache.invalidate();
        Ok(QueryResult::Success(format!("{updated} row(s) updated")))
    }

    fn delete(&mut self, table: &str, filter: Option<&Clause>) -> Result<QueryResult, DbError> {
        let catalog = self.load_catalog();
        if !catalog.contains(table) {
            return Err(DbError::TableNotFound(table.to_string()));
        }
        let Some(clause) = filter else {
            return Err(DbError::MissingWhere);
        };
        if !self
            .confirm
            .confirm(&format!("deleting rows from '{table}'"))
        {
            return Ok(QueryResult::Cancelled);
        }

        let rows = self.load_rows(table);
        let (kept, removed) = dml::delete(rows, clause);
        self.storage.save_rows(table, &kept)?;
        self.cache.invalidate();
        Ok(QueryResult::Success(format!("{removed} row(s) deleted")))
    }

    fn emit_timing(&self, operation: &str, started: Instant) {
        self.sink.emit(&format!(
            "{operation} took {:.3}s",
            started.elapsed().as_secs_f64()
        ));
    }
}
