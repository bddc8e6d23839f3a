//! SQLite-backed data store.

use crate::error::StoreError;
use crate::model::{Row, from_sql_value, to_sql_value};
use crate::store::DataStore;
use async_trait::async_trait;
use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::{Batch, Connection, params_from_iter};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Bundled seed script creating and filling the `tickets` table.
pub const DEFAULT_SEED_SQL: &str = include_str!("../sql/seed_data.sql");

/// SQLite store sharing a single connection across tasks.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a database file, creating parent directories as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        info!("opened sqlite store (path={})", path.display());
        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        debug!("opened in-memory sqlite store");
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Execute a multi-statement script. Bootstrap only; tools never reach this path.
    pub fn execute_script(&self, sql: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        conn.execute_batch(sql)?;
        debug!("executed bootstrap script (len={})", sql.len());
        Ok(())
    }

    /// Run the bundled ticket seed.
    pub fn seed_default(&self) -> Result<(), StoreError> {
        self.execute_script(DEFAULT_SEED_SQL)?;
        info!("database initialised with bundled seed");
        Ok(())
    }

    /// Run a seed script read from disk.
    pub fn seed_from_path(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let script = fs::read_to_string(path)?;
        self.execute_script(&script)?;
        info!("database initialised (seed={})", path.display());
        Ok(())
    }
}

#[async_trait]
impl DataStore for SqliteStore {
    async fn query_rows(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, StoreError> {
        let conn = self.conn.clone();
        let sql = sql.to_string();
        let params = params.to_vec();
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock();
            query_blocking(&conn, &sql, &params)
        })
        .await
        .map_err(|err| StoreError::Worker(err.to_string()))?
    }
}

fn query_blocking(conn: &Connection, sql: &str, params: &[Value]) -> Result<Vec<Row>, StoreError> {
    // Only the first statement is prepared; anything but comments or
    // whitespace after it fails the query.
    let mut batch = Batch::new(conn, sql);
    let Some(mut stmt) = batch.next()? else {
        return Err(StoreError::EmptyStatement);
    };
    if batch.next()?.is_some() {
        return Err(StoreError::MultipleStatements);
    }
    if !stmt.readonly() {
        return Err(StoreError::NotReadOnly(sql.to_string()));
    }
    let bound = params
        .iter()
        .enumerate()
        .map(|(index, value)| to_sql_value(index, value))
        .collect::<Result<Vec<_>, _>>()?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();

    let mut rows = stmt.query(params_from_iter(bound))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut record = Row::new();
        for (index, name) in columns.iter().enumerate() {
            record.insert(name.clone(), from_sql_value(row.get_ref(index)?));
        }
        out.push(record);
    }
    debug!("query returned rows (count={})", out.len());
    Ok(out)
}
