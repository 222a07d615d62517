use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::schema;
use crate::types::{Todo, TodoFields};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("todo {0} not found")]
    NotFound(i64),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage task join error: {0}")]
    Task(String),
}

/// Persistence for todo records.
///
/// `update` and `delete_by_id` report [`StoreError::NotFound`] when no row
/// carries the id, the same way `get_by_id` does.
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn init(&self) -> StoreResult<()>;

    async fn create(&self, fields: TodoFields) -> StoreResult<Todo>;

    async fn get_by_id(&self, id: i64) -> StoreResult<Todo>;

    /// All todos in insertion order.
    async fn get_all(&self) -> StoreResult<Vec<Todo>>;

    async fn update(&self, id: i64, fields: TodoFields) -> StoreResult<()>;

    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
}

#[derive(Debug, Clone)]
pub struct SqliteTodoStore {
    db_path: PathBuf,
}

impl SqliteTodoStore {
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    async fn with_connection<T, F>(&self, func: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let connection = open_connection(&db_path)?;
            func(&connection)
        })
        .await
        .map_err(|error| StoreError::Task(error.to_string()))?
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn init(&self) -> StoreResult<()> {
        self.with_connection(|connection| {
            connection.execute_batch(&schema::create_table_sql())?;
            Ok(())
        })
        .await
    }

    async fn create(&self, fields: TodoFields) -> StoreResult<Todo> {
        self.with_connection(move |connection| {
            connection.execute(
                &schema::insert_sql(),
                params![
                    fields.title,
                    fields.order,
                    schema::done_to_column(fields.done)
                ],
            )?;
            let id = connection.last_insert_rowid();
            debug!("created todo {}", id);
            Ok(fields.with_id(id))
        })
        .await
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Todo> {
        self.with_connection(move |connection| {
            let sql = format!("{} WHERE {} = ?1", schema::select_sql(), schema::COL_ID);
            connection
                .query_row(&sql, params![id], schema::todo_from_row)
                .optional()?
                .ok_or(StoreError::NotFound(id))
        })
        .await
    }

    async fn get_all(&self) -> StoreResult<Vec<Todo>> {
        self.with_connection(|connection| {
            let sql = format!("{} ORDER BY {} ASC", schema::select_sql(), schema::COL_ID);
            let mut stmt = connection.prepare(&sql)?;
            let todos = stmt
                .query_map([], schema::todo_from_row)?
                .collect::<Result<Vec<Todo>, _>>()?;
            Ok(todos)
        })
        .await
    }

    async fn update(&self, id: i64, fields: TodoFields) -> StoreResult<()> {
        self.with_connection(move |connection| {
            let changed = connection.execute(
                &schema::update_sql(),
                params![
                    fields.title,
                    fields.order,
                    schema::done_to_column(fields.done),
                    id
                ],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound(id));
            }
            debug!("updated todo {}", id);
            Ok(())
        })
        .await
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        self.with_connection(move |connection| {
            let deleted = connection.execute(&schema::delete_sql(), params![id])?;
            if deleted == 0 {
                return Err(StoreError::NotFound(id));
            }
            debug!("deleted todo {}", id);
            Ok(())
        })
        .await
    }
}

fn open_connection(path: &Path) -> StoreResult<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let connection = Connection::open(path)?;
    connection.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        "#,
    )?;
    Ok(connection)
}
