//! Mapping between [`Todo`] fields and the `todos` table.
//!
//! | field   | column      | storage type                  |
//! |---------|-------------|-------------------------------|
//! | `id`    | `id`        | `INTEGER PRIMARY KEY AUTOINCREMENT` |
//! | `title` | `title`     | `TEXT`                        |
//! | `order` | `order_col` | `INTEGER`                     |
//! | `done`  | `done`      | `INTEGER`, 0 or 1             |
//!
//! `ORDER` is a reserved word in SQLite, so the sort position lives in
//! `order_col`. Every query in the store goes through the names below;
//! nothing else in the workspace should spell a column name.

use rusqlite::Row;

use crate::types::Todo;

pub const TABLE: &str = "todos";
pub const COL_ID: &str = "id";
pub const COL_TITLE: &str = "title";
pub const COL_ORDER: &str = "order_col";
pub const COL_DONE: &str = "done";

pub fn create_table_sql() -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {TABLE} (
            {COL_ID} INTEGER PRIMARY KEY AUTOINCREMENT,
            {COL_TITLE} TEXT NOT NULL,
            {COL_ORDER} INTEGER NOT NULL DEFAULT 0,
            {COL_DONE} INTEGER NOT NULL DEFAULT 0 CHECK ({COL_DONE} IN (0, 1))
        );
        "#
    )
}

pub fn select_sql() -> String {
    format!("SELECT {COL_ID}, {COL_TITLE}, {COL_ORDER}, {COL_DONE} FROM {TABLE}")
}

pub fn insert_sql() -> String {
    format!("INSERT INTO {TABLE} ({COL_TITLE}, {COL_ORDER}, {COL_DONE}) VALUES (?1, ?2, ?3)")
}

pub fn update_sql() -> String {
    format!(
        "UPDATE {TABLE} SET {COL_TITLE} = ?1, {COL_ORDER} = ?2, {COL_DONE} = ?3 WHERE {COL_ID} = ?4"
    )
}

pub fn delete_sql() -> String {
    format!("DELETE FROM {TABLE} WHERE {COL_ID} = ?1")
}

pub fn done_to_column(done: bool) -> i64 {
    i64::from(done)
}

/// Decodes a row produced by [`select_sql`]. Any non-zero `done` reads as
/// true so rows written by other tools still decode.
pub fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    let done: i64 = row.get(3)?;
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        order: row.get(2)?,
        done: done != 0,
    })
}
