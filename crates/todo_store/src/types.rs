use serde::{Deserialize, Serialize};

/// A single task record as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub order: i64,
    pub done: bool,
}

/// The client-controlled fields of a todo. Used both for inserts and for
/// full-replacement updates; the id is never part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFields {
    pub title: String,
    pub order: i64,
    pub done: bool,
}

impl TodoFields {
    pub fn new(title: impl Into<String>, order: i64, done: bool) -> Self {
        Self {
            title: title.into(),
            order,
            done,
        }
    }

    pub fn with_id(self, id: i64) -> Todo {
        Todo {
            id,
            title: self.title,
            order: self.order,
            done: self.done,
        }
    }
}
