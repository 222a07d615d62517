pub mod schema;
pub mod storage;
pub mod types;

pub use storage::{SqliteTodoStore, StoreError, StoreResult, TodoStore};
pub use types::{Todo, TodoFields};
