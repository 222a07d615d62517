pub mod auth_controller;
pub mod todo_controller;
