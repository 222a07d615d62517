use serde::Deserialize;
use todo_store::TodoFields;

use crate::error::AppError;

/// `done` as clients send it: a JSON bool, or the 0/1 the database uses.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum DoneValue {
    Bool(bool),
    Int(i64),
}

impl DoneValue {
    fn into_bool(self) -> Result<bool, AppError> {
        match self {
            DoneValue::Bool(value) => Ok(value),
            DoneValue::Int(0) => Ok(false),
            DoneValue::Int(1) => Ok(true),
            DoneValue::Int(other) => Err(AppError::Validation(format!(
                "`done` must be a boolean or 0/1, got {other}"
            ))),
        }
    }
}

/// Request body for `POST /todo` and `PUT /todo/{id}`.
///
/// Unknown fields are ignored since browser clients send back the whole
/// model they received.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoPayload {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    pub order: i64,
    pub done: DoneValue,
}

impl TodoPayload {
    pub fn parse(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::Validation("request body is empty".to_string()));
        }
        serde_json::from_slice(body).map_err(|e| AppError::Validation(e.to_string()))
    }

    pub fn into_fields(self) -> Result<TodoFields, AppError> {
        Ok(TodoFields {
            title: self.title,
            order: self.order,
            done: self.done.into_bool()?,
        })
    }

    /// Fields for a replacement of todo `path_id`. A body id, when present,
    /// has to agree with the path.
    pub fn into_fields_for(self, path_id: i64) -> Result<TodoFields, AppError> {
        if let Some(body_id) = self.id {
            if body_id != path_id {
                return Err(AppError::Validation(format!(
                    "body id {body_id} does not match path id {path_id}"
                )));
            }
        }
        self.into_fields()
    }
}

/// Form fields posted by the login page. Both are optional so a partial
/// submission renders the form again instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub passwd: Option<String>,
}
