use actix_web::{
    web::{self, Bytes, Data, Path},
    HttpResponse,
};
use log::info;

use crate::dto::TodoPayload;
use crate::error::AppError;
use crate::server::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/todo", web::post().to(create_todo))
        .route("/todo/{id}", web::get().to(get_todo))
        .route("/todo/{id}", web::put().to(update_todo))
        .route("/todo/{id}", web::delete().to(delete_todo))
        .route("/todos/", web::get().to(list_todos));
}

/// GET /todo/{id}
pub async fn get_todo(state: Data<AppState>, path: Path<i64>) -> Result<HttpResponse, AppError> {
    let todo = state.store.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(todo))
}

/// POST /todo
/// Responds with the stored todo so the client learns its id.
pub async fn create_todo(state: Data<AppState>, body: Bytes) -> Result<HttpResponse, AppError> {
    let fields = TodoPayload::parse(&body)?.into_fields()?;
    let todo = state.store.create(fields).await?;
    info!("Created todo {}", todo.id);
    Ok(HttpResponse::Created().json(todo))
}

/// PUT /todo/{id}
pub async fn update_todo(
    state: Data<AppState>,
    path: Path<i64>,
    body: Bytes,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let fields = TodoPayload::parse(&body)?.into_fields_for(id)?;
    state.store.update(id, fields).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /todo/{id}
pub async fn delete_todo(state: Data<AppState>, path: Path<i64>) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    state.store.delete_by_id(id).await?;
    info!("Deleted todo {}", id);
    Ok(HttpResponse::NoContent().finish())
}

/// GET /todos/
pub async fn list_todos(state: Data<AppState>) -> Result<HttpResponse, AppError> {
    let todos = state.store.get_all().await?;
    Ok(HttpResponse::Ok().json(todos))
}
