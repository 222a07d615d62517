/// HTTP tests for the todo JSON API
///
/// Each test gets its own SQLite file in a temp dir and talks to the full
/// route table through actix's test service.
use actix_http::Request;
use actix_web::{
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, web, App, Error,
};
use serde_json::{json, Value};
use session_manager::{InMemorySessionStorage, SessionManager};
use std::sync::Arc;
use tempfile::TempDir;
use todo_store::{SqliteTodoStore, Todo, TodoStore};
use todo_web::middleware::SessionMiddleware;
use todo_web::server::{app_config, AppState};

async fn create_test_app(
    dir: &TempDir,
) -> impl Service<Request, Response = ServiceResponse, Error = Error> {
    let store = SqliteTodoStore::new(dir.path().join("todos.db"));
    store.init().await.unwrap();
    let sessions = SessionManager::new(Arc::new(InMemorySessionStorage::new()));

    test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::new(Arc::new(store), sessions)))
            .wrap(SessionMiddleware::new("todo_session"))
            .configure(app_config),
    )
    .await
}

async fn create_todo(
    app: &impl Service<Request, Response = ServiceResponse, Error = Error>,
    body: Value,
) -> Todo {
    let req = test::TestRequest::post()
        .uri("/todo")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn test_post_then_get_round_trips() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir).await;

    let created = create_todo(&app, json!({"title": "buy milk", "order": 1, "done": false})).await;

    let req = test::TestRequest::get()
        .uri(&format!("/todo/{}", created.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"id": created.id, "title": "buy milk", "order": 1, "done": false})
    );
}

#[actix_web::test]
async fn test_list_returns_every_created_todo() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir).await;

    let mut created = Vec::new();
    for order in 1..=3 {
        created.push(
            create_todo(
                &app,
                json!({"title": format!("task {order}"), "order": order, "done": order == 2}),
            )
            .await,
        );
    }

    let req = test::TestRequest::get().uri("/todos/").to_request();
    let todos: Vec<Todo> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(todos, created);
}

#[actix_web::test]
async fn test_list_is_empty_array_without_todos() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir).await;

    let req = test::TestRequest::get().uri("/todos/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn test_put_marks_todo_done() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir).await;
    let created = create_todo(&app, json!({"title": "walk dog", "order": 4, "done": false})).await;

    let req = test::TestRequest::put()
        .uri(&format!("/todo/{}", created.id))
        .set_json(json!({"id": created.id, "title": "walk dog", "order": 4, "done": true}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/todo/{}", created.id))
        .to_request();
    let todo: Todo = test::call_and_read_body_json(&app, req).await;
    assert!(todo.done);
    assert_eq!(todo.order, 4);
}

#[actix_web::test]
async fn test_put_accepts_integer_done() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir).await;
    let created = create_todo(&app, json!({"title": "x", "order": 1, "done": 0})).await;
    assert!(!created.done);

    let req = test::TestRequest::put()
        .uri(&format!("/todo/{}", created.id))
        .set_json(json!({"title": "x", "order": 1, "done": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn test_delete_then_get_is_not_found() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir).await;
    let created = create_todo(&app, json!({"title": "old", "order": 1, "done": true})).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/todo/{}", created.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/todo/{}", created.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["type"], "not_found_error");

    let req = test::TestRequest::delete()
        .uri(&format!("/todo/{}", created.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_put_unknown_todo_is_not_found() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir).await;

    let req = test::TestRequest::put()
        .uri("/todo/999")
        .set_json(json!({"title": "ghost", "order": 1, "done": false}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_malformed_bodies_are_bad_requests() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir).await;

    for body in [
        "",
        "{not json",
        r#"{"order": 1, "done": false}"#,
        r#"{"title": "x", "order": "first", "done": false}"#,
        r#"{"title": "x", "order": 1, "done": "yes"}"#,
    ] {
        let req = test::TestRequest::post()
            .uri("/todo")
            .insert_header(("content-type", "application/json"))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["error"]["type"], "validation_error");
    }

    let req = test::TestRequest::get().uri("/todos/").to_request();
    let todos: Vec<Todo> = test::call_and_read_body_json(&app, req).await;
    assert!(todos.is_empty());
}

#[actix_web::test]
async fn test_put_with_conflicting_body_id_is_rejected() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir).await;
    let created = create_todo(&app, json!({"title": "x", "order": 1, "done": false})).await;

    let req = test::TestRequest::put()
        .uri(&format!("/todo/{}", created.id))
        .set_json(json!({"id": created.id + 1, "title": "y", "order": 1, "done": false}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_non_numeric_id_is_not_found() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir).await;

    let req = test::TestRequest::get().uri("/todo/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_api_writes_reach_the_database() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir).await;
    let created = create_todo(&app, json!({"title": "persist me", "order": 9, "done": true})).await;

    let store = SqliteTodoStore::new(dir.path().join("todos.db"));
    let stored = store.get_by_id(created.id).await.unwrap();
    assert_eq!(stored, created);
}
