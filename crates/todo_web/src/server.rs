use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use log::{error, info, warn};
use session_manager::{FileSessionStorage, SessionManager};
use todo_store::{SqliteTodoStore, TodoStore};

use crate::auth::{Authenticator, PlaceholderAuthenticator};
use crate::config::ServerConfig;
use crate::controllers::{auth_controller, todo_controller};
use crate::middleware::{SessionMiddleware, TracingMiddleware};

pub struct AppState {
    pub store: Arc<dyn TodoStore>,
    pub sessions: SessionManager,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>, sessions: SessionManager) -> Self {
        Self {
            store,
            sessions,
            authenticator: Arc::new(PlaceholderAuthenticator),
        }
    }

    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }
}

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(auth_controller::config)
        .configure(todo_controller::config);
}

pub async fn run(config: ServerConfig) -> Result<(), String> {
    info!("Starting todo web service...");

    let store = SqliteTodoStore::new(&config.database_path);
    store
        .init()
        .await
        .map_err(|e| format!("Failed to initialize todo store: {e}"))?;
    info!("Using database {}", config.database_path.display());

    let sessions = SessionManager::new(Arc::new(FileSessionStorage::new(&config.session_dir)))
        .with_timeout(config.session_timeout);
    if let Err(e) = sessions.cleanup().await {
        warn!("Failed to sweep expired sessions: {}", e);
    }
    let app_state = web::Data::new(AppState::new(Arc::new(store), sessions));
    let cookie_name = config.session_cookie.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(SessionMiddleware::new(cookie_name.clone()))
            .wrap(TracingMiddleware)
            .configure(app_config)
    })
    .workers(config.workers)
    .bind(config.bind_address())
    .map_err(|e| format!("Failed to bind server: {e}"))?
    .run();

    info!("Todo web service listening on http://{}", config.bind_address());

    if let Err(e) = server.await {
        error!("Web server error: {}", e);
        return Err(format!("Web server error: {e}"));
    }

    Ok(())
}
