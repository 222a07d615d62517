use actix_web::{
    http::header,
    web::{self, Data, Form},
    HttpResponse,
};
use log::info;

use crate::dto::LoginForm;
use crate::error::AppError;
use crate::middleware::CurrentSession;
use crate::server::AppState;
use crate::templates;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/login", web::get().to(login_form))
        .route("/login", web::post().to(login))
        .route("/logout", web::get().to(logout));
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// GET /
pub async fn index(
    state: Data<AppState>,
    session: CurrentSession,
) -> Result<HttpResponse, AppError> {
    if !state.sessions.is_logged_in(session.id()).await? {
        return Ok(redirect("/login"));
    }
    Ok(html(templates::render_index()))
}

/// GET /login
pub async fn login_form() -> HttpResponse {
    html(templates::render_login(None))
}

/// POST /login
pub async fn login(
    state: Data<AppState>,
    session: CurrentSession,
    form: Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    let LoginForm { username, passwd } = form.into_inner();
    let accepted = match (username.as_deref(), passwd.as_deref()) {
        (Some(username), Some(passwd)) => state.authenticator.verify(username, passwd),
        _ => false,
    };

    if !accepted {
        info!("Rejected login attempt");
        return Ok(html(templates::render_login(Some(
            templates::LOGIN_FAILED_MESSAGE,
        ))));
    }

    state.sessions.set_login(session.id(), true).await?;
    info!("Session {} logged in", session.id());
    Ok(redirect("/"))
}

/// GET /logout
pub async fn logout(
    state: Data<AppState>,
    session: CurrentSession,
) -> Result<HttpResponse, AppError> {
    state.sessions.set_login(session.id(), false).await?;
    Ok(html(templates::render_login(None)))
}
