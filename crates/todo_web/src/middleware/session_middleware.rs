use actix_web::{
    cookie::{Cookie, SameSite},
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorInternalServerError,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use session_manager::SessionId;
use std::future::{ready, Ready};
use std::rc::Rc;

/// Middleware that binds every request to a [`SessionId`].
///
/// The id comes from the session cookie when it holds a valid token.
/// Otherwise a new id is minted and sent back in `Set-Cookie`.
pub struct SessionMiddleware {
    cookie_name: String,
}

impl SessionMiddleware {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            cookie_name: Rc::from(self.cookie_name.as_str()),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
    cookie_name: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let existing = req
            .cookie(&self.cookie_name)
            .and_then(|cookie| SessionId::parse(cookie.value()));
        let (session_id, issue_cookie) = match existing {
            Some(id) => (id, false),
            None => (SessionId::new(), true),
        };

        req.extensions_mut().insert(session_id);

        let service = Rc::clone(&self.service);
        let cookie_name = Rc::clone(&self.cookie_name);

        Box::pin(async move {
            let mut res = service.call(req).await?;

            if issue_cookie {
                let cookie = Cookie::build(cookie_name.to_string(), session_id.to_string())
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .finish();
                if let Err(e) = res.response_mut().add_cookie(&cookie) {
                    tracing::warn!("Failed to attach session cookie: {}", e);
                } else {
                    tracing::debug!(session_id = %session_id, "Issued new session");
                }
            }

            Ok(res)
        })
    }
}

/// Extractor for the session bound by [`SessionMiddleware`]
#[derive(Debug, Clone, Copy)]
pub struct CurrentSession(pub SessionId);

impl CurrentSession {
    pub fn id(&self) -> &SessionId {
        &self.0
    }
}

impl FromRequest for CurrentSession {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<SessionId>()
                .copied()
                .map(CurrentSession)
                .ok_or_else(|| ErrorInternalServerError("session middleware is not installed")),
        )
    }
}
