//! Session helpers keeping handlers free of framework-specific logic.
//!
//! `SessionContext` wraps the Actix cookie session and implements the
//! domain's `SessionManager` port, so handlers can hand it straight to the
//! `BlogService` operations that establish or terminate sessions.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use quill_core::ports::{SessionError, SessionManager};

use crate::middleware::error::AppError;

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Per-request handle to the caller's cookie session.
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// The authenticated user id, or `401 Unauthorized`.
    pub fn require_user(&self) -> Result<Uuid, AppError> {
        SessionManager::current_user(self)
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::Unauthorized("Login required".to_string()))
    }
}

impl SessionManager for SessionContext {
    fn establish(&self, user_id: Uuid) -> Result<(), SessionError> {
        self.0
            .insert(USER_ID_KEY, user_id)
            .map_err(|e| SessionError::Store(e.to_string()))
    }

    fn terminate(&self) {
        self.0.purge();
    }

    fn current_user(&self) -> Result<Option<Uuid>, SessionError> {
        self.0
            .get::<Uuid>(USER_ID_KEY)
            .map_err(|e| SessionError::Store(e.to_string()))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
