//! Account handlers: register, login, logout, credential update.

use actix_web::{HttpResponse, web};

use quill_core::DomainError;
use quill_shared::dto::{LoginRequest, RegisterRequest, UpdatePasswordRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::session::SessionContext;
use crate::state::AppState;

/// POST /register
///
/// Mismatched confirmation and taken usernames both come back as a 400 with
/// the one generic message; the failing check is never disclosed.
pub async fn register(
    state: web::Data<AppState>,
    session: SessionContext,
    form: web::Form<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = form.into_inner();

    let user = state
        .blog
        .register(&session, &req.username, &req.password, &req.confirm)
        .await
        .map_err(|e| match e {
            DomainError::InvalidCredentials => AppError::BadRequest(e.to_string()),
            other => other.into(),
        })?;

    tracing::info!(user_id = %user.id, "account registered");
    Ok(super::redirect_home())
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    session: SessionContext,
    form: web::Form<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = form.into_inner();

    let user = state
        .blog
        .login(&session, &req.username, &req.password)
        .await?;

    tracing::debug!(user_id = %user.id, "session established");
    Ok(super::redirect_home())
}

/// GET /logout
pub async fn logout(
    state: web::Data<AppState>,
    session: SessionContext,
) -> AppResult<HttpResponse> {
    state.blog.logout(&session)?;
    Ok(super::redirect_home())
}

/// POST /update
pub async fn update_password(
    state: web::Data<AppState>,
    session: SessionContext,
    form: web::Form<UpdatePasswordRequest>,
) -> AppResult<HttpResponse> {
    let caller = session.require_user()?;
    let req = form.into_inner();

    state
        .blog
        .update_password(caller, &req.current_password, &req.new_password)
        .await?;

    Ok(super::redirect_home())
}
