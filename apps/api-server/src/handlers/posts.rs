//! Post handlers: create, fetch-for-edit, edit, delete.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::service::PostAccess;
use quill_shared::dto::{EditPostResponse, PostContentRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::session::SessionContext;
use crate::state::AppState;

/// POST /addPost
pub async fn add_post(
    state: web::Data<AppState>,
    session: SessionContext,
    form: web::Form<PostContentRequest>,
) -> AppResult<HttpResponse> {
    let author = session.require_user()?;
    let content = form.into_inner().content;

    if content.trim().is_empty() {
        return Err(AppError::BadRequest("Content must not be empty".to_string()));
    }

    let post = state.blog.add_post(author, &content).await?;
    tracing::debug!(post_id = %post.id, "post created");

    Ok(super::redirect_home())
}

/// GET /editPost/{post_id} - the post body for the owner's edit form.
///
/// Non-owners are sent home exactly as the mutating routes do.
pub async fn edit_post_form(
    state: web::Data<AppState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let caller = session.require_user()?;
    let post_id = path.into_inner();

    match state.blog.post_for_edit(caller, post_id).await? {
        PostAccess::Granted(post) => Ok(HttpResponse::Ok().json(EditPostResponse {
            id: post.id,
            content: post.content,
        })),
        PostAccess::Denied => Ok(super::redirect_home()),
    }
}

/// POST /editPost/{post_id}
///
/// Ownership is enforced in the domain core; a non-owner's attempt is a
/// silent no-op and still redirects home.
pub async fn edit_post(
    state: web::Data<AppState>,
    session: SessionContext,
    path: web::Path<Uuid>,
    form: web::Form<PostContentRequest>,
) -> AppResult<HttpResponse> {
    let caller = session.require_user()?;
    let post_id = path.into_inner();
    let content = form.into_inner().content;

    if content.trim().is_empty() {
        return Err(AppError::BadRequest("Content must not be empty".to_string()));
    }

    state.blog.edit_post(caller, post_id, &content).await?;

    Ok(super::redirect_home())
}

/// POST /deletePost/{post_id}
pub async fn delete_post(
    state: web::Data<AppState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let caller = session.require_user()?;
    let post_id = path.into_inner();

    state.blog.delete_post(caller, post_id).await?;

    Ok(super::redirect_home())
}
