//! The shared feed.

use actix_web::{HttpResponse, web};

use quill_core::ports::SessionManager;
use quill_shared::dto::{FeedResponse, PostView};

use crate::middleware::error::{AppError, AppResult};
use crate::session::SessionContext;
use crate::state::AppState;

/// GET / - the landing page data.
///
/// Anonymous callers get an empty feed; authenticated callers get every
/// post, in store order, with author usernames attached.
pub async fn feed(state: web::Data<AppState>, session: SessionContext) -> AppResult<HttpResponse> {
    let viewer = SessionManager::current_user(&session).map_err(AppError::from)?;

    let items = state.blog.feed(viewer).await?;

    let posts = items
        .into_iter()
        .map(|item| PostView {
            id: item.post.id,
            author: item.author,
            content: item.post.content,
            created_at: item.post.created_at,
        })
        .collect();

    Ok(HttpResponse::Ok().json(FeedResponse { posts }))
}
