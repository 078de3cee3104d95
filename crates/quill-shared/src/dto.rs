//! Data Transfer Objects - request and response payloads for the API.
//!
//! Request types mirror the HTML form fields the original UI submits, so
//! they deserialize from `application/x-www-form-urlencoded` bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Form body for `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub confirm: String,
}

/// Form body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Form body for `POST /addPost` and `POST /editPost/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostContentRequest {
    pub content: String,
}

/// Form body for `POST /update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// One feed entry: a post plus its author's username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: Uuid,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Response body for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub posts: Vec<PostView>,
}

/// Response body for `GET /editPost/{id}` - the post the owner is editing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditPostResponse {
    pub id: Uuid,
    pub content: String,
}
