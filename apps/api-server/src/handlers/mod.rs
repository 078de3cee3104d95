//! HTTP handlers and route configuration.

mod auth;
mod feed;
mod health;
mod posts;

#[cfg(test)]
mod tests;

use actix_web::{HttpResponse, http::header, web};

/// Configure all application routes.
///
/// `GET /login`, `/register`, `/addPost` and `/update` only render forms in
/// the original UI; rendering is a client concern, so they have no handlers
/// here.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(feed::feed))
        .route("/login", web::post().to(auth::login))
        .route("/logout", web::get().to(auth::logout))
        .route("/register", web::post().to(auth::register))
        .route("/addPost", web::post().to(posts::add_post))
        .route("/editPost/{post_id}", web::get().to(posts::edit_post_form))
        .route("/editPost/{post_id}", web::post().to(posts::edit_post))
        .route("/deletePost/{post_id}", web::post().to(posts::delete_post))
        .route("/update", web::post().to(auth::update_password))
        .route("/api/health", web::get().to(health::health_check));
}

/// The success effect shared by every mutating route: bounce back to the
/// feed.
pub(crate) fn redirect_home() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}
