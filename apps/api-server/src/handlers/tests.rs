//! HTTP round-trip tests: real routing, real cookie sessions, in-memory
//! repositories.

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use uuid::Uuid;

use quill_shared::ErrorResponse;
use quill_shared::dto::{
    EditPostResponse, FeedResponse, LoginRequest, PostContentRequest, RegisterRequest,
    UpdatePasswordRequest,
};

use crate::state::AppState;

const GENERIC_CREDENTIALS_ERROR: &str = "Invalid username or password";

/// Session middleware configured for tests: fresh key, no `Secure` flag so
/// plain-HTTP test requests carry the cookie.
fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

async fn spawn() -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(AppState::in_memory()))
            .configure(super::configure_routes),
    )
    .await
}

fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

fn assert_redirects_home(res: &ServiceResponse) {
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/");
}

async fn register_user<S>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/register")
            .set_form(RegisterRequest {
                username: username.to_owned(),
                password: password.to_owned(),
                confirm: password.to_owned(),
            })
            .to_request(),
    )
    .await;

    assert_redirects_home(&res);
    session_cookie(&res)
}

async fn fetch_feed<S>(app: &S, cookie: &Cookie<'static>) -> FeedResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri("/")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    test::read_body_json(res).await
}

async fn add_post<S>(app: &S, cookie: &Cookie<'static>, content: &str)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/addPost")
            .cookie(cookie.clone())
            .set_form(PostContentRequest {
                content: content.to_owned(),
            })
            .to_request(),
    )
    .await;
    assert_redirects_home(&res);
}

#[actix_web::test]
async fn anonymous_feed_is_empty() {
    let app = spawn().await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let feed: FeedResponse = test::read_body_json(res).await;
    assert!(feed.posts.is_empty());
}

#[actix_web::test]
async fn health_endpoint_reports_ok() {
    let app = spawn().await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/health").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn register_signs_in_and_redirects_home() {
    let app = spawn().await;

    let cookie = register_user(&app, "alice", "pw1").await;

    // The session cookie authenticates subsequent requests.
    add_post(&app, &cookie, "first").await;
    let feed = fetch_feed(&app, &cookie).await;
    assert_eq!(feed.posts.len(), 1);
}

#[actix_web::test]
async fn register_password_mismatch_is_a_generic_400() {
    let app = spawn().await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_form(RegisterRequest {
                username: "alice".to_owned(),
                password: "pw1".to_owned(),
                confirm: "pw2".to_owned(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(res).await;
    assert_eq!(body.detail.as_deref(), Some(GENERIC_CREDENTIALS_ERROR));
}

#[actix_web::test]
async fn register_taken_username_is_the_same_generic_400() {
    let app = spawn().await;
    register_user(&app, "alice", "pw1").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_form(RegisterRequest {
                username: "alice".to_owned(),
                password: "other".to_owned(),
                confirm: "other".to_owned(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(res).await;
    assert_eq!(body.detail.as_deref(), Some(GENERIC_CREDENTIALS_ERROR));
}

#[actix_web::test]
async fn login_failures_are_indistinguishable() {
    let app = spawn().await;
    register_user(&app, "alice", "pw1").await;

    for (username, password) in [("nobody", "pw1"), ("alice", "wrong")] {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_form(LoginRequest {
                    username: username.to_owned(),
                    password: password.to_owned(),
                })
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = test::read_body_json(res).await;
        assert_eq!(body.detail.as_deref(), Some(GENERIC_CREDENTIALS_ERROR));
    }
}

#[actix_web::test]
async fn login_establishes_a_session() {
    let app = spawn().await;
    register_user(&app, "alice", "pw1").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(LoginRequest {
                username: "alice".to_owned(),
                password: "pw1".to_owned(),
            })
            .to_request(),
    )
    .await;

    assert_redirects_home(&res);
    let cookie = session_cookie(&res);

    add_post(&app, &cookie, "logged in").await;
    let feed = fetch_feed(&app, &cookie).await;
    assert_eq!(feed.posts[0].author, "alice");
}

#[actix_web::test]
async fn mutating_routes_require_a_session() {
    let app = spawn().await;

    let attempts = [
        test::TestRequest::post()
            .uri("/addPost")
            .set_form(PostContentRequest {
                content: "x".to_owned(),
            }),
        test::TestRequest::post()
            .uri(&format!("/deletePost/{}", Uuid::new_v4())),
        test::TestRequest::get().uri("/logout"),
    ];

    for req in attempts {
        let res = test::call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}

#[actix_web::test]
async fn empty_content_is_a_bad_request() {
    let app = spawn().await;
    let cookie = register_user(&app, "alice", "pw1").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/addPost")
            .cookie(cookie.clone())
            .set_form(PostContentRequest {
                content: "   ".to_owned(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(fetch_feed(&app, &cookie).await.posts.is_empty());
}

#[actix_web::test]
async fn feed_shows_author_and_content() {
    let app = spawn().await;
    let alice = register_user(&app, "alice", "pw1").await;
    let bob = register_user(&app, "bob", "pw2").await;

    add_post(&app, &alice, "from alice").await;
    add_post(&app, &bob, "from bob").await;

    let feed = fetch_feed(&app, &alice).await;
    assert_eq!(feed.posts.len(), 2);

    let mut seen: Vec<(&str, &str)> = feed
        .posts
        .iter()
        .map(|p| (p.author.as_str(), p.content.as_str()))
        .collect();
    seen.sort();
    assert_eq!(seen, vec![("alice", "from alice"), ("bob", "from bob")]);
}

#[actix_web::test]
async fn non_owner_edit_is_a_silent_noop() {
    let app = spawn().await;
    let alice = register_user(&app, "alice", "pw1").await;
    let bob = register_user(&app, "bob", "pw2").await;

    add_post(&app, &alice, "hello").await;
    let post_id = fetch_feed(&app, &alice).await.posts[0].id;

    // Repeated attempts look like success and change nothing.
    for _ in 0..2 {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/editPost/{post_id}"))
                .cookie(bob.clone())
                .set_form(PostContentRequest {
                    content: "bob was here".to_owned(),
                })
                .to_request(),
        )
        .await;
        assert_redirects_home(&res);
    }

    let feed = fetch_feed(&app, &bob).await;
    assert_eq!(feed.posts[0].content, "hello");
}

#[actix_web::test]
async fn non_owner_delete_is_a_silent_noop() {
    let app = spawn().await;
    let alice = register_user(&app, "alice", "pw1").await;
    let bob = register_user(&app, "bob", "pw2").await;

    add_post(&app, &alice, "keep me").await;
    let post_id = fetch_feed(&app, &alice).await.posts[0].id;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/deletePost/{post_id}"))
            .cookie(bob.clone())
            .to_request(),
    )
    .await;
    assert_redirects_home(&res);

    assert_eq!(fetch_feed(&app, &alice).await.posts.len(), 1);
}

#[actix_web::test]
async fn owner_edit_replaces_the_content() {
    let app = spawn().await;
    let alice = register_user(&app, "alice", "pw1").await;

    add_post(&app, &alice, "before").await;
    let post_id = fetch_feed(&app, &alice).await.posts[0].id;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/editPost/{post_id}"))
            .cookie(alice.clone())
            .set_form(PostContentRequest {
                content: "after".to_owned(),
            })
            .to_request(),
    )
    .await;
    assert_redirects_home(&res);

    assert_eq!(fetch_feed(&app, &alice).await.posts[0].content, "after");
}

#[actix_web::test]
async fn owner_delete_removes_the_post() {
    let app = spawn().await;
    let alice = register_user(&app, "alice", "pw1").await;

    add_post(&app, &alice, "temporary").await;
    let post_id = fetch_feed(&app, &alice).await.posts[0].id;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/deletePost/{post_id}"))
            .cookie(alice.clone())
            .to_request(),
    )
    .await;
    assert_redirects_home(&res);

    assert!(fetch_feed(&app, &alice).await.posts.is_empty());
}

#[actix_web::test]
async fn touching_a_missing_post_is_not_found() {
    let app = spawn().await;
    let alice = register_user(&app, "alice", "pw1").await;
    let ghost = Uuid::new_v4();

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/editPost/{ghost}"))
            .cookie(alice.clone())
            .set_form(PostContentRequest {
                content: "x".to_owned(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/editPost/{ghost}"))
            .cookie(alice.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn edit_form_serves_owners_and_bounces_intruders() {
    let app = spawn().await;
    let alice = register_user(&app, "alice", "pw1").await;
    let bob = register_user(&app, "bob", "pw2").await;

    add_post(&app, &alice, "mine").await;
    let post_id = fetch_feed(&app, &alice).await.posts[0].id;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/editPost/{post_id}"))
            .cookie(alice.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: EditPostResponse = test::read_body_json(res).await;
    assert_eq!(body.content, "mine");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/editPost/{post_id}"))
            .cookie(bob.clone())
            .to_request(),
    )
    .await;
    assert_redirects_home(&res);
}

#[actix_web::test]
async fn update_password_rejects_a_wrong_current_password() {
    let app = spawn().await;
    let alice = register_user(&app, "alice", "pw1").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/update")
            .cookie(alice.clone())
            .set_form(UpdatePasswordRequest {
                current_password: "wrong".to_owned(),
                new_password: "pw2".to_owned(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(res).await;
    assert_eq!(body.detail.as_deref(), Some("Incorrect current password"));

    // The old credential still works.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form(LoginRequest {
                username: "alice".to_owned(),
                password: "pw1".to_owned(),
            })
            .to_request(),
    )
    .await;
    assert_redirects_home(&res);
}

#[actix_web::test]
async fn update_password_replaces_the_credential() {
    let app = spawn().await;
    let alice = register_user(&app, "alice", "pw1").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/update")
            .cookie(alice.clone())
            .set_form(UpdatePasswordRequest {
                current_password: "pw1".to_owned(),
                new_password: "pw2".to_owned(),
            })
            .to_request(),
    )
    .await;
    assert_redirects_home(&res);

    for (password, expected) in [("pw1", StatusCode::UNAUTHORIZED), ("pw2", StatusCode::SEE_OTHER)]
    {
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login")
                .set_form(LoginRequest {
                    username: "alice".to_owned(),
                    password: password.to_owned(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), expected);
    }
}

#[actix_web::test]
async fn logout_redirects_home_and_drops_the_cookie() {
    let app = spawn().await;
    let alice = register_user(&app, "alice", "pw1").await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/logout")
            .cookie(alice.clone())
            .to_request(),
    )
    .await;

    assert_redirects_home(&res);
    // Purging issues a removal cookie for the client to drop.
    let removal = session_cookie(&res);
    assert!(removal.value().is_empty());
}
