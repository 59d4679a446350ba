// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{posts, profile, users};
use crate::state::AppState;

/// Assembles the main application router.
///
/// * Nests the per-entity sub-routers under /api.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (stores + config).
///
/// Authentication is enforced by the `AuthUser` extractor on protected
/// handlers, so public and protected methods can share a path.
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let users_routes = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/current", get(users::current));

    let profile_routes = Router::new()
        .route(
            "/",
            get(profile::current)
                .post(profile::create)
                .put(profile::update)
                .delete(profile::remove),
        )
        .route("/all", get(profile::all_profiles))
        .route("/handle/{handle}", get(profile::by_handle))
        .route("/user/{user_id}", get(profile::by_user))
        .route("/experience", post(profile::add_experience))
        .route("/experience/{entry_id}", delete(profile::remove_experience))
        .route("/education", post(profile::add_education))
        .route("/education/{entry_id}", delete(profile::remove_education));

    let posts_routes = Router::new()
        .route("/", get(posts::list).post(posts::create))
        .route("/{post_id}", get(posts::get_post).delete(posts::remove))
        .route("/like/{post_id}", post(posts::toggle_like))
        .route("/comment/{post_id}", post(posts::add_comment))
        .route(
            "/comment/{post_id}/{comment_id}",
            delete(posts::remove_comment),
        );

    Router::new()
        .nest("/api/users", users_routes)
        .nest("/api/profile", profile_routes)
        .nest("/api/posts", posts_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
