// src/handlers/users.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{LoginRequest, RegisterRequest, User, UserResponse},
    repo::UserStore,
    state::AppState,
    utils::{
        hash::{hash_password, verify_password},
        jwt::{AuthUser, sign_token},
    },
};

/// Registers a new user.
///
/// Email uniqueness is check-then-write: a race between identical concurrent
/// registrations can admit duplicates (documented limitation).
/// Returns 200 with the new user's name and email.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if state.users.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::BadRequest("email", "Email already exists".to_string()));
    }

    let hashed_password = hash_password(&payload.password)?;

    let user = state
        .users
        .insert(User::new(
            payload.name,
            payload.email,
            hashed_password,
            payload.avatar,
        ))
        .await?;

    Ok(Json(json!({ "name": user.name, "email": user.email })))
}

/// Authenticates a user and returns a signed bearer token.
///
/// Unknown email and wrong password produce the same error so the response
/// does not reveal which part was incorrect.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = state
        .users
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest("auth", "Incorrect email or password".to_string())
        })?;

    if !verify_password(&payload.password, &user.password)? {
        return Err(AppError::BadRequest(
            "auth",
            "Incorrect email or password".to_string(),
        ));
    }

    let token = sign_token(&user.id, &state.config.jwt_secret, state.config.jwt_expiration)?;

    Ok(Json(json!({ "token": token })))
}

/// Returns the authenticated user's identity.
pub async fn current(user: AuthUser) -> Json<UserResponse> {
    Json(UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
    })
}
