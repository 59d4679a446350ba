// src/handlers/profile.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::profile::{EducationRequest, ExperienceRequest, ProfileRequest},
    repo::ProfileStore,
    state::AppState,
    utils::jwt::AuthUser,
};

fn no_profile() -> AppError {
    AppError::NotFound(
        "profile",
        "There is no profile for this user".to_string(),
    )
}

/// Get the authenticated user's profile.
pub async fn current(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let profile = state
        .profiles
        .find_by_user(&user.id)
        .await?
        .ok_or_else(no_profile)?;

    Ok(Json(profile))
}

/// Create the authenticated user's profile.
///
/// Rejected with 400 if a profile already exists for the user, or if the
/// requested handle is taken by a different user. Both checks are
/// check-then-write, not atomic.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.trimmed();
    payload.validate()?;

    if state.profiles.find_by_user(&user.id).await?.is_some() {
        return Err(AppError::BadRequest(
            "profile",
            "Profile already exists for this user".to_string(),
        ));
    }

    if let Some(existing) = state.profiles.find_by_handle(&payload.handle).await? {
        if existing.user != user.id {
            return Err(AppError::BadRequest(
                "handle",
                "Handle already in use".to_string(),
            ));
        }
    }

    let profile = state.profiles.insert(payload.into_profile(user.id)).await?;

    Ok(Json(profile))
}

/// Replace the field values of the authenticated user's profile.
/// Experience and education entries are untouched.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.trimmed();
    payload.validate()?;

    let mut profile = state
        .profiles
        .find_by_user(&user.id)
        .await?
        .ok_or_else(no_profile)?;

    if let Some(existing) = state.profiles.find_by_handle(&payload.handle).await? {
        if existing.user != user.id {
            return Err(AppError::BadRequest(
                "handle",
                "Handle already in use".to_string(),
            ));
        }
    }

    payload.apply_to(&mut profile);
    let profile = state.profiles.replace(profile).await?;

    Ok(Json(profile))
}

/// Delete the authenticated user's profile wholesale.
pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    if !state.profiles.delete_by_user(&user.id).await? {
        return Err(no_profile());
    }

    Ok(StatusCode::NO_CONTENT)
}

/// List all profiles, newest first.
pub async fn all_profiles(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let profiles = state.profiles.find_all().await?;

    if profiles.is_empty() {
        return Err(AppError::NotFound(
            "profiles",
            "There are no profiles".to_string(),
        ));
    }

    Ok(Json(profiles))
}

/// Get a profile by handle.
pub async fn by_handle(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state
        .profiles
        .find_by_handle(&handle)
        .await?
        .ok_or_else(no_profile)?;

    Ok(Json(profile))
}

/// Get a profile by its owning user id.
pub async fn by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state
        .profiles
        .find_by_user(&user_id)
        .await?
        .ok_or_else(no_profile)?;

    Ok(Json(profile))
}

/// Prepend an experience entry to the authenticated user's profile.
pub async fn add_experience(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ExperienceRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut profile = state.profiles.find_by_user(&user.id).await?.ok_or_else(|| {
        AppError::NotFound(
            "profile",
            "A profile must be created before adding experience".to_string(),
        )
    })?;

    profile.experience.insert(0, payload.into_entry()?);
    let profile = state.profiles.replace(profile).await?;

    Ok(Json(profile))
}

/// Remove an experience entry by its id.
pub async fn remove_experience(
    State(state): State<AppState>,
    user: AuthUser,
    Path(entry_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut profile = state
        .profiles
        .find_by_user(&user.id)
        .await?
        .ok_or_else(no_profile)?;

    let index = profile
        .experience
        .iter()
        .position(|entry| entry.id == entry_id)
        .ok_or_else(|| {
            AppError::NotFound("experience", "Experience entry not found".to_string())
        })?;

    profile.experience.remove(index);
    let profile = state.profiles.replace(profile).await?;

    Ok(Json(profile))
}

/// Prepend an education entry to the authenticated user's profile.
pub async fn add_education(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<EducationRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut profile = state.profiles.find_by_user(&user.id).await?.ok_or_else(|| {
        AppError::NotFound(
            "profile",
            "A profile must be created before adding education".to_string(),
        )
    })?;

    profile.education.insert(0, payload.into_entry()?);
    let profile = state.profiles.replace(profile).await?;

    Ok(Json(profile))
}

/// Remove an education entry by its id.
pub async fn remove_education(
    State(state): State<AppState>,
    user: AuthUser,
    Path(entry_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut profile = state
        .profiles
        .find_by_user(&user.id)
        .await?
        .ok_or_else(no_profile)?;

    let index = profile
        .education
        .iter()
        .position(|entry| entry.id == entry_id)
        .ok_or_else(|| {
            AppError::NotFound("education", "Education entry not found".to_string())
        })?;

    profile.education.remove(index);
    let profile = state.profiles.replace(profile).await?;

    Ok(Json(profile))
}
