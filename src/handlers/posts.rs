// src/handlers/posts.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::post::{Comment, Like, Post, PostRequest},
    repo::PostStore,
    state::AppState,
    utils::jwt::AuthUser,
};

fn no_post() -> AppError {
    AppError::NotFound("post", "No post found".to_string())
}

fn not_authorized() -> AppError {
    AppError::Forbidden("notauthorized", "User not authorized".to_string())
}

/// List all posts, newest first.
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let posts = state.posts.find_all().await?;

    if posts.is_empty() {
        return Err(AppError::NotFound("posts", "There are no posts".to_string()));
    }

    Ok(Json(posts))
}

/// Get a single post by id.
pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post = state
        .posts
        .find_by_id(&post_id)
        .await?
        .ok_or_else(no_post)?;

    Ok(Json(post))
}

/// Create a new post. The author's name and avatar are snapshotted from the
/// authenticated user, not taken from the request body.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.trimmed();
    payload.validate()?;

    let post = state
        .posts
        .insert(Post::new(user.id, user.name, user.avatar, payload.text))
        .await?;

    Ok(Json(post))
}

/// Delete a post. Only the author may delete it; ownership is checked after
/// existence so 403 and 404 stay distinguishable.
pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let post = state
        .posts
        .find_by_id(&post_id)
        .await?
        .ok_or_else(no_post)?;

    if post.user != user.id {
        return Err(not_authorized());
    }

    state.posts.delete(&post.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Like / unlike a post.
///
/// Scans the like list for the acting user: present means remove (unlike),
/// absent means append (like). Returns the updated post.
pub async fn toggle_like(
    State(state): State<AppState>,
    user: AuthUser,
    Path(post_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut post = state
        .posts
        .find_by_id(&post_id)
        .await?
        .ok_or_else(no_post)?;

    match post.likes.iter().position(|like| like.user == user.id) {
        Some(index) => {
            post.likes.remove(index);
        }
        None => {
            post.likes.push(Like { user: user.id });
        }
    }

    let post = state.posts.replace(post).await?;

    Ok(Json(post))
}

/// Append a comment to a post. Any authenticated user may comment.
pub async fn add_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(post_id): Path<String>,
    Json(payload): Json<PostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.trimmed();
    payload.validate()?;

    let mut post = state
        .posts
        .find_by_id(&post_id)
        .await?
        .ok_or_else(no_post)?;

    post.comments
        .push(Comment::new(user.id, user.name, user.avatar, payload.text));

    let post = state.posts.replace(post).await?;

    Ok(Json(post))
}

/// Remove a comment from a post. Only the comment's author may remove it;
/// existence is checked before ownership.
pub async fn remove_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let mut post = state
        .posts
        .find_by_id(&post_id)
        .await?
        .ok_or_else(no_post)?;

    let index = post
        .comments
        .iter()
        .position(|comment| comment.id == comment_id)
        .ok_or_else(|| AppError::NotFound("comment", "Comment not found".to_string()))?;

    if post.comments[index].user != user.id {
        return Err(not_authorized());
    }

    post.comments.remove(index);
    let post = state.posts.replace(post).await?;

    Ok(Json(post))
}
