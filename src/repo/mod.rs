// src/repo/mod.rs

pub mod memory;
pub mod mongo;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::post::Post;
use crate::models::profile::Profile;
use crate::models::user::User;

/// Persistence seams for the three entity collections.
///
/// Absence is a normal outcome (`Ok(None)` / `Ok(false)`), never an error;
/// callers decide the resulting status. Uniqueness (email, handle, one
/// profile per user) is enforced check-then-write by the handlers and is
/// not atomic across the read and the write.

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn insert(&self, user: User) -> Result<User, AppError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Profile>, AppError>;
    async fn find_by_handle(&self, handle: &str) -> Result<Option<Profile>, AppError>;
    /// All profiles, creation-descending.
    async fn find_all(&self) -> Result<Vec<Profile>, AppError>;
    async fn insert(&self, profile: Profile) -> Result<Profile, AppError>;
    /// Full-document replacement keyed by the profile id.
    async fn replace(&self, profile: Profile) -> Result<Profile, AppError>;
    async fn delete_by_user(&self, user_id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, AppError>;
    /// All posts, creation-descending.
    async fn find_all(&self) -> Result<Vec<Post>, AppError>;
    async fn insert(&self, post: Post) -> Result<Post, AppError>;
    /// Full-document replacement keyed by the post id.
    async fn replace(&self, post: Post) -> Result<Post, AppError>;
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}
