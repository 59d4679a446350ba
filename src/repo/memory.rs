// src/repo/memory.rs

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::post::Post;
use crate::models::profile::Profile;
use crate::models::user::User;
use crate::repo::{PostStore, ProfileStore, UserStore};

/// In-memory stores keyed by document id. Back the integration tests so the
/// full HTTP pipeline runs without a MongoDB instance.

#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn insert(&self, user: User) -> Result<User, AppError> {
        self.users.write().await.insert(user.id.clone(), user.clone());
        Ok(user)
    }
}

#[derive(Clone, Default)]
pub struct MemoryProfileStore {
    profiles: Arc<RwLock<HashMap<String, Profile>>>,
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        Ok(self
            .profiles
            .read()
            .await
            .values()
            .find(|profile| profile.user == user_id)
            .cloned())
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Profile>, AppError> {
        Ok(self
            .profiles
            .read()
            .await
            .values()
            .find(|profile| profile.handle == handle)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Profile>, AppError> {
        let mut profiles: Vec<Profile> = self.profiles.read().await.values().cloned().collect();
        profiles.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(profiles)
    }

    async fn insert(&self, profile: Profile) -> Result<Profile, AppError> {
        self.profiles
            .write()
            .await
            .insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }

    async fn replace(&self, profile: Profile) -> Result<Profile, AppError> {
        self.profiles
            .write()
            .await
            .insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<bool, AppError> {
        let mut profiles = self.profiles.write().await;
        let id = profiles
            .values()
            .find(|profile| profile.user == user_id)
            .map(|profile| profile.id.clone());
        match id {
            Some(id) => {
                profiles.remove(&id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryPostStore {
    posts: Arc<RwLock<HashMap<String, Post>>>,
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, AppError> {
        Ok(self.posts.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, AppError> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    async fn insert(&self, post: Post) -> Result<Post, AppError> {
        self.posts.write().await.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn replace(&self, post: Post) -> Result<Post, AppError> {
        self.posts.write().await.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.posts.write().await.remove(id).is_some())
    }
}
