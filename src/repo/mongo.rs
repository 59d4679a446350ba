// src/repo/mongo.rs

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{Collection, Database, bson::doc};

use crate::error::AppError;
use crate::models::post::Post;
use crate::models::profile::Profile;
use crate::models::user::User;
use crate::repo::{PostStore, ProfileStore, UserStore};

/// MongoDB-backed stores over typed collections.
///
/// Documents keep their creation timestamp as an RFC 3339 string, so
/// listings are ordered after decoding rather than with a server-side sort.

#[derive(Clone)]
pub struct MongoUserStore {
    collection: Collection<User>,
}

impl MongoUserStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<User>("users"),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn insert(&self, user: User) -> Result<User, AppError> {
        self.collection.insert_one(&user).await?;
        Ok(user)
    }
}

#[derive(Clone)]
pub struct MongoProfileStore {
    collection: Collection<Profile>,
}

impl MongoProfileStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Profile>("profiles"),
        }
    }
}

#[async_trait]
impl ProfileStore for MongoProfileStore {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Profile>, AppError> {
        Ok(self.collection.find_one(doc! { "user": user_id }).await?)
    }

    async fn find_by_handle(&self, handle: &str) -> Result<Option<Profile>, AppError> {
        Ok(self.collection.find_one(doc! { "handle": handle }).await?)
    }

    async fn find_all(&self) -> Result<Vec<Profile>, AppError> {
        let cursor = self.collection.find(doc! {}).await?;
        let mut profiles: Vec<Profile> = cursor.try_collect().await?;
        profiles.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(profiles)
    }

    async fn insert(&self, profile: Profile) -> Result<Profile, AppError> {
        self.collection.insert_one(&profile).await?;
        Ok(profile)
    }

    async fn replace(&self, profile: Profile) -> Result<Profile, AppError> {
        self.collection
            .replace_one(doc! { "_id": &profile.id }, &profile)
            .await?;
        Ok(profile)
    }

    async fn delete_by_user(&self, user_id: &str) -> Result<bool, AppError> {
        let result = self.collection.delete_one(doc! { "user": user_id }).await?;
        Ok(result.deleted_count > 0)
    }
}

#[derive(Clone)]
pub struct MongoPostStore {
    collection: Collection<Post>,
}

impl MongoPostStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Post>("posts"),
        }
    }
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, AppError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_all(&self) -> Result<Vec<Post>, AppError> {
        let cursor = self.collection.find(doc! {}).await?;
        let mut posts: Vec<Post> = cursor.try_collect().await?;
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    async fn insert(&self, post: Post) -> Result<Post, AppError> {
        self.collection.insert_one(&post).await?;
        Ok(post)
    }

    async fn replace(&self, post: Post) -> Result<Post, AppError> {
        self.collection
            .replace_one(doc! { "_id": &post.id }, &post)
            .await?;
        Ok(post)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
