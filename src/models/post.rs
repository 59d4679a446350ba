// src/models/post.rs

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Represents a document in the 'posts' collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,

    /// Author user id.
    pub user: String,

    /// Author display name, snapshotted at creation time.
    pub name: String,

    /// Author avatar URL, snapshotted at creation time.
    pub avatar: Option<String>,

    pub text: String,

    /// At most one entry per user (toggle semantics).
    pub likes: Vec<Like>,

    /// Ordered comment list, append-only except for owner deletes.
    pub comments: Vec<Comment>,

    pub date: chrono::DateTime<chrono::Utc>,
}

impl Post {
    pub fn new(user: String, name: String, avatar: Option<String>, text: String) -> Self {
        Self {
            id: ObjectId::new().to_hex(),
            user,
            name,
            avatar,
            text,
            likes: Vec::new(),
            comments: Vec::new(),
            date: chrono::Utc::now(),
        }
    }
}

/// Like record: the liking user's id. Equality is by stored id string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub user: String,
}

/// Comment sub-document. Shares the parent post's storage lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,

    /// Comment author user id.
    pub user: String,

    /// Author name/avatar snapshots, as on posts.
    pub name: String,
    pub avatar: Option<String>,

    pub text: String,

    pub date: chrono::DateTime<chrono::Utc>,
}

impl Comment {
    pub fn new(user: String, name: String, avatar: Option<String>, text: String) -> Self {
        Self {
            id: ObjectId::new().to_hex(),
            user,
            name,
            avatar,
            text,
            date: chrono::Utc::now(),
        }
    }
}

/// DTO for creating a post or a comment (same text constraints).
#[derive(Debug, Deserialize, Validate)]
pub struct PostRequest {
    #[serde(default)]
    #[validate(length(
        min = 10,
        max = 400,
        message = "Text must be between 10 and 400 characters long"
    ))]
    pub text: String,
}

impl PostRequest {
    pub fn trimmed(mut self) -> Self {
        self.text = self.text.trim().to_string();
        self
    }
}
