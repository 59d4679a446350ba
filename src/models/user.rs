// src/models/user.rs

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Represents a document in the 'users' collection.
///
/// Never serialize this struct into an HTTP response: it carries the
/// password hash. Responses go through [`UserResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,

    /// Unique email address (case-sensitive as stored).
    pub email: String,

    /// Argon2 password hash.
    pub password: String,

    pub avatar: Option<String>,

    pub date: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String, avatar: Option<String>) -> Self {
        Self {
            id: ObjectId::new().to_hex(),
            name,
            email,
            password: password_hash,
            avatar,
            date: chrono::Utc::now(),
        }
    }
}

/// Public view of a user (id, name, email) returned by `/api/users/current`.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// DTO for registration. Required string fields default to empty so a
/// missing field surfaces in the validation error map instead of a JSON
/// deserialization rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 4, message = "Name must be at least 4 characters long"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Email must be a valid email"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,

    /// Optional avatar URL captured at registration.
    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar: Option<String>,
}

/// DTO for login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
