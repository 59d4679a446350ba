// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Fallback signing secret for non-production runs.
/// JWT_SECRET is only mandatory when APP_ENV=production.
const DEV_JWT_SECRET: &str = "jsonwebtokensecret";

#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb_uri: String,
    pub database_name: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds (default: 24 hours).
    pub jwt_expiration: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let mongodb_uri = env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let database_name = env::var("MONGODB_DATABASE")
            .unwrap_or_else(|_| "devconnect".to_string());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                if env::var("APP_ENV").as_deref() == Ok("production") {
                    panic!("JWT_SECRET must be set in production");
                }
                DEV_JWT_SECRET.to_string()
            }
        };

        let jwt_expiration = env::var("JWT_EXPIRATION_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60 * 60 * 24);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            mongodb_uri,
            database_name,
            jwt_secret,
            jwt_expiration,
            rust_log,
        }
    }
}
