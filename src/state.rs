// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;
use mongodb::{Client, bson::doc, options::ClientOptions};

use crate::config::Config;
use crate::repo::memory::{MemoryPostStore, MemoryProfileStore, MemoryUserStore};
use crate::repo::mongo::{MongoPostStore, MongoProfileStore, MongoUserStore};
use crate::repo::{PostStore, ProfileStore, UserStore};

/// Shared application state: the three entity stores and the configuration,
/// constructed once at startup and cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub posts: Arc<dyn PostStore>,
    pub config: Config,
}

impl AppState {
    /// Connects to MongoDB and wires the document-backed stores.
    /// The connection is verified with a ping before the state is returned.
    pub async fn connect(config: Config) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(&config.mongodb_uri).await?;
        client_options.app_name = Some("devconnect".to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database_name);

        db.run_command(doc! { "ping": 1 }).await?;

        Ok(Self {
            users: Arc::new(MongoUserStore::new(&db)),
            profiles: Arc::new(MongoProfileStore::new(&db)),
            posts: Arc::new(MongoPostStore::new(&db)),
            config,
        })
    }

    /// State backed by in-memory stores. Used by the integration tests.
    pub fn in_memory(config: Config) -> Self {
        Self {
            users: Arc::new(MemoryUserStore::default()),
            profiles: Arc::new(MemoryProfileStore::default()),
            posts: Arc::new(MemoryPostStore::default()),
            config,
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
