use crate::config::{Config, StoreBackend};
use crate::store::{MemoryStore, MongoStore, TriviaStore};
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn TriviaStore>,
}

impl AppState {
    /// Connects the configured backend. MongoDB is reached lazily by the
    /// driver; the id counter sync below is the first real round-trip.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn TriviaStore> = match config.store_backend {
            StoreBackend::Mongo => {
                tracing::info!("Connecting to MongoDB database {}", config.mongo_database);
                let client = mongodb::Client::with_uri_str(&config.mongo_uri).await?;
                let store = MongoStore::new(client.database(&config.mongo_database)).await?;
                tracing::info!("MongoDB store ready");
                Arc::new(store)
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; data is lost on restart");
                Arc::new(MemoryStore::with_data(
                    MemoryStore::default_categories(),
                    Vec::new(),
                ))
            }
        };

        Ok(Self { config, store })
    }

    pub fn with_store(config: Config, store: Arc<dyn TriviaStore>) -> Self {
        Self { config, store }
    }
}

pub mod question_service;
pub mod quiz_service;
