//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::Config,
    db::repositories::{
        BandRepository, EventRepository, PgBandRepository, PgEventRepository, PgUserRepository,
        UserRepository,
    },
    storage::MediaStorage,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool, absent when running on in-memory repositories
    db: Option<PgPool>,

    users: Arc<dyn UserRepository>,
    bands: Arc<dyn BandRepository>,
    events: Arc<dyn EventRepository>,

    /// Uploaded files
    media: MediaStorage,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create the application state backed by PostgreSQL
    pub fn new(db: PgPool, config: Config) -> Self {
        let media = MediaStorage::new(config.storage.media_root.clone());

        Self {
            inner: Arc::new(AppStateInner {
                users: Arc::new(PgUserRepository::new(db.clone())),
                bands: Arc::new(PgBandRepository::new(db.clone())),
                events: Arc::new(PgEventRepository::new(db.clone())),
                db: Some(db),
                media,
                config,
            }),
        }
    }

    /// Create the application state from explicit repositories
    pub fn from_parts(
        users: Arc<dyn UserRepository>,
        bands: Arc<dyn BandRepository>,
        events: Arc<dyn EventRepository>,
        media: MediaStorage,
        config: Config,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db: None,
                users,
                bands,
                events,
                media,
                config,
            }),
        }
    }

    /// Get a reference to the database pool, if any
    pub fn db(&self) -> Option<&PgPool> {
        self.inner.db.as_ref()
    }

    pub fn users(&self) -> &dyn UserRepository {
        self.inner.users.as_ref()
    }

    pub fn bands(&self) -> &dyn BandRepository {
        self.inner.bands.as_ref()
    }

    pub fn events(&self) -> &dyn EventRepository {
        self.inner.events.as_ref()
    }

    /// Get a reference to the media storage
    pub fn media(&self) -> &MediaStorage {
        &self.inner.media
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
