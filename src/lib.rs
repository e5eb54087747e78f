//! Bandas - Content management for musical bands
//!
//! Representatives register a band and manage its roster, biography and
//! media (principal image, gallery, flyers, demo). Administrators manage
//! users and events, moderators review bands, and visitors browse the
//! public listing.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers rendering server-side pages
//! - **Services**: Business logic (ownership, upload rules, login routing)
//! - **Repositories**: Database access behind traits
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod templates;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
