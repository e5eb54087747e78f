//! Business logic services

pub mod admin_service;
pub mod auth_service;
pub mod band_service;
pub mod moderation_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use band_service::BandService;
pub use moderation_service::ModerationService;
