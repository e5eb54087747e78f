//! HTTP middleware

pub mod auth;
pub mod logging;

pub use auth::{role_guard, session_middleware, AuthenticatedUser, OptionalAuth, RoleGuard};
pub use logging::logging_middleware;
