//! Authentication handlers

mod handler;
pub mod request;

pub use handler::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Authentication routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login/", get(handler::login_page).post(handler::login))
        .route("/logout/", get(handler::logout).post(handler::logout))
}
