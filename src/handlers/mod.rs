//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain,
//! plus the router that ties them together.

pub mod auth;
pub mod bands;
pub mod dashboards;
pub mod health;
pub mod landing;


use axum::{extract::DefaultBodyLimit, middleware, Router};
use tera::Context;
use tower_http::services::ServeDir;

use crate::{
    constants::{MEDIA_URL, STATIC_URL},
    error::{AppError, AppResult},
    middleware::{logging_middleware, session_middleware, AuthenticatedUser},
    services::AuthService,
    state::AppState,
};

/// Build the application router: pages, uploaded media and static assets
pub fn router(state: AppState) -> Router {
    let storage = &state.config().storage;
    let media = ServeDir::new(&storage.media_root);
    let assets = ServeDir::new(&storage.static_root);
    let body_limit = storage.max_upload_bytes();

    Router::new()
        .merge(health::routes())
        .merge(landing::routes())
        .merge(auth::routes())
        .merge(bands::routes())
        .merge(dashboards::routes())
        .nest_service(MEDIA_URL, media)
        .nest_service(STATIC_URL, assets)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .with_state(state)
}

/// Template context shared by every page
pub(crate) fn page_context(user: Option<&AuthenticatedUser>) -> Context {
    let mut context = Context::new();
    if let Some(user) = user {
        context.insert("current_user", user);
        context.insert("dashboard_url", AuthService::destination_for(user));
    }
    context
}

/// Message to show next to a form, for errors the user can fix.
/// Everything else is passed through.
pub(crate) fn user_message(err: AppError) -> AppResult<String> {
    if err.is_user_facing() {
        Ok(err.to_string())
    } else {
        Err(err)
    }
}
