//! Landing page

use axum::{response::Html, routing::get, Router};

use crate::{
    error::AppResult, handlers::page_context, middleware::auth::OptionalAuth, state::AppState,
    templates::render_page,
};

async fn landing_page(OptionalAuth(user): OptionalAuth) -> AppResult<Html<String>> {
    render_page("landing.html", &page_context(user.as_ref()))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(landing_page))
}
