//! Role-specific dashboards

mod handler;
pub mod request;
pub mod response;

pub use handler::*;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{
    middleware::auth::{role_guard, RoleGuard},
    state::AppState,
};

/// Dashboard routes, each group behind its role guard
pub fn routes() -> Router<AppState> {
    let representative = Router::new()
        .route(
            "/dashboards/representative/",
            get(handler::representative_dashboard),
        )
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::representative(),
            role_guard,
        ));

    let admin = Router::new()
        .route("/dashboards/admin/", get(handler::admin_dashboard))
        .route(
            "/dashboards/admin/usuarios/{id}/rol/",
            post(handler::update_user_role),
        )
        .route("/dashboards/admin/eventos/", post(handler::create_event))
        .route_layer(middleware::from_fn_with_state(RoleGuard::admin(), role_guard));

    let moderator = Router::new()
        .route("/dashboards/moderator/", get(handler::moderator_dashboard))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::moderator(),
            role_guard,
        ));

    Router::new()
        .merge(representative)
        .merge(admin)
        .merge(moderator)
}
