//! Band handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Band routes
pub fn routes() -> Router<AppState> {
    Router::new()
        // Public pages
        .route("/bandas/", get(handler::list_bands))
        .route("/bandas/{id}/", get(handler::band_detail))
        .route("/bandas/{id}/descargar/", get(handler::download_demo))
        // Registration
        .route(
            "/bandas/crear/",
            get(handler::create_band_page).post(handler::create_band),
        )
        // Owner-only management
        .route(
            "/bandas/{id}/editar/",
            get(handler::edit_band_page).post(handler::edit_band),
        )
        .route("/bandas/{id}/eliminar/", post(handler::delete_band))
        .route(
            "/bandas/{id}/editar-biografia/",
            get(handler::edit_biography_page).post(handler::edit_biography),
        )
        .route(
            "/bandas/{id}/editar-integrantes/",
            get(handler::edit_members_page).post(handler::add_member),
        )
        .route(
            "/bandas/{id}/subir-imagen/",
            get(handler::upload_images_page).post(handler::upload_images),
        )
        .route("/bandas/{id}/subir-demo/", post(handler::upload_demo))
        .route("/bandas/{id}/subir-flyer/", post(handler::upload_flyer))
        .route(
            "/bandas/{id}/editar-imagen-representativa/",
            get(handler::edit_principal_image_page).post(handler::edit_principal_image),
        )
        .route("/bandas/eliminar-imagen/{id}/", post(handler::delete_image))
}
