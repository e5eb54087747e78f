//! Template engine setup
//!
//! Templates are embedded in the binary and compiled once on first use.

use std::sync::LazyLock;

use axum::response::Html;
use tera::{Context, Tera};

use crate::error::AppResult;

/// Global template engine instance with embedded templates
pub static TEMPLATES: LazyLock<Tera> = LazyLock::new(|| {
    let mut tera = Tera::default();

    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        ("landing.html", include_str!("../templates/landing.html")),
        ("login.html", include_str!("../templates/login.html")),
        ("error.html", include_str!("../templates/error.html")),
        ("band_list.html", include_str!("../templates/band_list.html")),
        ("band_detail.html", include_str!("../templates/band_detail.html")),
        ("create_band.html", include_str!("../templates/create_band.html")),
        ("edit_band.html", include_str!("../templates/edit_band.html")),
        ("edit_biography.html", include_str!("../templates/edit_biography.html")),
        ("edit_members.html", include_str!("../templates/edit_members.html")),
        ("upload_images.html", include_str!("../templates/upload_images.html")),
        (
            "edit_representative_image.html",
            include_str!("../templates/edit_representative_image.html"),
        ),
        (
            "representative_dashboard.html",
            include_str!("../templates/representative_dashboard.html"),
        ),
        ("admin_dashboard.html", include_str!("../templates/admin_dashboard.html")),
        (
            "moderator_dashboard.html",
            include_str!("../templates/moderator_dashboard.html"),
        ),
    ])
    .expect("Failed to load templates");

    tera
});

/// Render a template with context
pub fn render(template: &str, context: &Context) -> Result<String, tera::Error> {
    TEMPLATES.render(template, context)
}

/// Render a full page, mapping template failures to `AppError::Template`
pub fn render_page(template: &str, context: &Context) -> AppResult<Html<String>> {
    Ok(Html(render(template, context)?))
}
