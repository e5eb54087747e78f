//! Dashboard handler implementations

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use uuid::Uuid;

use crate::{
    constants::paths,
    error::AppResult,
    handlers::{
        bands::response::{BandSummary, FlyerView, ImageView, MemberView, StyleOption},
        page_context, user_message,
    },
    middleware::auth::AuthenticatedUser,
    services::{AdminService, BandService, ModerationService},
    state::AppState,
    templates::render_page,
};

use super::{
    request::{EventForm, RoleForm},
    response::{EventView, RoleOption, StatusGroupView, UserRow},
};

/// Representative dashboard; the band is created on the first visit
pub async fn representative_dashboard(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Html<String>> {
    render_representative_dashboard(&state, &user, None).await
}

/// Admin dashboard: users, bands and events
pub async fn admin_dashboard(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Html<String>> {
    render_admin_dashboard(&state, &user, None).await
}

pub async fn update_user_role(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(user_id): Path<Uuid>,
    Form(form): Form<RoleForm>,
) -> AppResult<Response> {
    let result = match form.role() {
        Ok(role) => {
            AdminService::update_user_role(state.users(), state.bands(), &user, &user_id, role)
                .await
                .map(|_| ())
        }
        Err(e) => Err(e),
    };

    admin_outcome(&state, &user, result).await
}

pub async fn create_event(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Form(form): Form<EventForm>,
) -> AppResult<Response> {
    let result = match form.into_input() {
        Ok(input) => AdminService::create_event(state.events(), &user, input)
            .await
            .map(|_| ()),
        Err(e) => Err(e),
    };

    admin_outcome(&state, &user, result).await
}

/// Moderator dashboard: bands grouped by moderation status
pub async fn moderator_dashboard(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Html<String>> {
    let groups = ModerationService::bands_by_status(state.bands()).await?;
    let groups: Vec<StatusGroupView> = groups.iter().map(StatusGroupView::from).collect();

    let mut context = page_context(Some(&user));
    context.insert("groups", &groups);
    render_page("moderator_dashboard.html", &context)
}

/// Render the representative dashboard, optionally with a form error
pub async fn render_representative_dashboard(
    state: &AppState,
    user: &AuthenticatedUser,
    error: Option<&str>,
) -> AppResult<Html<String>> {
    let band = BandService::representative_band(state.bands(), user).await?;
    let detail = BandService::band_detail(state.bands(), &band.id).await?;
    let all_styles = state.bands().list_styles().await?;

    let members: Vec<MemberView> = detail.members.iter().map(MemberView::from).collect();
    let images: Vec<ImageView> = detail.images.iter().map(ImageView::from).collect();
    let flyers: Vec<FlyerView> = detail.flyers.iter().map(FlyerView::from).collect();

    let mut context = page_context(Some(user));
    context.insert("band", &BandSummary::from(&detail.band));
    context.insert("biography", &detail.band.biography);
    context.insert("members", &members);
    context.insert("images", &images);
    context.insert("flyers", &flyers);
    context.insert("styles", &StyleOption::list(&all_styles, &detail.styles));
    context.insert("error", &error);
    render_page("representative_dashboard.html", &context)
}

async fn render_admin_dashboard(
    state: &AppState,
    user: &AuthenticatedUser,
    error: Option<&str>,
) -> AppResult<Html<String>> {
    let overview = AdminService::overview(state.users(), state.bands(), state.events()).await?;

    let users: Vec<UserRow> = overview
        .users
        .iter()
        .map(|u| UserRow::new(u, &user.id))
        .collect();
    let bands: Vec<BandSummary> = overview.bands.iter().map(BandSummary::from).collect();
    let events: Vec<EventView> = overview.events.iter().map(EventView::from).collect();

    let mut context = page_context(Some(user));
    context.insert("users", &users);
    context.insert("roles", &RoleOption::all());
    context.insert("bands", &bands);
    context.insert("events", &events);
    context.insert("error", &error);
    render_page("admin_dashboard.html", &context)
}

/// Redirect back to the admin dashboard, or show it with the error message
async fn admin_outcome(
    state: &AppState,
    user: &AuthenticatedUser,
    result: AppResult<()>,
) -> AppResult<Response> {
    match result {
        Ok(()) => Ok(Redirect::to(paths::ADMIN_DASHBOARD).into_response()),
        Err(e) => {
            let message = user_message(e)?;
            Ok(render_admin_dashboard(state, user, Some(&message))
                .await?
                .into_response())
        }
    }
}
