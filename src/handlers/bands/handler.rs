//! Band handler implementations

use axum::{
    extract::{Multipart, Path, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{paths, MAX_IMAGES_PER_UPLOAD},
    error::AppResult,
    handlers::{dashboards::render_representative_dashboard, page_context, user_message},
    middleware::auth::{AuthenticatedUser, OptionalAuth},
    models::Band,
    services::BandService,
    state::AppState,
    templates::render_page,
};

use super::{
    request::{
        required_file, BiographyForm, CreateBandForm, EditBandForm, FlyerForm, MemberForm,
        MultipartForm,
    },
    response::{
        audio_content_type, BandPage, BandSummary, ImageView, MemberView, StyleOption,
    },
};

/// Public list of bands
pub async fn list_bands(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> AppResult<Html<String>> {
    let bands = BandService::list_bands(state.bands()).await?;
    let bands: Vec<BandSummary> = bands.iter().map(BandSummary::from).collect();

    let mut context = page_context(user.as_ref());
    context.insert("bands", &bands);
    render_page("band_list.html", &context)
}

/// Public band page
pub async fn band_detail(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(band_id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let detail = BandService::band_detail(state.bands(), &band_id).await?;
    let is_owner = user
        .as_ref()
        .is_some_and(|user| detail.band.is_owned_by(&user.id));

    let mut context = page_context(user.as_ref());
    context.insert("page", &BandPage::from(&detail));
    context.insert("is_owner", &is_owner);
    render_page("band_detail.html", &context)
}

/// Download the band's demo as an attachment
pub async fn download_demo(
    State(state): State<AppState>,
    Path(band_id): Path<Uuid>,
) -> AppResult<Response> {
    let download = BandService::demo_download(state.bands(), state.media(), &band_id).await?;

    let headers = [
        (CONTENT_TYPE, audio_content_type(&download.file_name).to_string()),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download.file_name),
        ),
    ];
    Ok((headers, download.data).into_response())
}

pub async fn create_band_page(user: AuthenticatedUser) -> AppResult<Html<String>> {
    render_create_band(&user, None, "")
}

/// Register a band for the current representative
pub async fn create_band(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Form(form): Form<CreateBandForm>,
) -> AppResult<Response> {
    // A missing name just shows the form again
    let Some(name) = form.name() else {
        return Ok(render_create_band(&user, None, "")?.into_response());
    };

    match BandService::create_band(state.bands(), state.media(), &user, &name).await {
        Ok(_) => Ok(Redirect::to(paths::REPRESENTATIVE_DASHBOARD).into_response()),
        Err(e) => {
            let message = user_message(e)?;
            Ok(render_create_band(&user, Some(&message), &name)?.into_response())
        }
    }
}

pub async fn edit_band_page(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(band_id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let band = BandService::owned_band(state.bands(), &band_id, &user).await?;
    render_edit_band(&state, &user, &band, None).await
}

/// Update name, rehearsal location and musical styles
pub async fn edit_band(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(band_id): Path<Uuid>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let band = BandService::owned_band(state.bands(), &band_id, &user).await?;

    let result = match EditBandForm::from_pairs(pairs) {
        Ok(form) => match form.validate() {
            Ok(()) => {
                BandService::update_general(state.bands(), &band.id, &user, form.into_changes())
                    .await
            }
            Err(e) => Err(e.into()),
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(band) => Ok(Redirect::to(&paths::band_detail(&band.id)).into_response()),
        Err(e) => {
            let message = user_message(e)?;
            Ok(render_edit_band(&state, &user, &band, Some(&message))
                .await?
                .into_response())
        }
    }
}

/// Delete a band; only its representative may do so
pub async fn delete_band(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(band_id): Path<Uuid>,
) -> AppResult<Redirect> {
    BandService::delete_band(state.bands(), state.media(), &band_id, &user).await?;
    Ok(Redirect::to(paths::REPRESENTATIVE_DASHBOARD))
}

pub async fn edit_biography_page(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(band_id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let band = BandService::owned_band(state.bands(), &band_id, &user).await?;

    let mut context = page_context(Some(&user));
    context.insert("band", &BandSummary::from(&band));
    context.insert("biography", &band.biography);
    render_page("edit_biography.html", &context)
}

pub async fn edit_biography(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(band_id): Path<Uuid>,
    Form(form): Form<BiographyForm>,
) -> AppResult<Redirect> {
    let biography = form.biography.trim();
    let band = BandService::update_biography(state.bands(), &band_id, &user, biography).await?;
    Ok(Redirect::to(&paths::band_detail(&band.id)))
}

pub async fn edit_members_page(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(band_id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let band = BandService::owned_band(state.bands(), &band_id, &user).await?;
    render_edit_members(&state, &user, &band, None).await
}

/// Add a member to the roster
pub async fn add_member(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(band_id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Response> {
    let band = BandService::owned_band(state.bands(), &band_id, &user).await?;
    let form = MultipartForm::read(multipart).await?;

    let result = match MemberForm::from_multipart(&form).into_input() {
        Ok(input) => {
            BandService::add_member(state.bands(), state.media(), &band.id, &user, input).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => Ok(Redirect::to(&paths::band_detail(&band.id)).into_response()),
        Err(e) => {
            let message = user_message(e)?;
            Ok(render_edit_members(&state, &user, &band, Some(&message))
                .await?
                .into_response())
        }
    }
}

pub async fn upload_images_page(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(band_id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let band = BandService::owned_band(state.bands(), &band_id, &user).await?;
    render_upload_images(&state, &user, &band, None).await
}

/// Add up to five gallery images
pub async fn upload_images(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(band_id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Response> {
    let band = BandService::owned_band(state.bands(), &band_id, &user).await?;
    let form = MultipartForm::read(multipart).await?;

    let files = form.files("imagenes");
    match BandService::upload_images(state.bands(), state.media(), &band.id, &user, files).await {
        Ok(_) => Ok(Redirect::to(&paths::band_gallery(&band.id)).into_response()),
        Err(e) => {
            let message = user_message(e)?;
            Ok(render_upload_images(&state, &user, &band, Some(&message))
                .await?
                .into_response())
        }
    }
}

/// Remove one gallery image
pub async fn delete_image(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(image_id): Path<Uuid>,
) -> AppResult<Redirect> {
    let band_id = BandService::delete_image(state.bands(), state.media(), &image_id, &user).await?;
    Ok(Redirect::to(&paths::band_gallery(&band_id)))
}

/// Replace the band's demo
pub async fn upload_demo(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(band_id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Response> {
    let band = BandService::owned_band(state.bands(), &band_id, &user).await?;
    let form = MultipartForm::read(multipart).await?;

    let result = match required_file(&form, "demos") {
        Ok(file) => {
            BandService::upload_demo(state.bands(), state.media(), &band.id, &user, file).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => Ok(Redirect::to(paths::REPRESENTATIVE_DASHBOARD).into_response()),
        Err(e) => {
            let message = user_message(e)?;
            Ok(render_representative_dashboard(&state, &user, Some(&message))
                .await?
                .into_response())
        }
    }
}

/// Add a promotional flyer
pub async fn upload_flyer(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(band_id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Response> {
    let band = BandService::owned_band(state.bands(), &band_id, &user).await?;
    let form = MultipartForm::read(multipart).await?;
    let flyer = FlyerForm::from_multipart(&form);

    let result = match flyer.validate() {
        Err(e) => Err(e.into()),
        Ok(()) => match required_file(&form, "imagen") {
            Ok(file) => BandService::upload_flyer(
                state.bands(),
                state.media(),
                &band.id,
                &user,
                file,
                flyer.description,
            )
            .await
            .map(|_| ()),
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(()) => Ok(Redirect::to(paths::REPRESENTATIVE_DASHBOARD).into_response()),
        Err(e) => {
            let message = user_message(e)?;
            Ok(render_representative_dashboard(&state, &user, Some(&message))
                .await?
                .into_response())
        }
    }
}

pub async fn edit_principal_image_page(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(band_id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let band = BandService::owned_band(state.bands(), &band_id, &user).await?;
    render_principal_image(&user, &band, None)
}

/// Replace the band's principal image
pub async fn edit_principal_image(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(band_id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Response> {
    let band = BandService::owned_band(state.bands(), &band_id, &user).await?;
    let form = MultipartForm::read(multipart).await?;

    let result = match required_file(&form, "imagen_representativa") {
        Ok(file) => {
            BandService::upload_principal_image(state.bands(), state.media(), &band.id, &user, file)
                .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => Ok(Redirect::to(paths::REPRESENTATIVE_DASHBOARD).into_response()),
        Err(e) => {
            let message = user_message(e)?;
            Ok(render_principal_image(&user, &band, Some(&message))?.into_response())
        }
    }
}

fn render_create_band(
    user: &AuthenticatedUser,
    error: Option<&str>,
    name: &str,
) -> AppResult<Html<String>> {
    let mut context = page_context(Some(user));
    context.insert("error", &error);
    context.insert("name", name);
    render_page("create_band.html", &context)
}

async fn render_edit_band(
    state: &AppState,
    user: &AuthenticatedUser,
    band: &Band,
    error: Option<&str>,
) -> AppResult<Html<String>> {
    let all = state.bands().list_styles().await?;
    let selected = state.bands().styles_for_band(&band.id).await?;

    let mut context = page_context(Some(user));
    context.insert("band", &BandSummary::from(band));
    context.insert("styles", &StyleOption::list(&all, &selected));
    context.insert("error", &error);
    render_page("edit_band.html", &context)
}

async fn render_edit_members(
    state: &AppState,
    user: &AuthenticatedUser,
    band: &Band,
    error: Option<&str>,
) -> AppResult<Html<String>> {
    let members = state.bands().list_members(&band.id).await?;
    let members: Vec<MemberView> = members.iter().map(MemberView::from).collect();

    let mut context = page_context(Some(user));
    context.insert("band", &BandSummary::from(band));
    context.insert("members", &members);
    context.insert("error", &error);
    render_page("edit_members.html", &context)
}

async fn render_upload_images(
    state: &AppState,
    user: &AuthenticatedUser,
    band: &Band,
    error: Option<&str>,
) -> AppResult<Html<String>> {
    let images = state.bands().list_images(&band.id).await?;
    let images: Vec<ImageView> = images.iter().map(ImageView::from).collect();

    let mut context = page_context(Some(user));
    context.insert("band", &BandSummary::from(band));
    context.insert("images", &images);
    context.insert("max_images", &MAX_IMAGES_PER_UPLOAD);
    context.insert("error", &error);
    render_page("upload_images.html", &context)
}

fn render_principal_image(
    user: &AuthenticatedUser,
    band: &Band,
    error: Option<&str>,
) -> AppResult<Html<String>> {
    let mut context = page_context(Some(user));
    context.insert("band", &BandSummary::from(band));
    context.insert("error", &error);
    render_page("edit_representative_image.html", &context)
}
