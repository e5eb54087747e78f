//! Authentication handler implementations

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use validator::Validate;

use crate::{
    constants::{paths, LOGIN_ERROR_MESSAGE},
    error::{AppError, AppResult},
    handlers::page_context,
    middleware::auth::{clear_session_cookie, session_cookie, OptionalAuth},
    services::AuthService,
    state::AppState,
    templates::render_page,
};

use super::request::LoginForm;

/// Login form
pub async fn login_page(OptionalAuth(user): OptionalAuth) -> AppResult<Html<String>> {
    let mut context = page_context(user.as_ref());
    context.insert("username", "");
    render_page("login.html", &context)
}

/// Check credentials, set the session cookie and send the user to their dashboard.
///
/// Bad credentials show the form again with a fixed message.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let outcome = match form.validate() {
        Ok(()) => AuthService::authenticate(state.users(), &form.username, &form.password).await,
        Err(_) => Err(AppError::InvalidCredentials),
    };

    let user = match outcome {
        Ok(user) => user,
        Err(AppError::InvalidCredentials) => {
            let mut context = page_context(None);
            context.insert("error", LOGIN_ERROR_MESSAGE);
            context.insert("username", form.username.trim());
            return Ok(render_page("login.html", &context)?.into_response());
        }
        Err(e) => return Err(e),
    };

    let token = AuthService::issue_token(&user, &state.config().session)?;
    let destination = AuthService::destination_for(&user);

    Ok((
        [(SET_COOKIE, session_cookie(&token, &state.config().session))],
        Redirect::to(destination),
    )
        .into_response())
}

/// Clear the session and go back to the landing page
pub async fn logout() -> Response {
    (
        [(SET_COOKIE, clear_session_cookie())],
        Redirect::to(paths::LANDING),
    )
        .into_response()
}
