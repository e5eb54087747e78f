//! Session and role-guard middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::COOKIE, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    config::SessionConfig,
    constants::{paths, SESSION_COOKIE},
    error::AppError,
    models::{HasRole, Role, User},
    services::AuthService,
    state::AppState,
};

/// User resolved from the session cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}

impl HasRole for AuthenticatedUser {
    fn role(&self) -> Role {
        self.role
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Optional authenticated user wrapper (never fails)
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

/// Value of the session cookie, if the request carries one
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
        })
}

/// `Set-Cookie` value carrying a fresh session token
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        config.expiry_hours * 3600
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value removing the session cookie
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Session middleware
///
/// Resolves the session cookie to the current user and stores it in the
/// request extensions. The user is re-loaded on every request so role
/// changes apply immediately. Invalid, expired or orphaned tokens leave the
/// request anonymous.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let user = match session_token(request.headers()) {
        Some(token) => resolve_session(&state, token).await,
        None => None,
    };

    if let Some(user) = user {
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

async fn resolve_session(state: &AppState, token: &str) -> Option<AuthenticatedUser> {
    let claims = match AuthService::verify_token(token, &state.config().session.secret) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = ?e, "Ignoring invalid session token");
            return None;
        }
    };

    let user_id = Uuid::parse_str(&claims.sub).ok()?;

    match state.users().find_by_id(&user_id).await {
        Ok(Some(user)) => Some(AuthenticatedUser::from(&user)),
        Ok(None) => {
            debug!(user_id = %user_id, "Session refers to a missing user");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load session user");
            None
        }
    }
}

/// Outcome of evaluating a [`RoleGuard`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    /// No session: go to the login page
    Login,
    /// Authenticated with another role: go to the fallback page
    Fallback(&'static str),
}

/// Route guard requiring one role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGuard {
    pub role: Role,
    pub fallback: &'static str,
}

impl RoleGuard {
    pub const fn new(role: Role) -> Self {
        Self {
            role,
            fallback: paths::LANDING,
        }
    }

    pub const fn with_fallback(mut self, fallback: &'static str) -> Self {
        self.fallback = fallback;
        self
    }

    pub const fn admin() -> Self {
        Self::new(Role::Admin)
    }

    pub const fn moderator() -> Self {
        Self::new(Role::Moderator)
    }

    pub const fn representative() -> Self {
        Self::new(Role::Representative)
    }

    pub fn evaluate(&self, user: Option<&AuthenticatedUser>) -> GuardOutcome {
        match user {
            None => GuardOutcome::Login,
            Some(user) if user.role == self.role => GuardOutcome::Allow,
            Some(_) => GuardOutcome::Fallback(self.fallback),
        }
    }
}

/// Role guard middleware, used with `middleware::from_fn_with_state(guard, role_guard)`
pub async fn role_guard(
    State(guard): State<RoleGuard>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let user = request.extensions().get::<AuthenticatedUser>();

    match guard.evaluate(user) {
        GuardOutcome::Allow => next.run(request).await,
        GuardOutcome::Login => Redirect::to(paths::LOGIN).into_response(),
        GuardOutcome::Fallback(fallback) => {
            debug!(
                path = %request.uri().path(),
                required = %guard.role,
                "Role guard redirecting to fallback"
            );
            Redirect::to(fallback).into_response()
        }
    }
}
