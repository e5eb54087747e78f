//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework. Pages are
//! server-rendered, so errors become redirects or HTML error pages.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tera::Context;

use crate::{constants::paths, storage::StorageError, templates};

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid session")]
    InvalidSession,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // Validation errors
    #[error("{0}")]
    Validation(String),

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Template error: {0}")]
    Template(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidSession => "INVALID_SESSION",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Template(_) => "TEMPLATE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::InvalidSession | Self::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Storage(_) | Self::Template(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether the error can be shown next to a form field
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::AlreadyExists(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Anonymous callers are sent to the login page instead of an error page
        if matches!(self, AppError::Unauthorized | AppError::InvalidSession) {
            return Redirect::to(paths::LOGIN).into_response();
        }

        let status = self.status_code();

        // Log internal errors but don't expose details to clients
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "Ocurrió un error interno.".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Ocurrió un error de base de datos.".to_string()
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                "No se pudo acceder a los archivos.".to_string()
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {}", e);
                "No se pudo mostrar la página.".to_string()
            }
            AppError::Forbidden(reason) => reason.clone(),
            AppError::NotFound(what) => format!("No encontrado: {}", what),
            _ => self.to_string(),
        };

        let mut context = Context::new();
        context.insert("status", &status.as_u16());
        context.insert("code", self.error_code());
        context.insert("message", &message);

        match templates::render("error.html", &context) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(_) => (status, message).into_response(),
        }
    }
}

// Implement From for common error types
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Check for unique constraint violations
                if db_err.is_unique_violation() {
                    AppError::AlreadyExists("Resource already exists".to_string())
                } else {
                    AppError::Database(db_err.to_string())
                }
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        AppError::InvalidSession
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        // Prefer the human-readable messages declared on the form fields
        let mut messages: Vec<String> = err
            .field_errors()
            .values()
            .flat_map(|errors| errors.iter())
            .filter_map(|error| error.message.as_ref().map(|m| m.to_string()))
            .collect();

        if messages.is_empty() {
            return AppError::Validation(err.to_string());
        }

        messages.sort();
        messages.dedup();
        AppError::Validation(messages.join(" "))
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        AppError::Template(format!("{:?}", err))
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(path) => {
                tracing::debug!(path = %path, "Media file not found");
                AppError::NotFound("Archivo".to_string())
            }
            StorageError::InvalidPath(path) => {
                AppError::Validation(format!("Nombre de archivo inválido: {}", path))
            }
            StorageError::Io(e) => AppError::Storage(e.to_string()),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Validation(format!("Formulario inválido: {}", err.body_text()))
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
