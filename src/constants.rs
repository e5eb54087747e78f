//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// SESSION DEFAULTS
// =============================================================================

/// Default session lifetime in hours
pub const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 24;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "bandas_session";

/// Maximum username length
pub const MAX_USERNAME_LENGTH: u64 = 150;

/// Minimum password length (CLI user creation)
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Error shown on the login form for unknown credentials
pub const LOGIN_ERROR_MESSAGE: &str = "Nombre de usuario o contraseña incorrectos.";

// =============================================================================
// ROUTES
// =============================================================================

/// Named destinations used by redirects
pub mod paths {
    pub const LANDING: &str = "/";
    pub const LOGIN: &str = "/login/";
    pub const BANDS: &str = "/bandas/";
    pub const REPRESENTATIVE_DASHBOARD: &str = "/dashboards/representative/";
    pub const ADMIN_DASHBOARD: &str = "/dashboards/admin/";
    pub const MODERATOR_DASHBOARD: &str = "/dashboards/moderator/";

    /// Band detail page
    pub fn band_detail(id: &uuid::Uuid) -> String {
        format!("/bandas/{}/", id)
    }

    /// Gallery upload page of a band
    pub fn band_gallery(id: &uuid::Uuid) -> String {
        format!("/bandas/{}/subir-imagen/", id)
    }
}

// =============================================================================
// MEDIA
// =============================================================================

/// Root directory (relative to the media root) holding every band's files
pub const BANDS_MEDIA_DIR: &str = "bandas";

/// Subdirectories of a band's media directory
pub mod media_dirs {
    pub const DEMOS: &str = "demos";
    pub const PRINCIPAL_IMAGE: &str = "imagenes/representativa";
    pub const GALLERY: &str = "imagenes_de_la_banda";
    pub const MEMBERS: &str = "imagenes_de_integrantes";
    pub const FLYERS: &str = "flyers";
}

/// URL prefix under which the media root is served
pub const MEDIA_URL: &str = "/media";

/// URL prefix under which bundled static assets are served
pub const STATIC_URL: &str = "/static";

/// File name given to the placeholder image attached to new bands
pub const PLACEHOLDER_IMAGE_NAME: &str = "no-image.svg";

/// Placeholder image attached to every new band
pub const PLACEHOLDER_IMAGE: &[u8] = include_bytes!("../static/images/no-image.svg");

/// Default maximum upload size in megabytes
pub const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 20;

/// Maximum number of gallery images accepted in a single upload request
pub const MAX_IMAGES_PER_UPLOAD: usize = 5;

/// File extensions accepted for images (gallery, principal image, flyers, member photos)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg"];

/// File extensions accepted for demos
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a", "flac"];

/// Message shown when a gallery upload carries too many files
pub const TOO_MANY_IMAGES_MESSAGE: &str = "Solo puedes subir un máximo de 5 imágenes.";

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum band name length
pub const MAX_BAND_NAME_LENGTH: u64 = 100;

/// Maximum rehearsal location length
pub const MAX_REHEARSAL_LOCATION_LENGTH: u64 = 200;

/// Maximum member role / genre length
pub const MAX_MEMBER_ROLE_LENGTH: u64 = 100;

/// Maximum favorite instruments length
pub const MAX_INSTRUMENTS_LENGTH: u64 = 200;

/// Maximum flyer description length
pub const MAX_FLYER_DESCRIPTION_LENGTH: u64 = 255;

/// Maximum event title / location length
pub const MAX_EVENT_FIELD_LENGTH: u64 = 200;
