//! Gallery image and flyer models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Gallery image of a band
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BandImage {
    pub id: Uuid,
    pub band_id: Uuid,
    /// Image, relative to the media root
    pub image: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Promotional flyer of a band
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Flyer {
    pub id: Uuid,
    pub band_id: Uuid,
    /// Image, relative to the media root
    pub image: String,
    pub description: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}
