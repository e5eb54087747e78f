//! Band and musical style models

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::storage::media_url;

/// Moderation status of a band
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "moderation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    pub const ALL: [ModerationStatus; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Approved => "Aprobado",
            Self::Rejected => "Rechazado",
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Band {
    pub id: Uuid,
    pub name: String,
    pub representative_id: Option<Uuid>,
    pub biography: String,
    /// Demo audio, relative to the media root
    pub demo: Option<String>,
    /// Principal image, relative to the media root
    pub principal_image: Option<String>,
    /// Secondary image, relative to the media root
    pub image: Option<String>,
    pub rehearsal_location: Option<String>,
    pub created_on: NaiveDate,
    pub status: ModerationStatus,
}

impl Band {
    /// Check whether `user_id` is this band's representative
    pub fn is_owned_by(&self, user_id: &Uuid) -> bool {
        self.representative_id.as_ref() == Some(user_id)
    }

    /// Image shown in listings: the principal image, else the secondary one
    pub fn cover_url(&self) -> Option<String> {
        self.principal_image
            .as_deref()
            .or(self.image.as_deref())
            .map(media_url)
    }

    /// File name offered when downloading the demo
    pub fn demo_file_name(&self) -> Option<&str> {
        self.demo
            .as_deref()
            .and_then(|path| path.rsplit('/').next())
    }
}

/// Musical style lookup entity
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct MusicalStyle {
    pub id: Uuid,
    pub name: String,
}

/// Editable general fields of a band
#[derive(Debug, Clone, Default)]
pub struct BandChanges {
    pub name: String,
    pub rehearsal_location: Option<String>,
    pub style_ids: Vec<Uuid>,
}
