//! Band member model

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// Member of a band. `(band_id, role)` is unique.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub band_id: Uuid,
    pub role: String,
    pub favorite_instruments: String,
    pub joined_on: NaiveDate,
    pub preferred_genre: Option<String>,
    pub personal_description: Option<String>,
    /// Social network name to profile URL
    pub social_networks: Json<BTreeMap<String, String>>,
    /// Photo, relative to the media root
    pub photo: Option<String>,
}

/// Data needed to insert a member
#[derive(Debug, Clone)]
pub struct NewMember {
    pub band_id: Uuid,
    pub role: String,
    pub favorite_instruments: String,
    pub joined_on: NaiveDate,
    pub preferred_genre: Option<String>,
    pub personal_description: Option<String>,
    pub social_networks: BTreeMap<String, String>,
    pub photo: Option<String>,
}
