//! Event model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Event listed on the admin dashboard
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub organizer_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Data needed to insert an event
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub organizer_id: Option<Uuid>,
}
