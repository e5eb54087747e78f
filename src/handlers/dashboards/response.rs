//! Dashboard view models

use serde::Serialize;
use uuid::Uuid;

use crate::{
    handlers::bands::response::BandSummary,
    models::{Event, Role, User},
    services::moderation_service::StatusGroup,
};

#[derive(Debug, Serialize)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub role: String,
    pub role_label: String,
    pub locality: Option<String>,
    pub is_self: bool,
}

impl UserRow {
    pub fn new(user: &User, current_user_id: &Uuid) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role.as_str().to_string(),
            role_label: user.role.label().to_string(),
            locality: user.locality.clone(),
            is_self: user.id == *current_user_id,
        }
    }
}

/// Option of the role selector
#[derive(Debug, Serialize)]
pub struct RoleOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl RoleOption {
    pub fn all() -> Vec<Self> {
        Role::ALL
            .iter()
            .map(|role| Self {
                value: role.as_str(),
                label: role.label(),
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct EventView {
    pub id: Uuid,
    pub title: String,
    pub starts_at: String,
    pub location: String,
    pub description: String,
}

impl From<&Event> for EventView {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            starts_at: event.starts_at.format("%d/%m/%Y %H:%M").to_string(),
            location: event.location.clone(),
            description: event.description.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusGroupView {
    pub status: String,
    pub label: String,
    pub bands: Vec<BandSummary>,
}

impl From<&StatusGroup> for StatusGroupView {
    fn from(group: &StatusGroup) -> Self {
        Self {
            status: group.status.as_str().to_string(),
            label: group.status.label().to_string(),
            bands: group.bands.iter().map(BandSummary::from).collect(),
        }
    }
}
