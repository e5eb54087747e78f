//! Admin service

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    db::repositories::{BandRepository, EventRepository, UserRepository},
    error::{AppError, AppResult},
    middleware::AuthenticatedUser,
    models::{Band, Event, NewEvent, Role, User},
};

/// Data listed on the admin dashboard
#[derive(Debug, Clone)]
pub struct AdminOverview {
    pub users: Vec<User>,
    pub bands: Vec<Band>,
    pub events: Vec<Event>,
}

/// Event form after validation
#[derive(Debug, Clone)]
pub struct EventInput {
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub location: String,
    pub description: String,
}

/// Admin service for user and event management
pub struct AdminService;

impl AdminService {
    pub async fn overview(
        users: &dyn UserRepository,
        bands: &dyn BandRepository,
        events: &dyn EventRepository,
    ) -> AppResult<AdminOverview> {
        Ok(AdminOverview {
            users: users.list().await?,
            bands: bands.list().await?,
            events: events.list().await?,
        })
    }

    /// Change a user's role. Admins cannot change their own role, and a
    /// representative keeps the role while a band is registered to them.
    pub async fn update_user_role(
        users: &dyn UserRepository,
        bands: &dyn BandRepository,
        actor: &AuthenticatedUser,
        user_id: &Uuid,
        role: Role,
    ) -> AppResult<User> {
        if actor.id == *user_id {
            return Err(AppError::Validation(
                "No puedes cambiar tu propio rol.".to_string(),
            ));
        }

        let user = users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario".to_string()))?;

        if user.role == Role::Representative && role != Role::Representative {
            if let Some(band) = bands.find_by_representative(&user.id).await? {
                warn!(user_id = %user.id, band_id = %band.id, "Rejected demotion of a representative with a band");
                return Err(AppError::Validation(format!(
                    "{} representa a la banda \"{}\"; elimina la banda antes de cambiar su rol.",
                    user.username, band.name
                )));
            }
        }

        let updated = users.update_role(&user.id, role).await?;

        info!(
            user_id = %updated.id,
            from = %user.role,
            to = %updated.role,
            admin = %actor.username,
            "User role changed"
        );
        Ok(updated)
    }

    pub async fn create_event(
        events: &dyn EventRepository,
        organizer: &AuthenticatedUser,
        input: EventInput,
    ) -> AppResult<Event> {
        let event = events
            .create(NewEvent {
                title: input.title,
                starts_at: input.starts_at,
                location: input.location,
                description: input.description,
                organizer_id: Some(organizer.id),
            })
            .await?;

        info!(event_id = %event.id, title = %event.title, "Event created");
        Ok(event)
    }
}
