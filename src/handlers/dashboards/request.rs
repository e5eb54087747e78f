//! Dashboard request DTOs

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::MAX_EVENT_FIELD_LENGTH,
    error::{AppError, AppResult},
    models::Role,
    services::admin_service::EventInput,
    utils::sanitize_string,
};

/// Role change form
#[derive(Debug, Default, Deserialize)]
pub struct RoleForm {
    #[serde(rename = "rol", default)]
    pub role: String,
}

impl RoleForm {
    pub fn role(&self) -> AppResult<Role> {
        self.role
            .parse()
            .map_err(|_| AppError::Validation("Rol desconocido.".to_string()))
    }
}

/// Event creation form
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EventForm {
    #[serde(rename = "titulo", default)]
    #[validate(length(min = 1, max = MAX_EVENT_FIELD_LENGTH, message = "Indica el título del evento."))]
    pub title: String,

    /// `datetime-local` input value
    #[serde(rename = "fecha", default)]
    pub starts_at: String,

    #[serde(rename = "lugar", default)]
    #[validate(length(min = 1, max = MAX_EVENT_FIELD_LENGTH, message = "Indica el lugar del evento."))]
    pub location: String,

    #[serde(rename = "descripcion", default)]
    pub description: String,
}

impl EventForm {
    pub fn into_input(self) -> AppResult<EventInput> {
        let form = Self {
            title: sanitize_string(&self.title),
            location: sanitize_string(&self.location),
            description: sanitize_string(&self.description),
            starts_at: self.starts_at,
        };
        form.validate()?;

        Ok(EventInput {
            starts_at: parse_event_start(&form.starts_at)?,
            title: form.title,
            location: form.location,
            description: form.description,
        })
    }
}

/// Parse a `datetime-local` value (with or without seconds) as UTC
fn parse_event_start(value: &str) -> AppResult<DateTime<Utc>> {
    let value = value.trim();
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::Validation("La fecha del evento no es válida.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_role_form() {
        let form = RoleForm {
            role: "Moderator".to_string(),
        };
        assert_eq!(form.role().unwrap(), Role::Moderator);

        let form = RoleForm {
            role: "superuser".to_string(),
        };
        assert!(form.role().is_err());
    }

    #[test]
    fn test_event_form_parses_datetime_local() {
        let form = EventForm {
            title: " Festival ".to_string(),
            starts_at: "2025-09-21T18:30".to_string(),
            location: "Parque Central".to_string(),
            description: String::new(),
        };

        let input = form.into_input().unwrap();
        assert_eq!(input.title, "Festival");
        assert_eq!(input.starts_at.day(), 21);
        assert_eq!(input.starts_at.hour(), 18);
        assert_eq!(input.starts_at.minute(), 30);
    }

    #[test]
    fn test_event_form_rejects_missing_fields() {
        let form = EventForm {
            title: "Festival".to_string(),
            starts_at: "mañana".to_string(),
            location: "Parque".to_string(),
            description: String::new(),
        };
        assert!(matches!(form.into_input(), Err(AppError::Validation(_))));

        let form = EventForm {
            starts_at: "2025-09-21T18:30".to_string(),
            ..EventForm::default()
        };
        assert!(matches!(form.into_input(), Err(AppError::Validation(_))));
    }
}
