//! Event repository

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{Event, NewEvent},
};

use super::EventRepository;

/// PostgreSQL repository for event database operations
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, event: NewEvent) -> AppResult<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, starts_at, location, description, organizer_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&event.title)
        .bind(event.starts_at)
        .bind(&event.location)
        .bind(&event.description)
        .bind(event.organizer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    async fn list(&self) -> AppResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(r#"SELECT * FROM events ORDER BY starts_at"#)
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }
}
