//! Band repository

use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Band, BandChanges, BandImage, Flyer, Member, MusicalStyle, NewMember},
};

use super::{BandMediaSlot, BandRepository};

/// PostgreSQL repository for bands and their dependent rows
#[derive(Clone)]
pub struct PgBandRepository {
    pool: PgPool,
}

impl PgBandRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BandRepository for PgBandRepository {
    async fn create(&self, name: &str, representative_id: &Uuid) -> AppResult<Band> {
        let band = sqlx::query_as::<_, Band>(
            r#"
            INSERT INTO bands (name, representative_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(representative_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(band)
    }

    async fn insert_for_representative(
        &self,
        name: &str,
        representative_id: &Uuid,
    ) -> AppResult<Option<Band>> {
        // Concurrent first visits race here; the unique representative_id keeps one row
        sqlx::query(
            r#"
            INSERT INTO bands (name, representative_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(name)
        .bind(representative_id)
        .execute(&self.pool)
        .await?;

        self.find_by_representative(representative_id).await
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Band>> {
        let band = sqlx::query_as::<_, Band>(r#"SELECT * FROM bands WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(band)
    }

    async fn find_by_representative(&self, representative_id: &Uuid) -> AppResult<Option<Band>> {
        let band =
            sqlx::query_as::<_, Band>(r#"SELECT * FROM bands WHERE representative_id = $1"#)
                .bind(representative_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(band)
    }

    async fn list(&self) -> AppResult<Vec<Band>> {
        let bands = sqlx::query_as::<_, Band>(r#"SELECT * FROM bands ORDER BY name"#)
            .fetch_all(&self.pool)
            .await?;

        Ok(bands)
    }

    async fn update_general(&self, id: &Uuid, changes: &BandChanges) -> AppResult<Band> {
        let mut tx = self.pool.begin().await?;

        let band = sqlx::query_as::<_, Band>(
            r#"
            UPDATE bands
            SET name = $2, rehearsal_location = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.rehearsal_location)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(r#"DELETE FROM band_styles WHERE band_id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // Unknown style ids are ignored
        sqlx::query(
            r#"
            INSERT INTO band_styles (band_id, style_id)
            SELECT $1, id FROM musical_styles WHERE id = ANY($2)
            "#,
        )
        .bind(id)
        .bind(&changes.style_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(band)
    }

    async fn update_biography(&self, id: &Uuid, biography: &str) -> AppResult<Band> {
        let band = sqlx::query_as::<_, Band>(
            r#"UPDATE bands SET biography = $2 WHERE id = $1 RETURNING *"#,
        )
        .bind(id)
        .bind(biography)
        .fetch_one(&self.pool)
        .await?;

        Ok(band)
    }

    async fn set_media(&self, id: &Uuid, slot: BandMediaSlot, path: &str) -> AppResult<Band> {
        let query = format!(
            "UPDATE bands SET {} = $2 WHERE id = $1 RETURNING *",
            slot.column()
        );

        let band = sqlx::query_as::<_, Band>(&query)
            .bind(id)
            .bind(path)
            .fetch_one(&self.pool)
            .await?;

        Ok(band)
    }

    async fn delete(&self, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM bands WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_styles(&self) -> AppResult<Vec<MusicalStyle>> {
        let styles =
            sqlx::query_as::<_, MusicalStyle>(r#"SELECT * FROM musical_styles ORDER BY name"#)
                .fetch_all(&self.pool)
                .await?;

        Ok(styles)
    }

    async fn styles_for_band(&self, band_id: &Uuid) -> AppResult<Vec<MusicalStyle>> {
        let styles = sqlx::query_as::<_, MusicalStyle>(
            r#"
            SELECT s.id, s.name
            FROM musical_styles s
            JOIN band_styles bs ON bs.style_id = s.id
            WHERE bs.band_id = $1
            ORDER BY s.name
            "#,
        )
        .bind(band_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(styles)
    }

    async fn add_member(&self, member: NewMember) -> AppResult<Member> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (
                band_id, role, favorite_instruments, joined_on, preferred_genre,
                personal_description, social_networks, photo
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(member.band_id)
        .bind(&member.role)
        .bind(&member.favorite_instruments)
        .bind(member.joined_on)
        .bind(&member.preferred_genre)
        .bind(&member.personal_description)
        .bind(Json(&member.social_networks))
        .bind(&member.photo)
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    async fn list_members(&self, band_id: &Uuid) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(
            r#"SELECT * FROM members WHERE band_id = $1 ORDER BY joined_on, role"#,
        )
        .bind(band_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn add_images(&self, band_id: &Uuid, paths: &[String]) -> AppResult<Vec<BandImage>> {
        let mut tx = self.pool.begin().await?;
        let mut images = Vec::with_capacity(paths.len());

        for path in paths {
            let image = sqlx::query_as::<_, BandImage>(
                r#"
                INSERT INTO band_images (band_id, image)
                VALUES ($1, $2)
                RETURNING *
                "#,
            )
            .bind(band_id)
            .bind(path)
            .fetch_one(&mut *tx)
            .await?;
            images.push(image);
        }

        tx.commit().await?;

        Ok(images)
    }

    async fn list_images(&self, band_id: &Uuid) -> AppResult<Vec<BandImage>> {
        let images = sqlx::query_as::<_, BandImage>(
            r#"SELECT * FROM band_images WHERE band_id = $1 ORDER BY uploaded_at"#,
        )
        .bind(band_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    async fn find_image(&self, id: &Uuid) -> AppResult<Option<BandImage>> {
        let image = sqlx::query_as::<_, BandImage>(r#"SELECT * FROM band_images WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(image)
    }

    async fn delete_image(&self, id: &Uuid) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM band_images WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn add_flyer(
        &self,
        band_id: &Uuid,
        path: &str,
        description: Option<String>,
    ) -> AppResult<Flyer> {
        let flyer = sqlx::query_as::<_, Flyer>(
            r#"
            INSERT INTO flyers (band_id, image, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(band_id)
        .bind(path)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(flyer)
    }

    async fn list_flyers(&self, band_id: &Uuid) -> AppResult<Vec<Flyer>> {
        let flyers = sqlx::query_as::<_, Flyer>(
            r#"SELECT * FROM flyers WHERE band_id = $1 ORDER BY uploaded_at DESC"#,
        )
        .bind(band_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(flyers)
    }
}
