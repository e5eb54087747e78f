//! In-memory repositories for unit and router tests
//!
//! Mirrors the constraints of the PostgreSQL schema that the application
//! relies on: unique usernames, unique band names, one band per
//! representative, unique `(band, role)` members and cascading deletes.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        Band, BandChanges, BandImage, Event, Flyer, Member, ModerationStatus, MusicalStyle,
        NewEvent, NewMember, NewUser, Role, User,
    },
};

use super::repositories::{BandMediaSlot, BandRepository, EventRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    bands: Vec<Band>,
    styles: Vec<MusicalStyle>,
    band_styles: Vec<(Uuid, Uuid)>,
    members: Vec<Member>,
    images: Vec<BandImage>,
    flyers: Vec<Flyer>,
    events: Vec<Event>,
}

/// Shared in-memory store implementing every repository trait
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Store seeded with a few musical styles
    pub fn new() -> Self {
        let store = Self::default();
        {
            let mut tables = store.lock();
            for name in ["Jazz", "Punk", "Rock"] {
                tables.styles.push(MusicalStyle {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                });
            }
        }
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn member_count(&self, band_id: &Uuid) -> usize {
        self.lock().members.iter().filter(|m| m.band_id == *band_id).count()
    }

    pub fn image_count(&self, band_id: &Uuid) -> usize {
        self.lock().images.iter().filter(|i| i.band_id == *band_id).count()
    }

    pub fn flyer_count(&self, band_id: &Uuid) -> usize {
        self.lock().flyers.iter().filter(|f| f.band_id == *band_id).count()
    }
}

fn update_band<F>(tables: &mut Tables, id: &Uuid, apply: F) -> AppResult<Band>
where
    F: FnOnce(&mut Band),
{
    let band = tables
        .bands
        .iter_mut()
        .find(|b| b.id == *id)
        .ok_or_else(|| AppError::NotFound("Resource not found".to_string()))?;
    apply(band);
    Ok(band.clone())
}

fn new_band(name: &str, representative_id: &Uuid) -> Band {
    Band {
        id: Uuid::new_v4(),
        name: name.to_string(),
        representative_id: Some(*representative_id),
        biography: String::new(),
        demo: None,
        principal_image: None,
        image: None,
        rehearsal_location: None,
        created_on: Utc::now().date_naive(),
        status: ModerationStatus::Pending,
    }
}

fn band_conflict(tables: &Tables, name: &str, representative_id: &Uuid) -> bool {
    tables
        .bands
        .iter()
        .any(|b| b.name == name || b.representative_id.as_ref() == Some(representative_id))
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut tables = self.lock();
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(AppError::AlreadyExists("Resource already exists".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
            bio: user.bio,
            locality: user.locality,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.username == username).cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users = self.lock().users.clone();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn update_role(&self, id: &Uuid, role: Role) -> AppResult<User> {
        let mut tables = self.lock();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or_else(|| AppError::NotFound("Resource not found".to_string()))?;
        user.role = role;
        Ok(user.clone())
    }
}

#[async_trait]
impl BandRepository for MemoryStore {
    async fn create(&self, name: &str, representative_id: &Uuid) -> AppResult<Band> {
        let mut tables = self.lock();
        if band_conflict(&tables, name, representative_id) {
            return Err(AppError::AlreadyExists("Resource already exists".to_string()));
        }

        let band = new_band(name, representative_id);
        tables.bands.push(band.clone());
        Ok(band)
    }

    async fn insert_for_representative(
        &self,
        name: &str,
        representative_id: &Uuid,
    ) -> AppResult<Option<Band>> {
        let mut tables = self.lock();
        if !band_conflict(&tables, name, representative_id) {
            tables.bands.push(new_band(name, representative_id));
        }

        Ok(tables
            .bands
            .iter()
            .find(|b| b.representative_id.as_ref() == Some(representative_id))
            .cloned())
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Band>> {
        Ok(self.lock().bands.iter().find(|b| b.id == *id).cloned())
    }

    async fn find_by_representative(&self, representative_id: &Uuid) -> AppResult<Option<Band>> {
        Ok(self
            .lock()
            .bands
            .iter()
            .find(|b| b.representative_id.as_ref() == Some(representative_id))
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<Band>> {
        let mut bands = self.lock().bands.clone();
        bands.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(bands)
    }

    async fn update_general(&self, id: &Uuid, changes: &BandChanges) -> AppResult<Band> {
        let mut tables = self.lock();
        if tables
            .bands
            .iter()
            .any(|b| b.id != *id && b.name == changes.name)
        {
            return Err(AppError::AlreadyExists("Resource already exists".to_string()));
        }

        let band = update_band(&mut tables, id, |band| {
            band.name = changes.name.clone();
            band.rehearsal_location = changes.rehearsal_location.clone();
        })?;

        let known: Vec<Uuid> = tables
            .styles
            .iter()
            .filter(|s| changes.style_ids.contains(&s.id))
            .map(|s| s.id)
            .collect();
        tables.band_styles.retain(|(band_id, _)| band_id != id);
        tables
            .band_styles
            .extend(known.into_iter().map(|style_id| (*id, style_id)));

        Ok(band)
    }

    async fn update_biography(&self, id: &Uuid, biography: &str) -> AppResult<Band> {
        update_band(&mut self.lock(), id, |band| {
            band.biography = biography.to_string()
        })
    }

    async fn set_media(&self, id: &Uuid, slot: BandMediaSlot, path: &str) -> AppResult<Band> {
        update_band(&mut self.lock(), id, |band| {
            let value = Some(path.to_string());
            match slot {
                BandMediaSlot::Demo => band.demo = value,
                BandMediaSlot::PrincipalImage => band.principal_image = value,
                BandMediaSlot::Image => band.image = value,
            }
        })
    }

    async fn delete(&self, id: &Uuid) -> AppResult<()> {
        let mut tables = self.lock();
        tables.bands.retain(|b| b.id != *id);
        tables.band_styles.retain(|(band_id, _)| band_id != id);
        tables.members.retain(|m| m.band_id != *id);
        tables.images.retain(|i| i.band_id != *id);
        tables.flyers.retain(|f| f.band_id != *id);
        Ok(())
    }

    async fn list_styles(&self) -> AppResult<Vec<MusicalStyle>> {
        let mut styles = self.lock().styles.clone();
        styles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(styles)
    }

    async fn styles_for_band(&self, band_id: &Uuid) -> AppResult<Vec<MusicalStyle>> {
        let tables = self.lock();
        let mut styles: Vec<MusicalStyle> = tables
            .styles
            .iter()
            .filter(|s| tables.band_styles.contains(&(*band_id, s.id)))
            .cloned()
            .collect();
        styles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(styles)
    }

    async fn add_member(&self, member: NewMember) -> AppResult<Member> {
        let mut tables = self.lock();
        if !tables.bands.iter().any(|b| b.id == member.band_id) {
            return Err(AppError::NotFound("Resource not found".to_string()));
        }
        if tables
            .members
            .iter()
            .any(|m| m.band_id == member.band_id && m.role == member.role)
        {
            return Err(AppError::AlreadyExists("Resource already exists".to_string()));
        }

        let member = Member {
            id: Uuid::new_v4(),
            band_id: member.band_id,
            role: member.role,
            favorite_instruments: member.favorite_instruments,
            joined_on: member.joined_on,
            preferred_genre: member.preferred_genre,
            personal_description: member.personal_description,
            social_networks: Json(member.social_networks),
            photo: member.photo,
        };
        tables.members.push(member.clone());
        Ok(member)
    }

    async fn list_members(&self, band_id: &Uuid) -> AppResult<Vec<Member>> {
        Ok(self
            .lock()
            .members
            .iter()
            .filter(|m| m.band_id == *band_id)
            .cloned()
            .collect())
    }

    async fn add_images(&self, band_id: &Uuid, paths: &[String]) -> AppResult<Vec<BandImage>> {
        let mut tables = self.lock();
        if !tables.bands.iter().any(|b| b.id == *band_id) {
            return Err(AppError::NotFound("Resource not found".to_string()));
        }

        let images: Vec<BandImage> = paths
            .iter()
            .map(|path| BandImage {
                id: Uuid::new_v4(),
                band_id: *band_id,
                image: path.clone(),
                uploaded_at: Utc::now(),
            })
            .collect();
        tables.images.extend(images.iter().cloned());
        Ok(images)
    }

    async fn list_images(&self, band_id: &Uuid) -> AppResult<Vec<BandImage>> {
        Ok(self
            .lock()
            .images
            .iter()
            .filter(|i| i.band_id == *band_id)
            .cloned()
            .collect())
    }

    async fn find_image(&self, id: &Uuid) -> AppResult<Option<BandImage>> {
        Ok(self.lock().images.iter().find(|i| i.id == *id).cloned())
    }

    async fn delete_image(&self, id: &Uuid) -> AppResult<()> {
        self.lock().images.retain(|i| i.id != *id);
        Ok(())
    }

    async fn add_flyer(
        &self,
        band_id: &Uuid,
        path: &str,
        description: Option<String>,
    ) -> AppResult<Flyer> {
        let mut tables = self.lock();
        if !tables.bands.iter().any(|b| b.id == *band_id) {
            return Err(AppError::NotFound("Resource not found".to_string()));
        }

        let flyer = Flyer {
            id: Uuid::new_v4(),
            band_id: *band_id,
            image: path.to_string(),
            description,
            uploaded_at: Utc::now(),
        };
        tables.flyers.push(flyer.clone());
        Ok(flyer)
    }

    async fn list_flyers(&self, band_id: &Uuid) -> AppResult<Vec<Flyer>> {
        Ok(self
            .lock()
            .flyers
            .iter()
            .filter(|f| f.band_id == *band_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn create(&self, event: NewEvent) -> AppResult<Event> {
        let event = Event {
            id: Uuid::new_v4(),
            title: event.title,
            starts_at: event.starts_at,
            location: event.location,
            description: event.description,
            organizer_id: event.organizer_id,
            created_at: Utc::now(),
        };
        self.lock().events.push(event.clone());
        Ok(event)
    }

    async fn list(&self) -> AppResult<Vec<Event>> {
        let mut events = self.lock().events.clone();
        events.sort_by_key(|e| e.starts_at);
        Ok(events)
    }
}
