//! Database repositories
//!
//! Repositories handle all direct database interactions. Each one is a trait
//! so services can run against PostgreSQL in production and against
//! in-memory or mocked stores in tests.

pub mod band_repo;
pub mod event_repo;
pub mod user_repo;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Band, BandChanges, BandImage, Event, Flyer, Member, MusicalStyle, NewEvent, NewMember,
        NewUser, Role, User,
    },
};

pub use band_repo::PgBandRepository;
pub use event_repo::PgEventRepository;
pub use user_repo::PgUserRepository;

/// Single-file media columns of a band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandMediaSlot {
    Demo,
    PrincipalImage,
    Image,
}

impl BandMediaSlot {
    /// Column backing this slot
    pub fn column(&self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::PrincipalImage => "principal_image",
            Self::Image => "image",
        }
    }
}

/// User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; duplicate usernames fail with `AlreadyExists`
    async fn create(&self, user: NewUser) -> AppResult<User>;

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// All users ordered by username
    async fn list(&self) -> AppResult<Vec<User>>;

    async fn update_role(&self, id: &Uuid, role: Role) -> AppResult<User>;
}

/// Band aggregate persistence: bands, styles, members, gallery and flyers
#[async_trait]
pub trait BandRepository: Send + Sync {
    /// Insert a band owned by `representative_id`
    async fn create(&self, name: &str, representative_id: &Uuid) -> AppResult<Band>;

    /// Insert a band for the representative unless one already exists, then
    /// return the representative's band. `None` means the insert lost to a
    /// name conflict and the representative still has no band.
    async fn insert_for_representative(
        &self,
        name: &str,
        representative_id: &Uuid,
    ) -> AppResult<Option<Band>>;

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Band>>;

    async fn find_by_representative(&self, representative_id: &Uuid) -> AppResult<Option<Band>>;

    /// All bands ordered by name
    async fn list(&self) -> AppResult<Vec<Band>>;

    /// Replace name, rehearsal location and style links
    async fn update_general(&self, id: &Uuid, changes: &BandChanges) -> AppResult<Band>;

    async fn update_biography(&self, id: &Uuid, biography: &str) -> AppResult<Band>;

    async fn set_media(&self, id: &Uuid, slot: BandMediaSlot, path: &str) -> AppResult<Band>;

    /// Delete a band; members, gallery images, flyers and style links go with it
    async fn delete(&self, id: &Uuid) -> AppResult<()>;

    async fn list_styles(&self) -> AppResult<Vec<MusicalStyle>>;

    async fn styles_for_band(&self, band_id: &Uuid) -> AppResult<Vec<MusicalStyle>>;

    /// Insert a member; a duplicate `(band, role)` fails with `AlreadyExists`
    async fn add_member(&self, member: NewMember) -> AppResult<Member>;

    async fn list_members(&self, band_id: &Uuid) -> AppResult<Vec<Member>>;

    /// Insert all gallery images or none
    async fn add_images(&self, band_id: &Uuid, paths: &[String]) -> AppResult<Vec<BandImage>>;

    async fn list_images(&self, band_id: &Uuid) -> AppResult<Vec<BandImage>>;

    async fn find_image(&self, id: &Uuid) -> AppResult<Option<BandImage>>;

    async fn delete_image(&self, id: &Uuid) -> AppResult<()>;

    async fn add_flyer(
        &self,
        band_id: &Uuid,
        path: &str,
        description: Option<String>,
    ) -> AppResult<Flyer>;

    async fn list_flyers(&self, band_id: &Uuid) -> AppResult<Vec<Flyer>>;
}

/// Event persistence
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: NewEvent) -> AppResult<Event>;

    /// All events ordered by start time
    async fn list(&self) -> AppResult<Vec<Event>>;
}
