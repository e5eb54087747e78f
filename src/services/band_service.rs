//! Band service
//!
//! Every mutating operation on a band goes through [`BandService::owned_band`],
//! so only the band's representative can change it.

use std::collections::BTreeMap;

use axum::body::Bytes;
use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    constants::{
        media_dirs, AUDIO_EXTENSIONS, IMAGE_EXTENSIONS, MAX_BAND_NAME_LENGTH,
        MAX_IMAGES_PER_UPLOAD, PLACEHOLDER_IMAGE, PLACEHOLDER_IMAGE_NAME, TOO_MANY_IMAGES_MESSAGE,
    },
    db::repositories::{BandMediaSlot, BandRepository},
    error::{AppError, AppResult},
    middleware::AuthenticatedUser,
    models::{Band, BandChanges, BandImage, Flyer, HasRole, Member, MusicalStyle, NewMember},
    storage::{band_media_dir, band_media_path, MediaStorage},
};

const REPRESENTATIVE_BAND_PREFIX: &str = "Banda de ";

/// Username characters kept in a default band name so that
/// `"Banda de {username} (xxxxxxxx)"` stays within the name column
const MAX_DEFAULT_NAME_USERNAME: usize =
    MAX_BAND_NAME_LENGTH as usize - REPRESENTATIVE_BAND_PREFIX.len() - " (xxxxxxxx)".len();

/// A file received in a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Bytes,
}

impl UploadedFile {
    /// Lowercased extension of the client file name
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    fn ensure_extension(&self, allowed: &[&str], message: &str) -> AppResult<()> {
        match self.extension() {
            Some(ext) if allowed.contains(&ext.as_str()) => Ok(()),
            _ => Err(AppError::Validation(message.to_string())),
        }
    }
}

/// Member form after validation
#[derive(Debug, Clone)]
pub struct MemberInput {
    pub role: String,
    pub favorite_instruments: String,
    pub joined_on: NaiveDate,
    pub preferred_genre: Option<String>,
    pub personal_description: Option<String>,
    pub social_networks: BTreeMap<String, String>,
    pub photo: Option<UploadedFile>,
}

/// Everything shown on a band's public page
#[derive(Debug, Clone)]
pub struct BandDetail {
    pub band: Band,
    pub styles: Vec<MusicalStyle>,
    pub members: Vec<Member>,
    pub images: Vec<BandImage>,
    pub flyers: Vec<Flyer>,
}

/// Demo file ready to be sent to the client
#[derive(Debug)]
pub struct DemoDownload {
    pub file_name: String,
    pub data: Vec<u8>,
}

const INVALID_IMAGE_MESSAGE: &str = "El archivo debe ser una imagen (jpg, png, gif, webp o svg).";
const INVALID_AUDIO_MESSAGE: &str = "El demo debe ser un archivo de audio (mp3, wav, ogg, m4a o flac).";

/// Band service for business logic
pub struct BandService;

impl BandService {
    /// All bands ordered by name
    pub async fn list_bands(bands: &dyn BandRepository) -> AppResult<Vec<Band>> {
        bands.list().await
    }

    /// Load a band or fail with `NotFound`
    pub async fn get_band(bands: &dyn BandRepository, band_id: &Uuid) -> AppResult<Band> {
        bands
            .find_by_id(band_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Banda".to_string()))
    }

    /// Load a band the user owns; anyone else gets `Forbidden`
    pub async fn owned_band(
        bands: &dyn BandRepository,
        band_id: &Uuid,
        user: &AuthenticatedUser,
    ) -> AppResult<Band> {
        let band = Self::get_band(bands, band_id).await?;

        if !band.is_owned_by(&user.id) {
            warn!(band_id = %band.id, user_id = %user.id, "Rejected change to a band owned by someone else");
            return Err(AppError::Forbidden(
                "No tienes permiso para modificar esta banda.".to_string(),
            ));
        }

        Ok(band)
    }

    /// Band page with styles, roster, gallery and flyers
    pub async fn band_detail(bands: &dyn BandRepository, band_id: &Uuid) -> AppResult<BandDetail> {
        let band = Self::get_band(bands, band_id).await?;

        Ok(BandDetail {
            styles: bands.styles_for_band(&band.id).await?,
            members: bands.list_members(&band.id).await?,
            images: bands.list_images(&band.id).await?,
            flyers: bands.list_flyers(&band.id).await?,
            band,
        })
    }

    /// Create a band for a representative who has none yet
    pub async fn create_band(
        bands: &dyn BandRepository,
        media: &MediaStorage,
        user: &AuthenticatedUser,
        name: &str,
    ) -> AppResult<Band> {
        if !user.is_representative() {
            return Err(AppError::Validation(
                "Solo los representantes pueden registrar una banda.".to_string(),
            ));
        }

        if name.chars().count() as u64 > MAX_BAND_NAME_LENGTH {
            return Err(AppError::Validation(
                "El nombre debe tener entre 1 y 100 caracteres.".to_string(),
            ));
        }

        if bands.find_by_representative(&user.id).await?.is_some() {
            return Err(AppError::Validation("Ya tienes una banda registrada.".to_string()));
        }

        let band = bands
            .create(name, &user.id)
            .await
            .map_err(Self::name_conflict)?;

        let placeholder = format!(
            "{}/{}/{}",
            band_media_dir(&band.id),
            media_dirs::GALLERY,
            PLACEHOLDER_IMAGE_NAME
        );
        if let Err(e) = media.save(&placeholder, PLACEHOLDER_IMAGE).await {
            warn!(band_id = %band.id, error = %e, "Placeholder image could not be stored, removing band");
            bands.delete(&band.id).await?;
            return Err(e.into());
        }
        let band = bands
            .set_media(&band.id, BandMediaSlot::Image, &placeholder)
            .await?;

        info!(band_id = %band.id, name = %band.name, representative = %user.username, "Band created");
        Ok(band)
    }

    /// Band of a representative, created on first visit.
    ///
    /// The default name is derived from the username; if another band already
    /// took it, a short suffix from the user id is appended.
    pub async fn representative_band(
        bands: &dyn BandRepository,
        user: &AuthenticatedUser,
    ) -> AppResult<Band> {
        if let Some(band) = bands.find_by_representative(&user.id).await? {
            return Ok(band);
        }

        let username: String = user.username.chars().take(MAX_DEFAULT_NAME_USERNAME).collect();
        let base_name = format!("{}{}", REPRESENTATIVE_BAND_PREFIX, username);
        let suffixed_name = format!("{} ({})", base_name, &user.id.simple().to_string()[..8]);

        for name in [base_name, suffixed_name] {
            if let Some(band) = bands.insert_for_representative(&name, &user.id).await? {
                info!(band_id = %band.id, representative = %user.username, "Band created for representative");
                return Ok(band);
            }
        }

        Err(AppError::AlreadyExists(
            "No se pudo crear la banda del representante.".to_string(),
        ))
    }

    /// Update name, rehearsal location and styles
    pub async fn update_general(
        bands: &dyn BandRepository,
        band_id: &Uuid,
        user: &AuthenticatedUser,
        changes: BandChanges,
    ) -> AppResult<Band> {
        let band = Self::owned_band(bands, band_id, user).await?;

        bands
            .update_general(&band.id, &changes)
            .await
            .map_err(Self::name_conflict)
    }

    pub async fn update_biography(
        bands: &dyn BandRepository,
        band_id: &Uuid,
        user: &AuthenticatedUser,
        biography: &str,
    ) -> AppResult<Band> {
        let band = Self::owned_band(bands, band_id, user).await?;
        bands.update_biography(&band.id, biography).await
    }

    /// Add a member to the roster; a role already taken in the band is rejected
    pub async fn add_member(
        bands: &dyn BandRepository,
        media: &MediaStorage,
        band_id: &Uuid,
        user: &AuthenticatedUser,
        input: MemberInput,
    ) -> AppResult<Member> {
        let band = Self::owned_band(bands, band_id, user).await?;

        let role_taken = bands
            .list_members(&band.id)
            .await?
            .iter()
            .any(|member| member.role == input.role);
        if role_taken {
            return Err(Self::duplicate_role());
        }

        let photo = match &input.photo {
            Some(file) => {
                file.ensure_extension(IMAGE_EXTENSIONS, INVALID_IMAGE_MESSAGE)?;
                let path = band_media_path(&band.id, media_dirs::MEMBERS, &file.file_name);
                media.save(&path, &file.data).await?;
                Some(path)
            }
            None => None,
        };

        let result = bands
            .add_member(NewMember {
                band_id: band.id,
                role: input.role,
                favorite_instruments: input.favorite_instruments,
                joined_on: input.joined_on,
                preferred_genre: input.preferred_genre,
                personal_description: input.personal_description,
                social_networks: input.social_networks,
                photo: photo.clone(),
            })
            .await;

        match result {
            Ok(member) => Ok(member),
            Err(e) => {
                if let Some(path) = photo {
                    Self::discard(media, &path).await;
                }
                match e {
                    AppError::AlreadyExists(_) => Err(Self::duplicate_role()),
                    other => Err(other),
                }
            }
        }
    }

    /// Add gallery images; more than five files in one request are rejected
    /// before anything is written
    pub async fn upload_images(
        bands: &dyn BandRepository,
        media: &MediaStorage,
        band_id: &Uuid,
        user: &AuthenticatedUser,
        files: Vec<UploadedFile>,
    ) -> AppResult<Vec<BandImage>> {
        let band = Self::owned_band(bands, band_id, user).await?;

        if files.len() > MAX_IMAGES_PER_UPLOAD {
            return Err(AppError::Validation(TOO_MANY_IMAGES_MESSAGE.to_string()));
        }
        if files.is_empty() {
            return Err(AppError::Validation(
                "Selecciona al menos una imagen.".to_string(),
            ));
        }
        for file in &files {
            file.ensure_extension(IMAGE_EXTENSIONS, INVALID_IMAGE_MESSAGE)?;
        }

        let mut saved = Vec::with_capacity(files.len());
        for file in &files {
            let path = band_media_path(&band.id, media_dirs::GALLERY, &file.file_name);
            if let Err(e) = media.save(&path, &file.data).await {
                Self::discard_all(media, &saved).await;
                return Err(e.into());
            }
            saved.push(path);
        }

        match bands.add_images(&band.id, &saved).await {
            Ok(images) => {
                info!(band_id = %band.id, count = images.len(), "Gallery images uploaded");
                Ok(images)
            }
            Err(e) => {
                Self::discard_all(media, &saved).await;
                Err(e)
            }
        }
    }

    /// Remove one gallery image (row and file); returns the band id
    pub async fn delete_image(
        bands: &dyn BandRepository,
        media: &MediaStorage,
        image_id: &Uuid,
        user: &AuthenticatedUser,
    ) -> AppResult<Uuid> {
        let image = bands
            .find_image(image_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Imagen".to_string()))?;
        let band = Self::owned_band(bands, &image.band_id, user).await?;

        bands.delete_image(&image.id).await?;
        Self::discard(media, &image.image).await;

        Ok(band.id)
    }

    /// Replace the band's demo
    pub async fn upload_demo(
        bands: &dyn BandRepository,
        media: &MediaStorage,
        band_id: &Uuid,
        user: &AuthenticatedUser,
        file: UploadedFile,
    ) -> AppResult<Band> {
        file.ensure_extension(AUDIO_EXTENSIONS, INVALID_AUDIO_MESSAGE)?;
        Self::replace_single_file(bands, media, band_id, user, file, BandMediaSlot::Demo).await
    }

    /// Replace the band's principal image
    pub async fn upload_principal_image(
        bands: &dyn BandRepository,
        media: &MediaStorage,
        band_id: &Uuid,
        user: &AuthenticatedUser,
        file: UploadedFile,
    ) -> AppResult<Band> {
        file.ensure_extension(IMAGE_EXTENSIONS, INVALID_IMAGE_MESSAGE)?;
        Self::replace_single_file(
            bands,
            media,
            band_id,
            user,
            file,
            BandMediaSlot::PrincipalImage,
        )
        .await
    }

    pub async fn upload_flyer(
        bands: &dyn BandRepository,
        media: &MediaStorage,
        band_id: &Uuid,
        user: &AuthenticatedUser,
        file: UploadedFile,
        description: Option<String>,
    ) -> AppResult<Flyer> {
        let band = Self::owned_band(bands, band_id, user).await?;
        file.ensure_extension(IMAGE_EXTENSIONS, INVALID_IMAGE_MESSAGE)?;

        let path = band_media_path(&band.id, media_dirs::FLYERS, &file.file_name);
        media.save(&path, &file.data).await?;

        match bands.add_flyer(&band.id, &path, description).await {
            Ok(flyer) => Ok(flyer),
            Err(e) => {
                Self::discard(media, &path).await;
                Err(e)
            }
        }
    }

    /// Delete a band with everything attached to it, files included
    pub async fn delete_band(
        bands: &dyn BandRepository,
        media: &MediaStorage,
        band_id: &Uuid,
        user: &AuthenticatedUser,
    ) -> AppResult<()> {
        let band = Self::owned_band(bands, band_id, user).await?;

        bands.delete(&band.id).await?;

        if let Err(e) = media.delete_dir(&band_media_dir(&band.id)).await {
            warn!(band_id = %band.id, error = %e, "Failed to remove band media directory");
        }

        info!(band_id = %band.id, name = %band.name, "Band deleted");
        Ok(())
    }

    /// Demo file of a band for download
    pub async fn demo_download(
        bands: &dyn BandRepository,
        media: &MediaStorage,
        band_id: &Uuid,
    ) -> AppResult<DemoDownload> {
        let band = Self::get_band(bands, band_id).await?;

        let (path, file_name) = match (band.demo.as_deref(), band.demo_file_name()) {
            (Some(path), Some(name)) => (path, name.to_string()),
            _ => return Err(AppError::NotFound("Demo".to_string())),
        };

        let data = media.read(path).await?;
        Ok(DemoDownload { file_name, data })
    }

    async fn replace_single_file(
        bands: &dyn BandRepository,
        media: &MediaStorage,
        band_id: &Uuid,
        user: &AuthenticatedUser,
        file: UploadedFile,
        slot: BandMediaSlot,
    ) -> AppResult<Band> {
        let band = Self::owned_band(bands, band_id, user).await?;

        let (subdir, previous) = match slot {
            BandMediaSlot::Demo => (media_dirs::DEMOS, band.demo.clone()),
            BandMediaSlot::PrincipalImage => {
                (media_dirs::PRINCIPAL_IMAGE, band.principal_image.clone())
            }
            BandMediaSlot::Image => (media_dirs::GALLERY, band.image.clone()),
        };

        let path = band_media_path(&band.id, subdir, &file.file_name);
        media.save(&path, &file.data).await?;

        let updated = match bands.set_media(&band.id, slot, &path).await {
            Ok(updated) => updated,
            Err(e) => {
                Self::discard(media, &path).await;
                return Err(e);
            }
        };

        if let Some(previous) = previous {
            Self::discard(media, &previous).await;
        }

        info!(band_id = %band.id, column = slot.column(), "Band file replaced");
        Ok(updated)
    }

    fn name_conflict(err: AppError) -> AppError {
        match err {
            AppError::AlreadyExists(_) => {
                AppError::AlreadyExists("Ya existe una banda con ese nombre.".to_string())
            }
            other => other,
        }
    }

    fn duplicate_role() -> AppError {
        AppError::AlreadyExists("Ya existe un integrante con ese rol en la banda.".to_string())
    }

    async fn discard(media: &MediaStorage, path: &str) {
        if let Err(e) = media.delete(path).await {
            warn!(path = %path, error = %e, "Failed to remove media file");
        }
    }

    async fn discard_all(media: &MediaStorage, paths: &[String]) {
        for path in paths {
            Self::discard(media, path).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::memory::MemoryStore, models::Role};
    use tempfile::TempDir;

    struct Fixture {
        store: MemoryStore,
        media: MediaStorage,
        _dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            Self {
                store: MemoryStore::new(),
                media: MediaStorage::new(dir.path()),
                _dir: dir,
            }
        }

        fn bands(&self) -> &dyn BandRepository {
            &self.store
        }
    }

    fn user(username: &str, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            id: Uuid::new_v4(),
            username: username.to_string(),
            role,
        }
    }

    fn image(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            data: Bytes::from_static(b"\x89PNG"),
        }
    }

    fn member(role: &str) -> MemberInput {
        MemberInput {
            role: role.to_string(),
            favorite_instruments: "Guitarra".to_string(),
            joined_on: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            preferred_genre: None,
            personal_description: None,
            social_networks: BTreeMap::new(),
            photo: None,
        }
    }

    #[tokio::test]
    async fn test_create_band_attaches_placeholder() {
        let fx = Fixture::new();
        let ana = user("ana", Role::Representative);

        let band = BandService::create_band(fx.bands(), &fx.media, &ana, "Los Rockers")
            .await
            .unwrap();

        assert!(band.is_owned_by(&ana.id));
        assert_eq!(band.status, crate::models::ModerationStatus::Pending);
        let placeholder = band.image.clone().unwrap();
        assert!(placeholder.ends_with("imagenes_de_la_banda/no-image.svg"));
        assert!(fx.media.exists(&placeholder).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_band_rejects_long_name() {
        let fx = Fixture::new();
        let ana = user("ana", Role::Representative);

        let result = BandService::create_band(fx.bands(), &fx.media, &ana, &"a".repeat(101)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(fx.bands().find_by_representative(&ana.id).await.unwrap().is_none());

        let band = BandService::create_band(fx.bands(), &fx.media, &ana, &"a".repeat(100))
            .await
            .unwrap();
        assert_eq!(band.name.chars().count(), 100);
    }

    #[tokio::test]
    async fn test_create_band_removed_when_placeholder_fails() {
        let dir = TempDir::new().unwrap();
        let not_a_dir = dir.path().join("media");
        std::fs::write(&not_a_dir, b"file").unwrap();

        let store = MemoryStore::new();
        let bands: &dyn BandRepository = &store;
        let media = MediaStorage::new(&not_a_dir);
        let ana = user("ana", Role::Representative);

        let result = BandService::create_band(bands, &media, &ana, "Los Rockers").await;
        assert!(matches!(result, Err(AppError::Storage(_))));
        assert!(bands.find_by_representative(&ana.id).await.unwrap().is_none());
        assert!(bands.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_band_requires_representative() {
        let fx = Fixture::new();
        let visitor = user("vera", Role::Visitor);

        let result = BandService::create_band(fx.bands(), &fx.media, &visitor, "Nadie").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_second_band_rejected() {
        let fx = Fixture::new();
        let ana = user("ana", Role::Representative);

        BandService::create_band(fx.bands(), &fx.media, &ana, "Los Rockers")
            .await
            .unwrap();
        let result = BandService::create_band(fx.bands(), &fx.media, &ana, "Otra").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_duplicate_band_name_rejected() {
        let fx = Fixture::new();
        let ana = user("ana", Role::Representative);
        let bob = user("bob", Role::Representative);

        BandService::create_band(fx.bands(), &fx.media, &ana, "Los Rockers")
            .await
            .unwrap();
        let result = BandService::create_band(fx.bands(), &fx.media, &bob, "Los Rockers").await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_representative_band_is_created_once() {
        let fx = Fixture::new();
        let ana = user("ana", Role::Representative);

        let first = BandService::representative_band(fx.bands(), &ana).await.unwrap();
        let second = BandService::representative_band(fx.bands(), &ana).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.name, "Banda de ana");
    }

    #[tokio::test]
    async fn test_representative_band_name_fits_for_long_username() {
        let fx = Fixture::new();
        let other = user("otra", Role::Representative);
        let long = user(&"u".repeat(150), Role::Representative);

        let first = BandService::representative_band(fx.bands(), &long).await.unwrap();
        assert!(first.name.chars().count() <= 100);
        assert!(first.name.starts_with("Banda de uuu"));

        // Same username prefix, so the second band needs the suffix
        let twin = AuthenticatedUser {
            id: Uuid::new_v4(),
            ..long.clone()
        };
        fx.bands().delete(&first.id).await.unwrap();
        BandService::create_band(fx.bands(), &fx.media, &other, &first.name)
            .await
            .unwrap();
        let second = BandService::representative_band(fx.bands(), &twin).await.unwrap();
        assert!(second.name.chars().count() <= 100);
        assert!(second.name.ends_with(')'));
    }

    #[tokio::test]
    async fn test_representative_band_name_conflict_uses_suffix() {
        let fx = Fixture::new();
        let other = user("otra", Role::Representative);
        let ana = user("ana", Role::Representative);

        BandService::create_band(fx.bands(), &fx.media, &other, "Banda de ana")
            .await
            .unwrap();
        let band = BandService::representative_band(fx.bands(), &ana).await.unwrap();
        assert!(band.is_owned_by(&ana.id));
        assert!(band.name.starts_with("Banda de ana ("));
    }

    #[tokio::test]
    async fn test_non_owner_cannot_delete() {
        let fx = Fixture::new();
        let ana = user("ana", Role::Representative);
        let bob = user("bob", Role::Representative);

        let band = BandService::create_band(fx.bands(), &fx.media, &ana, "Los Rockers")
            .await
            .unwrap();
        let result = BandService::delete_band(fx.bands(), &fx.media, &band.id, &bob).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        assert!(fx.bands().find_by_id(&band.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_owner_delete_cascades() {
        let fx = Fixture::new();
        let ana = user("ana", Role::Representative);

        let band = BandService::create_band(fx.bands(), &fx.media, &ana, "Los Rockers")
            .await
            .unwrap();
        BandService::add_member(fx.bands(), &fx.media, &band.id, &ana, member("Voz"))
            .await
            .unwrap();
        BandService::upload_images(fx.bands(), &fx.media, &band.id, &ana, vec![image("a.png")])
            .await
            .unwrap();
        BandService::upload_flyer(fx.bands(), &fx.media, &band.id, &ana, image("f.png"), None)
            .await
            .unwrap();

        BandService::delete_band(fx.bands(), &fx.media, &band.id, &ana)
            .await
            .unwrap();

        assert!(fx.bands().find_by_id(&band.id).await.unwrap().is_none());
        assert_eq!(fx.store.member_count(&band.id), 0);
        assert_eq!(fx.store.image_count(&band.id), 0);
        assert_eq!(fx.store.flyer_count(&band.id), 0);
        assert!(!fx.media.root().join(band_media_dir(&band.id)).exists());
    }

    #[tokio::test]
    async fn test_duplicate_member_role_rejected() {
        let fx = Fixture::new();
        let ana = user("ana", Role::Representative);
        let band = BandService::create_band(fx.bands(), &fx.media, &ana, "Los Rockers")
            .await
            .unwrap();

        BandService::add_member(fx.bands(), &fx.media, &band.id, &ana, member("Bajo"))
            .await
            .unwrap();
        let result =
            BandService::add_member(fx.bands(), &fx.media, &band.id, &ana, member("Bajo")).await;

        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
        assert_eq!(fx.store.member_count(&band.id), 1);
    }

    #[tokio::test]
    async fn test_six_images_rejected_five_accepted() {
        let fx = Fixture::new();
        let ana = user("ana", Role::Representative);
        let band = BandService::create_band(fx.bands(), &fx.media, &ana, "Los Rockers")
            .await
            .unwrap();

        let six: Vec<UploadedFile> = (0..6).map(|i| image(&format!("foto{}.png", i))).collect();
        let result =
            BandService::upload_images(fx.bands(), &fx.media, &band.id, &ana, six).await;
        match result {
            Err(AppError::Validation(message)) => assert_eq!(message, TOO_MANY_IMAGES_MESSAGE),
            other => panic!("unexpected result: {:?}", other.map(|images| images.len())),
        }
        assert_eq!(fx.store.image_count(&band.id), 0);
        let gallery = fx
            .media
            .root()
            .join(band_media_dir(&band.id))
            .join(media_dirs::GALLERY);
        // Only the placeholder is on disk
        assert_eq!(std::fs::read_dir(&gallery).unwrap().count(), 1);

        let five: Vec<UploadedFile> = (0..5).map(|i| image(&format!("foto{}.png", i))).collect();
        let images = BandService::upload_images(fx.bands(), &fx.media, &band.id, &ana, five)
            .await
            .unwrap();
        assert_eq!(images.len(), 5);
        assert_eq!(fx.store.image_count(&band.id), 5);
    }

    #[tokio::test]
    async fn test_image_upload_rejects_non_images() {
        let fx = Fixture::new();
        let ana = user("ana", Role::Representative);
        let band = BandService::create_band(fx.bands(), &fx.media, &ana, "Los Rockers")
            .await
            .unwrap();

        let result = BandService::upload_images(
            fx.bands(),
            &fx.media,
            &band.id,
            &ana,
            vec![image("a.png"), image("script.sh")],
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(fx.store.image_count(&band.id), 0);
    }

    #[tokio::test]
    async fn test_delete_image_removes_row_and_file() {
        let fx = Fixture::new();
        let ana = user("ana", Role::Representative);
        let bob = user("bob", Role::Representative);
        let band = BandService::create_band(fx.bands(), &fx.media, &ana, "Los Rockers")
            .await
            .unwrap();
        let images =
            BandService::upload_images(fx.bands(), &fx.media, &band.id, &ana, vec![image("a.png")])
                .await
                .unwrap();
        let stored = &images[0];

        let denied = BandService::delete_image(fx.bands(), &fx.media, &stored.id, &bob).await;
        assert!(matches!(denied, Err(AppError::Forbidden(_))));

        let band_id = BandService::delete_image(fx.bands(), &fx.media, &stored.id, &ana)
            .await
            .unwrap();
        assert_eq!(band_id, band.id);
        assert_eq!(fx.store.image_count(&band.id), 0);
        assert!(!fx.media.exists(&stored.image).await.unwrap());
    }

    #[tokio::test]
    async fn test_demo_upload_and_download() {
        let fx = Fixture::new();
        let ana = user("ana", Role::Representative);
        let band = BandService::create_band(fx.bands(), &fx.media, &ana, "Los Rockers")
            .await
            .unwrap();

        let missing = BandService::demo_download(fx.bands(), &fx.media, &band.id).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let demo = UploadedFile {
            file_name: "Primer Demo.MP3".to_string(),
            data: Bytes::from_static(b"ID3"),
        };
        let updated = BandService::upload_demo(fx.bands(), &fx.media, &band.id, &ana, demo)
            .await
            .unwrap();
        assert!(updated.demo.as_deref().unwrap().ends_with("-primer-demo.mp3"));

        let download = BandService::demo_download(fx.bands(), &fx.media, &band.id)
            .await
            .unwrap();
        assert_eq!(download.data, b"ID3");
        assert!(download.file_name.ends_with("-primer-demo.mp3"));
    }

    #[tokio::test]
    async fn test_principal_image_replaces_previous_file() {
        let fx = Fixture::new();
        let ana = user("ana", Role::Representative);
        let band = BandService::create_band(fx.bands(), &fx.media, &ana, "Los Rockers")
            .await
            .unwrap();

        let first = BandService::upload_principal_image(
            fx.bands(),
            &fx.media,
            &band.id,
            &ana,
            image("portada.png"),
        )
        .await
        .unwrap();
        let first_path = first.principal_image.unwrap();

        let second = BandService::upload_principal_image(
            fx.bands(),
            &fx.media,
            &band.id,
            &ana,
            image("portada2.png"),
        )
        .await
        .unwrap();

        assert_ne!(second.principal_image.as_deref(), Some(first_path.as_str()));
        assert!(!fx.media.exists(&first_path).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_general_sets_styles() {
        let fx = Fixture::new();
        let ana = user("ana", Role::Representative);
        let band = BandService::create_band(fx.bands(), &fx.media, &ana, "Los Rockers")
            .await
            .unwrap();
        let styles = fx.bands().list_styles().await.unwrap();

        let changes = BandChanges {
            name: "Los Rockers del Sur".to_string(),
            rehearsal_location: Some("Galpón 4".to_string()),
            style_ids: vec![styles[0].id, Uuid::new_v4()],
        };
        let updated = BandService::update_general(fx.bands(), &band.id, &ana, changes)
            .await
            .unwrap();

        assert_eq!(updated.name, "Los Rockers del Sur");
        let linked = fx.bands().styles_for_band(&band.id).await.unwrap();
        assert_eq!(linked, vec![styles[0].clone()]);
    }
}
