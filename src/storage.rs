//! Media storage on the local filesystem.
//!
//! Every uploaded file lives under the media root at a relative path built by
//! [`band_media_path`]:
//!
//! ```text
//! {media_root}/
//!   bandas/
//!     {band_id}/
//!       demos/
//!       imagenes/representativa/
//!       imagenes_de_la_banda/
//!       imagenes_de_integrantes/
//!       flyers/
//! ```
//!
//! Paths are keyed on the band id so renaming a band never orphans files.

use std::path::{Component, Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::constants::{BANDS_MEDIA_DIR, MEDIA_URL};
use crate::utils::stored_file_name;

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),

    /// Relative path escapes the media root or is empty
    #[error("Invalid media path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(std::io::Error),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound(e.to_string())
        } else {
            StorageError::Io(e)
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Relative directory holding all files of one band
pub fn band_media_dir(band_id: &Uuid) -> String {
    format!("{}/{}", BANDS_MEDIA_DIR, band_id)
}

/// Relative path for a new upload of `original_name` in one of a band's subdirectories
pub fn band_media_path(band_id: &Uuid, subdir: &str, original_name: &str) -> String {
    format!(
        "{}/{}/{}",
        band_media_dir(band_id),
        subdir,
        stored_file_name(original_name)
    )
}

/// Public URL of a stored media path
pub fn media_url(relative: &str) -> String {
    format!("{}/{}", MEDIA_URL, relative)
}

/// Local filesystem media storage.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    /// Create a new storage rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Media root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative media path, refusing anything outside the root
    fn resolve(&self, relative: &str) -> StorageResult<PathBuf> {
        let path = Path::new(relative);
        let is_safe = !relative.is_empty()
            && path
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !is_safe {
            return Err(StorageError::InvalidPath(relative.to_string()));
        }

        Ok(self.root.join(path))
    }

    /// Write a file, creating parent directories as needed
    pub async fn save(&self, relative: &str, data: &[u8]) -> StorageResult<()> {
        let path = self.resolve(relative)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, data).await?;

        tracing::debug!(path = %relative, bytes = data.len(), "Stored media file");
        Ok(())
    }

    /// Read a whole file
    pub async fn read(&self, relative: &str) -> StorageResult<Vec<u8>> {
        let path = self.resolve(relative)?;
        fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(relative.to_string())
            } else {
                StorageError::Io(e)
            }
        })
    }

    /// Check whether a file exists
    #[cfg(test)]
    pub async fn exists(&self, relative: &str) -> StorageResult<bool> {
        let path = self.resolve(relative)?;
        Ok(fs::try_exists(&path).await?)
    }

    /// Delete a file. Missing files are not an error.
    pub async fn delete(&self, relative: &str) -> StorageResult<()> {
        let path = self.resolve(relative)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    /// Delete a directory and everything below it. Missing directories are not an error.
    pub async fn delete_dir(&self, relative: &str) -> StorageResult<()> {
        let path = self.resolve(relative)?;
        match fs::remove_dir_all(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}
