//! Band request DTOs
//!
//! Form field names follow the Spanish labels shown on the pages.

use std::collections::HashMap;

use axum::extract::Multipart;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{
        MAX_BAND_NAME_LENGTH, MAX_FLYER_DESCRIPTION_LENGTH, MAX_INSTRUMENTS_LENGTH,
        MAX_MEMBER_ROLE_LENGTH, MAX_REHEARSAL_LOCATION_LENGTH,
    },
    error::{AppError, AppResult},
    models::BandChanges,
    services::band_service::{MemberInput, UploadedFile},
    utils::{non_blank, parse_social_networks, sanitize_string},
};

/// Create band form
#[derive(Debug, Default, Deserialize)]
pub struct CreateBandForm {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
}

impl CreateBandForm {
    /// Trimmed name, `None` when missing or blank
    pub fn name(&self) -> Option<String> {
        non_blank(self.name.as_deref())
    }
}

/// General fields of a band
#[derive(Debug, Default, Validate)]
pub struct EditBandForm {
    #[validate(length(min = 1, max = MAX_BAND_NAME_LENGTH, message = "El nombre debe tener entre 1 y 100 caracteres."))]
    pub name: String,

    #[validate(length(max = MAX_REHEARSAL_LOCATION_LENGTH, message = "El lugar de ensayo es demasiado largo."))]
    pub rehearsal_location: Option<String>,

    pub style_ids: Vec<Uuid>,
}

impl EditBandForm {
    /// Build from url-encoded pairs; `estilos` may repeat
    pub fn from_pairs(pairs: Vec<(String, String)>) -> AppResult<Self> {
        let mut form = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                "nombre" => form.name = sanitize_string(&value),
                "lugar_ensayo" => form.rehearsal_location = non_blank(Some(&value)),
                "estilos" => {
                    let id = Uuid::parse_str(value.trim())
                        .map_err(|_| AppError::Validation("Estilo musical inválido.".to_string()))?;
                    if !form.style_ids.contains(&id) {
                        form.style_ids.push(id);
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }

    pub fn into_changes(self) -> BandChanges {
        BandChanges {
            name: self.name,
            rehearsal_location: self.rehearsal_location,
            style_ids: self.style_ids,
        }
    }
}

/// Biography form
#[derive(Debug, Default, Deserialize)]
pub struct BiographyForm {
    #[serde(rename = "biografia", default)]
    pub biography: String,
}

/// Multipart form split into text fields and files.
///
/// File parts without a file name or content (an empty file input) are
/// dropped.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: Vec<(String, UploadedFile)>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let data = field.bytes().await?;
                    if file_name.is_empty() && data.is_empty() {
                        continue;
                    }
                    form.files.push((name, UploadedFile { file_name, data }));
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Every file sent under `name`
    pub fn files(&self, name: &str) -> Vec<UploadedFile> {
        self.files
            .iter()
            .filter(|(field, _)| field == name)
            .map(|(_, file)| file.clone())
            .collect()
    }

    /// First file sent under `name`
    pub fn file(&self, name: &str) -> Option<UploadedFile> {
        self.files
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, file)| file.clone())
    }
}

/// Add member form
#[derive(Debug, Validate)]
pub struct MemberForm {
    #[validate(length(min = 1, max = MAX_MEMBER_ROLE_LENGTH, message = "Indica el rol del integrante."))]
    pub role: String,

    #[validate(length(min = 1, max = MAX_INSTRUMENTS_LENGTH, message = "Indica los instrumentos favoritos."))]
    pub favorite_instruments: String,

    pub joined_on: Option<String>,

    #[validate(length(max = MAX_MEMBER_ROLE_LENGTH, message = "El género preferido es demasiado largo."))]
    pub preferred_genre: Option<String>,

    pub personal_description: Option<String>,

    pub social_networks: String,

    pub photo: Option<UploadedFile>,
}

impl MemberForm {
    pub fn from_multipart(form: &MultipartForm) -> Self {
        Self {
            role: sanitize_string(form.text("rol").unwrap_or_default()),
            favorite_instruments: sanitize_string(
                form.text("instrumentos_favoritos").unwrap_or_default(),
            ),
            joined_on: non_blank(form.text("fecha_ingreso")),
            preferred_genre: non_blank(form.text("genero_preferido")),
            personal_description: non_blank(form.text("descripcion_personal")),
            social_networks: form.text("redes_sociales").unwrap_or_default().to_string(),
            photo: form.file("foto"),
        }
    }

    /// Validate and convert into the service input
    pub fn into_input(self) -> AppResult<MemberInput> {
        self.validate()?;

        let joined_on = self
            .joined_on
            .as_deref()
            .ok_or_else(|| AppError::Validation("Indica la fecha de ingreso.".to_string()))
            .and_then(|value| {
                NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                    AppError::Validation("La fecha de ingreso no es válida.".to_string())
                })
            })?;

        let social_networks = parse_social_networks(&self.social_networks)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(MemberInput {
            role: self.role,
            favorite_instruments: self.favorite_instruments,
            joined_on,
            preferred_genre: self.preferred_genre,
            personal_description: self.personal_description,
            social_networks,
            photo: self.photo,
        })
    }
}

/// Flyer upload form
#[derive(Debug, Validate)]
pub struct FlyerForm {
    #[validate(length(max = MAX_FLYER_DESCRIPTION_LENGTH, message = "La descripción admite hasta 255 caracteres."))]
    pub description: Option<String>,
}

impl FlyerForm {
    pub fn from_multipart(form: &MultipartForm) -> Self {
        Self {
            description: non_blank(form.text("descripcion")),
        }
    }
}

/// Upload that requires exactly one file under `field`
pub fn required_file(form: &MultipartForm, field: &str) -> AppResult<UploadedFile> {
    form.file(field)
        .ok_or_else(|| AppError::Validation("Selecciona un archivo.".to_string()))
}
