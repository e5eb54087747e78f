//! Band view models handed to templates

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use crate::{
    constants::{PLACEHOLDER_IMAGE_NAME, STATIC_URL},
    models::{Band, BandImage, Flyer, Member, MusicalStyle},
    services::band_service::BandDetail,
    storage::media_url,
};

/// Band as shown in lists and page headers
#[derive(Debug, Serialize)]
pub struct BandSummary {
    pub id: Uuid,
    pub name: String,
    pub cover_url: String,
    pub rehearsal_location: Option<String>,
    pub status: String,
    pub status_label: String,
    pub created_on: String,
    pub has_demo: bool,
}

impl From<&Band> for BandSummary {
    fn from(band: &Band) -> Self {
        Self {
            id: band.id,
            name: band.name.clone(),
            cover_url: band
                .cover_url()
                .unwrap_or_else(|| format!("{}/images/{}", STATIC_URL, PLACEHOLDER_IMAGE_NAME)),
            rehearsal_location: band.rehearsal_location.clone(),
            status: band.status.as_str().to_string(),
            status_label: band.status.label().to_string(),
            created_on: band.created_on.format("%d/%m/%Y").to_string(),
            has_demo: band.demo.is_some(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberView {
    pub id: Uuid,
    pub role: String,
    pub favorite_instruments: String,
    pub joined_on: String,
    pub preferred_genre: Option<String>,
    pub personal_description: Option<String>,
    pub social_networks: BTreeMap<String, String>,
    pub photo_url: Option<String>,
}

impl From<&Member> for MemberView {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            role: member.role.clone(),
            favorite_instruments: member.favorite_instruments.clone(),
            joined_on: member.joined_on.format("%d/%m/%Y").to_string(),
            preferred_genre: member.preferred_genre.clone(),
            personal_description: member.personal_description.clone(),
            social_networks: member.social_networks.0.clone(),
            photo_url: member.photo.as_deref().map(media_url),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImageView {
    pub id: Uuid,
    pub url: String,
}

impl From<&BandImage> for ImageView {
    fn from(image: &BandImage) -> Self {
        Self {
            id: image.id,
            url: media_url(&image.image),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FlyerView {
    pub id: Uuid,
    pub url: String,
    pub description: Option<String>,
}

impl From<&Flyer> for FlyerView {
    fn from(flyer: &Flyer) -> Self {
        Self {
            id: flyer.id,
            url: media_url(&flyer.image),
            description: flyer.description.clone(),
        }
    }
}

/// Musical style checkbox on the edit form
#[derive(Debug, Serialize)]
pub struct StyleOption {
    pub id: Uuid,
    pub name: String,
    pub selected: bool,
}

impl StyleOption {
    pub fn list(all: &[MusicalStyle], selected: &[MusicalStyle]) -> Vec<Self> {
        all.iter()
            .map(|style| Self {
                id: style.id,
                name: style.name.clone(),
                selected: selected.iter().any(|s| s.id == style.id),
            })
            .collect()
    }
}

/// Everything shown on a band page
#[derive(Debug, Serialize)]
pub struct BandPage {
    pub band: BandSummary,
    pub biography: String,
    pub styles: Vec<String>,
    pub members: Vec<MemberView>,
    pub images: Vec<ImageView>,
    pub flyers: Vec<FlyerView>,
}

impl From<&BandDetail> for BandPage {
    fn from(detail: &BandDetail) -> Self {
        Self {
            band: BandSummary::from(&detail.band),
            biography: detail.band.biography.clone(),
            styles: detail.styles.iter().map(|s| s.name.clone()).collect(),
            members: detail.members.iter().map(MemberView::from).collect(),
            images: detail.images.iter().map(ImageView::from).collect(),
            flyers: detail.flyers.iter().map(FlyerView::from).collect(),
        }
    }
}

/// MIME type served for a demo file, from its extension
pub fn audio_content_type(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        Some("flac") => "audio/flac",
        _ => "application/octet-stream",
    }
}
