//! Moderation service

use crate::{
    db::repositories::BandRepository,
    error::AppResult,
    models::{Band, ModerationStatus},
};

/// Bands sharing one moderation status
#[derive(Debug, Clone)]
pub struct StatusGroup {
    pub status: ModerationStatus,
    pub bands: Vec<Band>,
}

pub struct ModerationService;

impl ModerationService {
    /// All bands grouped by status, pending first; empty groups are kept
    pub async fn bands_by_status(bands: &dyn BandRepository) -> AppResult<Vec<StatusGroup>> {
        let all = bands.list().await?;

        Ok(ModerationStatus::ALL
            .into_iter()
            .map(|status| StatusGroup {
                status,
                bands: all.iter().filter(|b| b.status == status).cloned().collect(),
            })
            .collect())
    }
}
