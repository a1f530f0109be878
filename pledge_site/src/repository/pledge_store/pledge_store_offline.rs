use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use model::domain::pledge::{Pledge, ValidatedPledge};
use model::{ArtworkId, PledgeId};

use super::{Error, PledgeStore};

/// Pledges kept in memory, lost on restart.
#[derive(Debug, Default)]
pub struct PledgeStoreOfflineImpl {
    database: DashMap<ArtworkId, Vec<Pledge>>,
}

impl PledgeStoreOfflineImpl {
    pub fn new() -> Self {
        warn!("Using offline pledge store");
        Self::default()
    }
}

#[async_trait]
impl PledgeStore for PledgeStoreOfflineImpl {
    async fn insert(
        &self,
        artwork_id: &ArtworkId,
        pledge: &ValidatedPledge,
    ) -> Result<Pledge, Error> {
        let pledge = Pledge::from_validated(
            pledge.clone(),
            artwork_id.clone(),
            PledgeId::new_random(),
            Utc::now(),
        );
        self.database
            .entry(artwork_id.clone())
            .or_default()
            .push(pledge.clone());
        Ok(pledge)
    }

    async fn query_by_artwork(
        &self,
        artwork_id: &ArtworkId,
    ) -> Result<Vec<Pledge>, Error> {
        let mut pledges = self
            .database
            .get(artwork_id)
            .map(|pledges| pledges.value().clone())
            .unwrap_or_default();
        pledges.sort_by_key(|pledge| pledge.created_at);
        Ok(pledges)
    }
}
