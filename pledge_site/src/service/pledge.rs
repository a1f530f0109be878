use std::sync::Arc;

use async_trait::async_trait;
use model::domain::artwork::Artwork;
use model::domain::ledger::LedgerState;
use model::domain::minimum_bid::compute_next_minimum;
use model::domain::pledge::Pledge;
use model::domain::validation::{validate, FieldErrors};
use model::view::pledge::PledgeSubmission;
use model::ArtworkId;
use tracing::instrument;

use crate::repository::catalog::ArtworkCatalog;
use crate::repository::pledge_store::PledgeStore;
use crate::service::ledger::LedgerReader;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Artwork {0} is not in the catalog")]
    UnknownArtwork(ArtworkId),
    #[error("The pledge was refused: {0}")]
    Invalid(#[from] FieldErrors),
    #[error("The ledger is unavailable: {0}")]
    LedgerUnavailable(#[from] crate::service::ledger::Error),
    #[error("The pledge could not be saved: {0}")]
    Persistence(#[from] crate::repository::pledge_store::Error),
}

/// A pledge that has been persisted, with the ledger read right after.
///
/// When that read fails the ledger is the one used for validation plus the
/// new pledge, and `ledger_is_stale` is set.
#[derive(Debug, Clone)]
pub struct Accepted {
    pub artwork:         Artwork,
    pub pledge:          Pledge,
    pub ledger:          LedgerState,
    pub ledger_is_stale: bool,
}

#[async_trait]
pub trait Pledging: Send + Sync {
    /// Validate a submission against a fresh ledger and append it.
    ///
    /// Nothing is written when the submission is refused. Two submissions
    /// validated against the same snapshot may both be accepted.
    async fn submit_pledge(
        &self,
        artwork_id: &ArtworkId,
        submission: &PledgeSubmission,
    ) -> Result<Accepted, Error>;
}

pub struct PledgingImpl {
    catalog: Arc<dyn ArtworkCatalog>,
    ledger:  Arc<dyn LedgerReader>,
    store:   Arc<dyn PledgeStore>,
}

impl PledgingImpl {
    pub fn new(
        catalog: Arc<dyn ArtworkCatalog>,
        ledger: Arc<dyn LedgerReader>,
        store: Arc<dyn PledgeStore>,
    ) -> Self {
        Self { catalog, ledger, store }
    }
}

#[async_trait]
impl Pledging for PledgingImpl {
    #[instrument(level = "trace", skip(self, submission))]
    async fn submit_pledge(
        &self,
        artwork_id: &ArtworkId,
        submission: &PledgeSubmission,
    ) -> Result<Accepted, Error> {
        let artwork = self
            .catalog
            .get(artwork_id)
            .ok_or_else(|| Error::UnknownArtwork(artwork_id.clone()))?;

        let ledger = self.ledger.get_ledger(&artwork).await?;
        let minimum = compute_next_minimum(&artwork, &ledger);
        let pledge = validate(
            submission,
            minimum.next_minimum_bid().unwrap_or(ledger.next_minimum_bid),
            minimum.is_closed(),
        )?;

        let pledge = self.store.insert(&artwork.id, &pledge).await?;
        debug!(
            "Pledge {} of {} saved for {}",
            pledge.id, pledge.amount, artwork.id
        );

        let (ledger, ledger_is_stale) =
            match self.ledger.get_ledger(&artwork).await {
                Ok(fresh) => (fresh, false),
                Err(err) => {
                    error!(
                        "Pledge {} is saved but the ledger could not be read \
                         back: {}",
                        pledge.id, err
                    );
                    let mut pledges = ledger.pledges;
                    pledges.push(pledge.clone());
                    let ledger = LedgerState::derive(&artwork, pledges)
                        .map_err(crate::service::ledger::Error::from)?;
                    (ledger, true)
                }
            };

        Ok(Accepted { artwork, pledge, ledger, ledger_is_stale })
    }
}
