use std::sync::Arc;

use async_trait::async_trait;
use model::domain::artwork::Artwork;
use model::domain::ledger::LedgerState;
use tracing::instrument;

use crate::repository::pledge_store::PledgeStore;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("The pledge store could not be read: {0}")]
    StoreRead(#[from] crate::repository::pledge_store::Error),
    #[error("The pledge store returned an inconsistent ledger: {0}")]
    Inconsistent(#[from] model::domain::ledger::Error),
}

#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Fresh snapshot of the pledges of the artwork. A failed read is an
    /// error, never an empty ledger.
    async fn get_ledger(
        &self,
        artwork: &Artwork,
    ) -> Result<LedgerState, Error>;
}

pub struct LedgerReaderImpl {
    store: Arc<dyn PledgeStore>,
}

impl LedgerReaderImpl {
    pub fn new(store: Arc<dyn PledgeStore>) -> Self { Self { store } }
}

#[async_trait]
impl LedgerReader for LedgerReaderImpl {
    #[instrument(
        level = "trace",
        skip(self, artwork),
        fields(artwork = %artwork.id)
    )]
    async fn get_ledger(
        &self,
        artwork: &Artwork,
    ) -> Result<LedgerState, Error> {
        let pledges = self.store.query_by_artwork(&artwork.id).await?;
        Ok(LedgerState::derive(artwork, pledges)?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::repository::catalog::tests::artwork;
    use crate::repository::pledge_store::{self, PledgeStoreOfflineImpl};
    use model::domain::pledge::{Pledge, ValidatedPledge};
    use model::ArtworkId;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Store whose reads and writes can be made to fail.
    #[derive(Debug, Default)]
    pub(crate) struct FlakyStore {
        pub(crate) inner:                   PledgeStoreOfflineImpl,
        pub(crate) fail_reads:              bool,
        pub(crate) fail_writes:             bool,
        /// Reads start failing once a pledge has been inserted
        pub(crate) fail_reads_after_insert: bool,
        pub(crate) inserted:                AtomicBool,
    }

    #[async_trait]
    impl PledgeStore for FlakyStore {
        async fn insert(
            &self,
            artwork_id: &ArtworkId,
            pledge: &ValidatedPledge,
        ) -> Result<Pledge, pledge_store::Error> {
            if self.fail_writes {
                return Err(pledge_store::Error::RequestStatus(
                    reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                ));
            }
            self.inserted.store(true, Ordering::SeqCst);
            self.inner.insert(artwork_id, pledge).await
        }

        async fn query_by_artwork(
            &self,
            artwork_id: &ArtworkId,
        ) -> Result<Vec<Pledge>, pledge_store::Error> {
            let after_insert = self.fail_reads_after_insert
                && self.inserted.load(Ordering::SeqCst);
            if self.fail_reads || after_insert {
                return Err(pledge_store::Error::RequestStatus(
                    reqwest::StatusCode::SERVICE_UNAVAILABLE,
                ));
            }
            self.inner.query_by_artwork(artwork_id).await
        }
    }

    pub(crate) fn validated(name: &str, amount: u64) -> ValidatedPledge {
        ValidatedPledge {
            name: name.to_string(),
            email: "donor@example.org".to_string(),
            phone: "9876543210".to_string(),
            amount,
        }
    }

    #[tokio::test]
    async fn test_empty_ledger_starts_at_starting_bid() {
        let reader = LedgerReaderImpl::new(Arc::new(FlakyStore::default()));
        let ledger = reader
            .get_ledger(&artwork("monsoon", "L001", 500))
            .await
            .unwrap();
        assert_eq!(ledger.highest_pledge, 500);
        assert_eq!(ledger.next_minimum_bid, 550);
        assert!(!ledger.has_pledges());
    }

    #[tokio::test]
    async fn test_ledger_reflects_store() {
        let store = Arc::new(FlakyStore::default());
        let monsoon = artwork("monsoon", "L001", 500);
        for (name, amount) in [("Asha Rao", 700), ("Ravi K", 650)] {
            store
                .inner
                .insert(&monsoon.id, &validated(name, amount))
                .await
                .unwrap();
        }

        let ledger =
            LedgerReaderImpl::new(store).get_ledger(&monsoon).await.unwrap();
        assert_eq!(ledger.highest_pledge, 700);
        assert_eq!(ledger.next_minimum_bid, 750);
        assert_eq!(ledger.pledges.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_read_is_not_an_empty_ledger() {
        let store = FlakyStore { fail_reads: true, ..Default::default() };
        let reader = LedgerReaderImpl::new(Arc::new(store));
        assert!(matches!(
            reader.get_ledger(&artwork("monsoon", "L001", 500)).await,
            Err(Error::StoreRead(_))
        ));
    }
}
