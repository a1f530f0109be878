use std::fmt::Debug;

use async_trait::async_trait;
use model::domain::pledge::{Pledge, ValidatedPledge};
use model::ArtworkId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    ReqwestMiddleware(#[from] reqwest_middleware::Error),
    #[error("The request failed with error code: {0}")]
    RequestStatus(reqwest::StatusCode),
    #[error(transparent)]
    Body(#[from] helper::reqwest_helper::Error),
    #[error("The store returned a malformed pledge: {0}")]
    MalformedRow(#[from] model::dto::pledge::Error),
    #[error("The store did not return the pledge it inserted")]
    MissingInsertedRow,
    #[error("Read {read} of the {total} pledges the store holds")]
    IncompleteRead { read: u64, total: u64 },
}

/// Append-only storage of the pledges, owned by an external service.
#[async_trait]
pub trait PledgeStore: Debug + Sync + Send {
    /// Append a pledge. The store assigns its id and creation time.
    async fn insert(
        &self,
        artwork_id: &ArtworkId,
        pledge: &ValidatedPledge,
    ) -> Result<Pledge, Error>;

    /// All the pledges of an artwork, oldest first.
    async fn query_by_artwork(
        &self,
        artwork_id: &ArtworkId,
    ) -> Result<Vec<Pledge>, Error>;
}

#[cfg(not(feature = "offline"))]
mod pledge_store_supabase;
#[cfg(not(feature = "offline"))]
pub use pledge_store_supabase::*;

#[cfg(any(test, feature = "offline"))]
mod pledge_store_offline;
#[cfg(any(test, feature = "offline"))]
pub use pledge_store_offline::*;
