use std::sync::Arc;

use model::domain::artwork::Artwork;
use model::domain::currency::CurrencyLocale;
use model::domain::history::{DisplayRow, HistoryOrder, Privacy};
use model::view::artwork::RegisterArtwork;
use model::ArtworkId;

use super::ControllerError;
use crate::repository::catalog::ArtworkCatalog;
use crate::service::ledger::LedgerReader;

/// Add an artwork to the catalog or replace its listing.
pub fn register_artwork(
    payload: RegisterArtwork,
    catalog: &Arc<dyn ArtworkCatalog>,
) -> Result<Artwork, ControllerError> {
    trace!("register artwork: {:?}", payload);
    let artwork = Artwork::try_from(payload)?;
    if catalog.upsert(artwork.clone()).is_some() {
        info!("Artwork {} has been replaced", artwork.id);
    } else {
        info!("Artwork {} has been added", artwork.id);
    }
    Ok(artwork)
}

/// The artwork no longer accepts pledges.
pub fn close_artwork(
    id: &ArtworkId,
    catalog: &Arc<dyn ArtworkCatalog>,
) -> Result<Artwork, ControllerError> {
    trace!("close artwork {}", id);
    let artwork = catalog.close(id)?;
    info!("Artwork {} is now closed", artwork.id);
    Ok(artwork)
}

/// Latest pledges first, with the full names of the donors.
pub async fn get_pledges(
    id: &ArtworkId,
    catalog: &Arc<dyn ArtworkCatalog>,
    ledger: &Arc<dyn LedgerReader>,
    locale: CurrencyLocale,
) -> Result<Vec<DisplayRow>, ControllerError> {
    super::artwork::get_history(
        id,
        HistoryOrder::TimeDesc,
        Privacy::Full,
        catalog,
        ledger,
        locale,
    )
    .await
}
