use std::sync::Arc;

use futures::future::try_join_all;
use model::domain::currency::{self, CurrencyLocale};
use model::domain::history::{present, DisplayRow, HistoryOrder, Privacy};
use model::domain::minimum_bid::compute_next_minimum;
use model::view::artwork::{ArtworkDetail, ArtworkSummary, MinimumBidView};
use model::view::pledge::{PledgeAccepted, PledgeSubmission};
use model::ArtworkId;

use super::ControllerError;
use crate::repository::catalog::ArtworkCatalog;
use crate::service::ledger::LedgerReader;
use crate::service::pledge::{Accepted, Pledging};

/// Every artwork of the catalog with the amount a new pledge has to reach.
pub async fn list_artworks(
    catalog: &Arc<dyn ArtworkCatalog>,
    ledger: &Arc<dyn LedgerReader>,
    locale: CurrencyLocale,
) -> Result<Vec<ArtworkSummary>, ControllerError> {
    trace!("list artworks");
    let summaries = catalog.list().into_iter().map(|artwork| async move {
        let state = ledger.get_ledger(&artwork).await?;
        let minimum = compute_next_minimum(&artwork, &state);
        Ok::<_, ControllerError>(ArtworkSummary {
            minimum_bid: MinimumBidView::new(&minimum, locale),
            artwork,
        })
    });
    try_join_all(summaries).await
}

pub async fn get_artwork(
    id: &ArtworkId,
    catalog: &Arc<dyn ArtworkCatalog>,
    ledger: &Arc<dyn LedgerReader>,
    locale: CurrencyLocale,
) -> Result<ArtworkDetail, ControllerError> {
    trace!("get artwork {}", id);
    let artwork = catalog
        .get(id)
        .ok_or_else(|| ControllerError::UnknownArtwork(id.clone()))?;
    let state = ledger.get_ledger(&artwork).await?;
    let minimum = compute_next_minimum(&artwork, &state);
    let history = present(
        &state.pledges,
        HistoryOrder::AmountDesc,
        Privacy::Redacted,
        locale,
    );
    Ok(ArtworkDetail::new(artwork, &state, &minimum, history, locale))
}

/// Pledges of an artwork as shown to any visitor, donor names redacted.
pub async fn get_history(
    id: &ArtworkId,
    order: HistoryOrder,
    privacy: Privacy,
    catalog: &Arc<dyn ArtworkCatalog>,
    ledger: &Arc<dyn LedgerReader>,
    locale: CurrencyLocale,
) -> Result<Vec<DisplayRow>, ControllerError> {
    trace!("get {:?} history of {}", order, id);
    let artwork = catalog
        .get(id)
        .ok_or_else(|| ControllerError::UnknownArtwork(id.clone()))?;
    let state = ledger.get_ledger(&artwork).await?;
    Ok(present(&state.pledges, order, privacy, locale))
}

pub async fn submit_pledge(
    id: &ArtworkId,
    submission: &PledgeSubmission,
    pledging: &Arc<dyn Pledging>,
    locale: CurrencyLocale,
) -> Result<PledgeAccepted, ControllerError> {
    trace!("submit pledge for {}", id);
    let Accepted { artwork, pledge, ledger, ledger_is_stale } =
        pledging.submit_pledge(id, submission).await?;
    let minimum = compute_next_minimum(&artwork, &ledger);
    let mut message = format!(
        "Thank you {}, your pledge of {} has been recorded",
        pledge.name,
        currency::format(pledge.amount, locale)
    );
    if ledger_is_stale {
        message.push_str(
            ". The pledge history could not be refreshed, please do not \
             submit it again",
        );
    }
    Ok(PledgeAccepted {
        message,
        ledger_is_stale,
        artwork_id:        artwork.id,
        highest_pledge:    ledger.highest_pledge,
        formatted_highest: currency::format(ledger.highest_pledge, locale),
        minimum_bid:       MinimumBidView::new(&minimum, locale),
        history:           present(
            &ledger.pledges,
            HistoryOrder::AmountDesc,
            Privacy::Redacted,
            locale,
        ),
    })
}
