use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::artwork::{Artwork, MinimumIncrement};
use crate::domain::currency::{self, CurrencyLocale};
use crate::domain::history::DisplayRow;
use crate::domain::ledger::LedgerState;
use crate::domain::minimum_bid::MinimumBid;
use crate::ArtworkId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LadderStep {
    pub amount:    u64,
    pub formatted: String,
}

/// Minimum bid as shown next to the pledge form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimumBidView {
    pub closed:           bool,
    pub next_minimum_bid: Option<u64>,
    pub formatted:        Option<String>,
    pub ladder:           Vec<LadderStep>,
}

impl MinimumBidView {
    pub fn new(minimum: &MinimumBid, locale: CurrencyLocale) -> Self {
        Self {
            closed:           minimum.is_closed(),
            next_minimum_bid: minimum.next_minimum_bid(),
            formatted:        minimum
                .next_minimum_bid()
                .map(|amount| currency::format(amount, locale)),
            ladder:           minimum
                .suggested_ladder()
                .map(|amount| LadderStep {
                    amount,
                    formatted: currency::format(amount, locale),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkSummary {
    #[serde(flatten)]
    pub artwork:     Artwork,
    pub minimum_bid: MinimumBidView,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkDetail {
    #[serde(flatten)]
    pub artwork:                Artwork,
    pub formatted_starting_bid: String,
    pub highest_pledge:         u64,
    pub formatted_highest:      String,
    pub pledge_count:           usize,
    pub minimum_bid:            MinimumBidView,
    pub history:                Vec<DisplayRow>,
}

impl ArtworkDetail {
    pub fn new(
        artwork: Artwork,
        ledger: &LedgerState,
        minimum: &MinimumBid,
        history: Vec<DisplayRow>,
        locale: CurrencyLocale,
    ) -> Self {
        Self {
            formatted_starting_bid: currency::format(
                artwork.starting_bid,
                locale,
            ),
            artwork,
            highest_pledge: ledger.highest_pledge,
            formatted_highest: currency::format(ledger.highest_pledge, locale),
            pledge_count: ledger.pledges.len(),
            minimum_bid: MinimumBidView::new(minimum, locale),
            history,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ArtworkError {
    #[error("Artwork id is required")]
    MissingId,
    #[error("Title is required")]
    MissingTitle,
    #[error("Lot number is required")]
    MissingLotNumber,
    #[error("Minimum increment must be at least 1")]
    InvalidIncrement,
}

/// Every problem found in an artwork registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtworkErrors(pub Vec<ArtworkError>);

impl fmt::Display for ArtworkErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages =
            self.0.iter().map(ToString::to_string).collect::<Vec<_>>();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ArtworkErrors {}

impl Serialize for ArtworkError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Admin registration (or replacement) of a listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterArtwork {
    pub id:                String,
    #[serde(default)]
    pub lot_number:        String,
    #[serde(default)]
    pub title:             String,
    pub artist:            Option<String>,
    pub medium:            Option<String>,
    pub dimensions:        Option<String>,
    pub description:       Option<String>,
    pub starting_bid:      u64,
    pub minimum_increment: u64,
    #[serde(default)]
    pub is_bidded:         bool,
}

impl TryFrom<RegisterArtwork> for Artwork {
    type Error = ArtworkErrors;

    fn try_from(value: RegisterArtwork) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();

        let id = ArtworkId::try_new(value.id).ok();
        if id.is_none() {
            errors.push(ArtworkError::MissingId);
        }
        let title = value.title.trim().to_string();
        if title.is_empty() {
            errors.push(ArtworkError::MissingTitle);
        }
        let lot_number = value.lot_number.trim().to_string();
        if lot_number.is_empty() {
            errors.push(ArtworkError::MissingLotNumber);
        }
        let minimum_increment =
            MinimumIncrement::try_new(value.minimum_increment).ok();
        if minimum_increment.is_none() {
            errors.push(ArtworkError::InvalidIncrement);
        }

        match (id, minimum_increment) {
            (Some(id), Some(minimum_increment)) if errors.is_empty() => {
                Ok(Artwork {
                    id,
                    lot_number,
                    title,
                    artist: non_blank(value.artist),
                    medium: non_blank(value.medium),
                    dimensions: non_blank(value.dimensions),
                    description: non_blank(value.description),
                    starting_bid: value.starting_bid,
                    minimum_increment,
                    is_bidded: value.is_bidded,
                })
            }
            _ => Err(ArtworkErrors(errors)),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
