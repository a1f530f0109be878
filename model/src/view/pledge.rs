use serde::{Deserialize, Serialize};

use crate::domain::history::DisplayRow;
use crate::view::artwork::MinimumBidView;
use crate::ArtworkId;

/// Amount typed by the donor, either as a JSON number or as the raw text of
/// the form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

/// Pledge form as submitted by a visitor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PledgeSubmission {
    #[serde(default)]
    pub name:   String,
    #[serde(default)]
    pub email:  String,
    #[serde(default)]
    pub phone:  String,
    #[serde(default, alias = "bidAmount")]
    pub amount: Option<AmountInput>,
}

/// Answer to an accepted pledge: a confirmation and the refreshed state of
/// the artwork.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PledgeAccepted {
    pub message:           String,
    /// The history below was not read back from the store
    pub ledger_is_stale:   bool,
    pub artwork_id:        ArtworkId,
    pub highest_pledge:    u64,
    pub formatted_highest: String,
    pub minimum_bid:       MinimumBidView,
    pub history:           Vec<DisplayRow>,
}
