use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ArtworkId, PledgeId};

/// A pledge that passed validation and is ready to be appended to the
/// ledger of an artwork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedPledge {
    pub name:   String,
    pub email:  String,
    /// Digits only
    pub phone:  String,
    pub amount: u64,
}

/// A persisted pledge. Never mutated nor deleted once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pledge {
    pub id:         PledgeId,
    pub artwork_id: ArtworkId,
    pub name:       String,
    pub email:      String,
    pub phone:      String,
    pub amount:     u64,
    pub created_at: DateTime<Utc>,
}

impl Pledge {
    /// Attach the identifiers assigned by the store.
    pub fn from_validated(
        pledge: ValidatedPledge,
        artwork_id: ArtworkId,
        id: PledgeId,
        created_at: DateTime<Utc>,
    ) -> Self {
        let ValidatedPledge { name, email, phone, amount } = pledge;
        Self { id, artwork_id, name, email, phone, amount, created_at }
    }
}
