use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::pledge::{Pledge, ValidatedPledge};
use crate::{ArtworkId, PledgeId};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Pledge {0} has a non-positive amount: {1}")]
    NonPositiveAmount(PledgeId, i64),
    #[error("Pledge {0} has an invalid artwork id")]
    InvalidArtworkId(PledgeId),
}

/// Row of the `pledges` table, as returned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PledgeRow {
    pub id:         PledgeId,
    pub artwork_id: String,
    pub name:       String,
    pub email:      String,
    pub phone:      String,
    pub amount:     i64,
    pub created_at: DateTime<Utc>,
}

/// Row sent to the store, `id` and `created_at` are filled in by it.
#[derive(Debug, Clone, Serialize)]
pub struct PledgeInsertRow<'a> {
    pub artwork_id: &'a str,
    pub name:       &'a str,
    pub email:      &'a str,
    pub phone:      &'a str,
    pub amount:     u64,
}

impl<'a> PledgeInsertRow<'a> {
    pub fn new(artwork_id: &'a ArtworkId, pledge: &'a ValidatedPledge) -> Self {
        Self {
            artwork_id: artwork_id.as_ref(),
            name:       &pledge.name,
            email:      &pledge.email,
            phone:      &pledge.phone,
            amount:     pledge.amount,
        }
    }
}

impl TryFrom<PledgeRow> for Pledge {
    type Error = Error;

    fn try_from(row: PledgeRow) -> Result<Self, Self::Error> {
        let PledgeRow { id, artwork_id, name, email, phone, amount, created_at } =
            row;
        let amount = match u64::try_from(amount) {
            Ok(amount) if amount > 0 => amount,
            _ => return Err(Error::NonPositiveAmount(id, amount)),
        };
        let Ok(artwork_id) = ArtworkId::try_new(artwork_id) else {
            return Err(Error::InvalidArtworkId(id));
        };
        Ok(Pledge { id, artwork_id, name, email, phone, amount, created_at })
    }
}
