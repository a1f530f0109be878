use serde::Serialize;

use crate::domain::artwork::Artwork;
use crate::domain::pledge::Pledge;
use crate::{ArtworkId, PledgeId};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Pledge {pledge} belongs to artwork {found}, not to {expected}")]
    ForeignPledge {
        pledge:   PledgeId,
        found:    ArtworkId,
        expected: ArtworkId,
    },
}

/// Snapshot of the pledges of one artwork and what derives from them.
///
/// It is computed from a fresh read every time and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    pub artwork_id:       ArtworkId,
    /// Highest pledged amount, or the starting bid when nobody pledged yet
    pub highest_pledge:   u64,
    pub next_minimum_bid: u64,
    /// The pledge recognised as the highest one: earliest wins on ties
    pub standing_pledge:  Option<Pledge>,
    pub pledges:          Vec<Pledge>,
}

impl LedgerState {
    pub fn derive(
        artwork: &Artwork,
        pledges: Vec<Pledge>,
    ) -> Result<Self, Error> {
        if let Some(foreign) =
            pledges.iter().find(|pledge| pledge.artwork_id != artwork.id)
        {
            return Err(Error::ForeignPledge {
                pledge:   foreign.id.clone(),
                found:    foreign.artwork_id.clone(),
                expected: artwork.id.clone(),
            });
        }

        let standing_pledge = standing_pledge(&pledges).cloned();
        let highest_pledge = standing_pledge
            .as_ref()
            .map(|pledge| pledge.amount)
            .unwrap_or(artwork.starting_bid);

        Ok(Self {
            artwork_id: artwork.id.clone(),
            highest_pledge,
            next_minimum_bid: highest_pledge.saturating_add(artwork.increment()),
            standing_pledge,
            pledges,
        })
    }

    pub fn has_pledges(&self) -> bool { !self.pledges.is_empty() }
}

/// Highest amount first, then the earliest one to reach it.
pub fn standing_pledge(pledges: &[Pledge]) -> Option<&Pledge> {
    pledges.iter().min_by(|a, b| {
        b.amount.cmp(&a.amount).then_with(|| a.created_at.cmp(&b.created_at))
    })
}
