use serde::Serialize;

use crate::domain::artwork::Artwork;
use crate::domain::ledger::LedgerState;

/// Number of quick-pick amounts offered to the donor.
pub const LADDER_STEPS: usize = 4;

/// What the next pledge on an artwork has to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum MinimumBid {
    #[serde(rename_all = "camelCase")]
    Open { next_minimum_bid: u64, increment: u64 },
    /// The artwork is already promised, nothing can be pledged anymore.
    Closed,
}

impl MinimumBid {
    pub fn next_minimum_bid(&self) -> Option<u64> {
        match self {
            MinimumBid::Open { next_minimum_bid, .. } => Some(*next_minimum_bid),
            MinimumBid::Closed => None,
        }
    }

    pub fn is_closed(&self) -> bool { matches!(self, MinimumBid::Closed) }

    /// Fresh sequence of suggested amounts, empty when closed.
    pub fn suggested_ladder(&self) -> SuggestedLadder {
        match *self {
            MinimumBid::Open { next_minimum_bid, increment } => {
                SuggestedLadder {
                    next: next_minimum_bid,
                    increment,
                    remaining: LADDER_STEPS,
                }
            }
            MinimumBid::Closed => {
                SuggestedLadder { next: 0, increment: 0, remaining: 0 }
            }
        }
    }
}

/// `next`, `next + inc`, `next + 2 inc`, `next + 3 inc`
#[derive(Debug, Clone)]
pub struct SuggestedLadder {
    next:      u64,
    increment: u64,
    remaining: usize,
}

impl Iterator for SuggestedLadder {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        self.next = self.next.saturating_add(self.increment);
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SuggestedLadder {}

pub fn compute_next_minimum(
    artwork: &Artwork,
    ledger: &LedgerState,
) -> MinimumBid {
    if artwork.is_bidded {
        return MinimumBid::Closed;
    }
    let increment = artwork.increment();
    MinimumBid::Open {
        next_minimum_bid: ledger.highest_pledge.saturating_add(increment),
        increment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artwork::tests::artwork;
    use crate::domain::ledger::tests::pledge;

    #[test]
    fn test_scenario_no_pledges() {
        let artwork = artwork("a1", 500, 50);
        let ledger = LedgerState::derive(&artwork, vec![]).unwrap();
        let minimum = compute_next_minimum(&artwork, &ledger);
        assert_eq!(minimum.next_minimum_bid(), Some(550));
        assert_eq!(
            minimum.suggested_ladder().collect::<Vec<_>>(),
            vec![550, 600, 650, 700]
        );
    }

    #[test]
    fn test_follows_highest_pledge() {
        let artwork = artwork("a1", 500, 100);
        let ledger = LedgerState::derive(
            &artwork,
            vec![pledge("a1", "Asha Rao", 1_200, 0)],
        )
        .unwrap();
        let minimum = compute_next_minimum(&artwork, &ledger);
        assert_eq!(
            minimum,
            MinimumBid::Open { next_minimum_bid: 1_300, increment: 100 }
        );
        assert_eq!(minimum.next_minimum_bid(), Some(ledger.next_minimum_bid));
    }

    #[test]
    fn test_closed_artwork() {
        let mut artwork = artwork("a1", 500, 50);
        artwork.is_bidded = true;
        let ledger = LedgerState::derive(&artwork, vec![]).unwrap();
        let minimum = compute_next_minimum(&artwork, &ledger);
        assert!(minimum.is_closed());
        assert_eq!(minimum.next_minimum_bid(), None);
        assert_eq!(minimum.suggested_ladder().count(), 0);
    }

    #[test]
    fn test_idempotent_and_restartable() {
        let artwork = artwork("a1", 500, 50);
        let ledger = LedgerState::derive(
            &artwork,
            vec![pledge("a1", "Asha Rao", 650, 0)],
        )
        .unwrap();
        let first = compute_next_minimum(&artwork, &ledger);
        let second = compute_next_minimum(&artwork, &ledger);
        assert_eq!(first, second);

        let mut ladder = first.suggested_ladder();
        assert_eq!(ladder.len(), LADDER_STEPS);
        assert_eq!(ladder.next(), Some(700));
        assert_eq!(
            first.suggested_ladder().collect::<Vec<_>>(),
            second.suggested_ladder().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_serialize_open() {
        let json = serde_json::to_value(MinimumBid::Open {
            next_minimum_bid: 550,
            increment:        50,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "open",
                "nextMinimumBid": 550,
                "increment": 50
            })
        );
    }
}
