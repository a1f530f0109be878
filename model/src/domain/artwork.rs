use nutype::nutype;
use serde::{Deserialize, Serialize};

use crate::ArtworkId;

/// Smallest step allowed between two successive pledges, always positive.
#[nutype(
    validate(greater = 0),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Display,
        Serialize,
        Deserialize
    )
)]
pub struct MinimumIncrement(u64);

/// An artwork listed for the fundraiser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id:                ArtworkId,
    pub lot_number:        String,
    pub title:             String,
    #[serde(default)]
    pub artist:            Option<String>,
    #[serde(default)]
    pub medium:            Option<String>,
    #[serde(default)]
    pub dimensions:        Option<String>,
    #[serde(default)]
    pub description:       Option<String>,
    pub starting_bid:      u64,
    pub minimum_increment: MinimumIncrement,
    /// Already promised to a donor, no more pledges are taken.
    #[serde(default)]
    pub is_bidded:         bool,
}

impl Artwork {
    pub fn increment(&self) -> u64 { self.minimum_increment.into_inner() }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Artwork used across the domain tests.
    pub(crate) fn artwork(
        id: &str,
        starting_bid: u64,
        increment: u64,
    ) -> Artwork {
        Artwork {
            id: ArtworkId::try_new(id).unwrap(),
            lot_number: "L001".to_string(),
            title: "Monsoon Study".to_string(),
            artist: None,
            medium: None,
            dimensions: None,
            description: None,
            starting_bid,
            minimum_increment: MinimumIncrement::try_new(increment).unwrap(),
            is_bidded: false,
        }
    }

    #[test]
    fn test_increment_must_be_positive() {
        assert!(MinimumIncrement::try_new(0).is_err());
        assert_eq!(MinimumIncrement::try_new(50).unwrap().into_inner(), 50);
    }

    #[test]
    fn test_deserialize_defaults() {
        let artwork: Artwork = serde_json::from_str(
            r#"{
                "id": "a1",
                "lotNumber": "L001",
                "title": "Monsoon Study",
                "startingBid": 500,
                "minimumIncrement": 50
            }"#,
        )
        .unwrap();
        assert!(!artwork.is_bidded);
        assert_eq!(artwork.artist, None);
        assert_eq!(artwork.increment(), 50);
    }

    #[test]
    fn test_deserialize_rejects_zero_increment() {
        let res = serde_json::from_str::<Artwork>(
            r#"{
                "id": "a1",
                "lotNumber": "L001",
                "title": "Monsoon Study",
                "startingBid": 500,
                "minimumIncrement": 0
            }"#,
        );
        assert!(res.is_err());
    }
}
