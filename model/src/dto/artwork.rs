use std::path::Path;

use helper::from_disk::{from_ron_str, read_ron, Error, FromDisk};
use serde::{Deserialize, Serialize};

use crate::domain::artwork::Artwork;

/// Artwork catalog as stored on disk:
///
/// ```ron
/// (
///     artworks: [
///         (
///             id: "monsoon-study",
///             lotNumber: "L001",
///             title: "Monsoon Study",
///             artist: Some("R. Menon"),
///             startingBid: 500,
///             minimumIncrement: 50,
///         ),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDisk {
    pub artworks: Vec<Artwork>,
}

impl CatalogDisk {
    pub fn new(content: &str) -> Result<Self, ron::error::SpannedError> {
        from_ron_str(content)
    }
}

#[async_trait::async_trait]
impl FromDisk for CatalogDisk {
    async fn from_disk(path: &Path) -> Result<Self, Error> {
        read_ron(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"(
        artworks: [
            (
                id: "monsoon-study",
                lotNumber: "L001",
                title: "Monsoon Study",
                artist: Some("R. Menon"),
                startingBid: 500,
                minimumIncrement: 50,
            ),
            (
                id: "harbour-lights",
                lotNumber: "L002",
                title: "Harbour Lights",
                startingBid: 1000,
                minimumIncrement: 100,
                isBidded: true,
            ),
        ],
    )"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = CatalogDisk::new(CATALOG).unwrap();
        assert_eq!(catalog.artworks.len(), 2);
        assert_eq!(catalog.artworks[0].artist.as_deref(), Some("R. Menon"));
        assert!(!catalog.artworks[0].is_bidded);
        assert!(catalog.artworks[1].is_bidded);
    }

    #[test]
    fn test_zero_increment_is_refused() {
        let content =
            CATALOG.replace("minimumIncrement: 50", "minimumIncrement: 0");
        assert!(CatalogDisk::new(&content).is_err());
    }

    #[tokio::test]
    async fn test_from_disk() {
        let path = std::env::temp_dir().join("model_catalog_from_disk.ron");
        tokio::fs::write(&path, CATALOG).await.unwrap();
        let catalog = CatalogDisk::from_disk(&path).await.unwrap();
        assert_eq!(catalog.artworks[1].lot_number, "L002");
    }
}
