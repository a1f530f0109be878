use std::fmt::Debug;

use dashmap::DashMap;
use model::domain::artwork::Artwork;
use model::dto::artwork::CatalogDisk;
use model::ArtworkId;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Artwork {0} is not in the catalog")]
    NotFound(ArtworkId),
}

/// Listing of the artworks offered in the fundraiser.
pub trait ArtworkCatalog: Debug + Sync + Send {
    fn get(&self, id: &ArtworkId) -> Option<Artwork>;
    /// Sorted by lot number
    fn list(&self) -> Vec<Artwork>;
    /// Insert or replace, returns the previous listing
    fn upsert(&self, artwork: Artwork) -> Option<Artwork>;
    /// Mark the artwork as already promised to a donor
    fn close(&self, id: &ArtworkId) -> Result<Artwork, Error>;
}

#[derive(Debug, Default)]
pub struct ArtworkCatalogHashMapImpl {
    database: DashMap<ArtworkId, Artwork>,
}

impl ArtworkCatalogHashMapImpl {
    pub fn new(disk: CatalogDisk) -> Self {
        let database = DashMap::new();
        for artwork in disk.artworks {
            if let Some(previous) = database.insert(artwork.id.clone(), artwork)
            {
                warn!(
                    "Artwork {} is listed twice, keeping the last",
                    previous.id
                );
            }
        }
        Self { database }
    }
}

impl ArtworkCatalog for ArtworkCatalogHashMapImpl {
    fn get(&self, id: &ArtworkId) -> Option<Artwork> {
        self.database.get(id).map(|artwork| artwork.value().clone())
    }

    fn list(&self) -> Vec<Artwork> {
        let mut artworks = self
            .database
            .iter()
            .map(|artwork| artwork.value().clone())
            .collect::<Vec<_>>();
        artworks.sort_by(|a, b| {
            a.lot_number.cmp(&b.lot_number).then_with(|| a.id.cmp(&b.id))
        });
        artworks
    }

    fn upsert(&self, artwork: Artwork) -> Option<Artwork> {
        self.database.insert(artwork.id.clone(), artwork)
    }

    fn close(&self, id: &ArtworkId) -> Result<Artwork, Error> {
        let Some(mut artwork) = self.database.get_mut(id) else {
            return Err(Error::NotFound(id.clone()));
        };
        artwork.is_bidded = true;
        Ok(artwork.value().clone())
    }
}
