use model::view::artwork::ArtworkErrors;
use model::ArtworkId;

pub mod admin;
pub mod artwork;

#[derive(thiserror::Error, Debug)]
pub enum ControllerError {
    #[error("Artwork {0} is not in the catalog")]
    UnknownArtwork(ArtworkId),
    #[error("The artwork listing is invalid: {0}")]
    InvalidArtwork(#[from] ArtworkErrors),
    #[error(transparent)]
    Pledge(#[from] crate::service::pledge::Error),
    #[error(transparent)]
    Ledger(#[from] crate::service::ledger::Error),
    #[error(transparent)]
    Access(#[from] crate::service::access::Error),
    #[error(transparent)]
    Catalog(#[from] crate::repository::catalog::Error),
}
