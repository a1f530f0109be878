use std::fmt::Debug;

use async_trait::async_trait;
use model::domain::user::{Role, User};
use model::UserId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    ReqwestMiddleware(#[from] reqwest_middleware::Error),
    #[error("The request failed with error code: {0}")]
    RequestStatus(reqwest::StatusCode),
    #[error(transparent)]
    Body(#[from] helper::reqwest_helper::Error),
}

/// Who holds a bearer token and what they may do.
#[async_trait]
pub trait Identity: Debug + Sync + Send {
    /// `None` when the token is not recognised.
    async fn current_user(&self, token: &str) -> Result<Option<User>, Error>;

    /// `None` when the user has no profile.
    async fn role(
        &self,
        token: &str,
        user: &UserId,
    ) -> Result<Option<Role>, Error>;
}

#[cfg(not(feature = "offline"))]
mod identity_supabase;
#[cfg(not(feature = "offline"))]
pub use identity_supabase::*;

#[cfg(any(test, feature = "offline"))]
mod identity_offline;
#[cfg(any(test, feature = "offline"))]
pub use identity_offline::*;
