use std::sync::Arc;

use async_trait::async_trait;
use model::domain::user::{Role, User};
use tracing::instrument;

use crate::repository::identity::Identity;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("No valid bearer token was given")]
    Unauthenticated,
    #[error("User {0} is not an admin")]
    Forbidden(model::UserId),
    #[error("The identity provider is unavailable: {0}")]
    Unavailable(#[from] crate::repository::identity::Error),
}

#[async_trait]
pub trait AdminGuard: Send + Sync {
    /// Resolve the token holder and check that they are an admin.
    async fn require_admin(&self, token: Option<&str>) -> Result<User, Error>;
}

pub struct AdminGuardImpl {
    identity: Arc<dyn Identity>,
}

impl AdminGuardImpl {
    pub fn new(identity: Arc<dyn Identity>) -> Self { Self { identity } }
}

#[async_trait]
impl AdminGuard for AdminGuardImpl {
    #[instrument(level = "trace", skip_all)]
    async fn require_admin(&self, token: Option<&str>) -> Result<User, Error> {
        let Some(token) = token.map(str::trim).filter(|token| !token.is_empty())
        else {
            return Err(Error::Unauthenticated);
        };
        let Some(user) = self.identity.current_user(token).await? else {
            return Err(Error::Unauthenticated);
        };
        match self.identity.role(token, &user.id).await? {
            Some(Role::Admin) => Ok(user),
            _ => Err(Error::Forbidden(user.id)),
        }
    }
}
