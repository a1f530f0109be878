use std::collections::HashMap;

use async_trait::async_trait;
use model::domain::user::{Role, User};
use model::UserId;

use super::{Error, Identity};

/// Static table of admin bearer tokens.
#[derive(Debug, Default)]
pub struct IdentityOfflineImpl {
    admins: HashMap<String, UserId>,
}

impl IdentityOfflineImpl {
    /// `tokens` is a comma separated list, blanks are ignored.
    pub fn new(tokens: &str) -> Self {
        warn!("Using offline identity provider");
        let admins = tokens
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| (token.to_string(), UserId::new_random()))
            .collect();
        Self { admins }
    }
}

#[async_trait]
impl Identity for IdentityOfflineImpl {
    async fn current_user(&self, token: &str) -> Result<Option<User>, Error> {
        Ok(self
            .admins
            .get(token)
            .map(|id| User { id: id.clone(), email: None }))
    }

    async fn role(
        &self,
        token: &str,
        user: &UserId,
    ) -> Result<Option<Role>, Error> {
        Ok(match self.admins.get(token) {
            Some(id) if id == user => Some(Role::Admin),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_token_table() {
        let identity = IdentityOfflineImpl::new(" s3cret, ,other");
        let user = identity.current_user("s3cret").await.unwrap().unwrap();
        assert_eq!(
            identity.role("s3cret", &user.id).await.unwrap(),
            Some(Role::Admin)
        );
        assert_eq!(identity.role("other", &user.id).await.unwrap(), None);
        assert!(identity.current_user("").await.unwrap().is_none());
        assert!(identity.current_user("nope").await.unwrap().is_none());
    }
}
