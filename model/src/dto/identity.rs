use serde::Deserialize;

use crate::domain::user::{Role, User};
use crate::UserId;

/// Body of the identity provider's `user` endpoint, only what is used.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id:    UserId,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<AuthUser> for User {
    fn from(value: AuthUser) -> Self { User { id: value.id, email: value.email } }
}

/// Row of the `profiles` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRow {
    pub role: Option<String>,
}

impl ProfileRow {
    pub fn role(&self) -> Role {
        self.role.as_deref().map(Role::from).unwrap_or(Role::Visitor)
    }
}
