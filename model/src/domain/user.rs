use serde::{Deserialize, Serialize};

use crate::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id:    UserId,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[serde(other)]
    Visitor,
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value.trim() {
            "admin" => Role::Admin,
            _ => Role::Visitor,
        }
    }
}
