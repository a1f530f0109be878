use std::sync::Arc;

use async_trait::async_trait;
use helper::reqwest_helper::deserialize_response;
use model::domain::user::{Role, User};
use model::dto::identity::{AuthUser, ProfileRow};
use model::UserId;
use reqwest::{Response, StatusCode};
use reqwest_middleware::RequestBuilder;
use tracing::instrument;

use super::{Error, Identity};
use crate::repository::supabase::{HttpClient, SupabaseConfig};

/// Supabase auth, with the role read from the `profiles` table.
#[derive(Debug)]
pub struct IdentitySupabaseImpl {
    config: SupabaseConfig,
    client: Arc<HttpClient>,
}

impl IdentitySupabaseImpl {
    pub fn new(config: SupabaseConfig, client: Arc<HttpClient>) -> Self {
        Self { config, client }
    }

    /// Requests are made on behalf of the token holder so the row level
    /// security of the store applies.
    async fn send(
        &self,
        request: RequestBuilder,
        token: &str,
    ) -> Result<Option<Response>, Error> {
        let response = request
            .header("apikey", self.config.anon_key())
            .bearer_auth(token)
            .send()
            .await?;
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status if status.is_success() => Ok(Some(response)),
            status => Err(Error::RequestStatus(status)),
        }
    }
}

#[async_trait]
impl Identity for IdentitySupabaseImpl {
    #[instrument(level = "trace", skip_all)]
    async fn current_user(&self, token: &str) -> Result<Option<User>, Error> {
        let request = self.client.get(self.config.auth("user"));
        let Some(response) = self.send(request, token).await? else {
            return Ok(None);
        };
        let user: AuthUser = deserialize_response(response).await?;
        Ok(Some(user.into()))
    }

    #[instrument(level = "trace", skip(self, token))]
    async fn role(
        &self,
        token: &str,
        user: &UserId,
    ) -> Result<Option<Role>, Error> {
        let request = self
            .client
            .get(self.config.rest("profiles"))
            .query(&[
                ("id", format!("eq.{}", user)),
                ("select", "role".to_string()),
            ]);
        let Some(response) = self.send(request, token).await? else {
            return Ok(None);
        };
        let profiles: Vec<ProfileRow> = deserialize_response(response).await?;
        Ok(profiles.first().map(ProfileRow::role))
    }
}
