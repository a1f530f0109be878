use std::sync::Arc;

use async_trait::async_trait;
use helper::reqwest_helper::deserialize_response;
use model::domain::pledge::{Pledge, ValidatedPledge};
use model::dto::pledge::{PledgeInsertRow, PledgeRow};
use model::ArtworkId;
use reqwest::header::{HeaderValue, CONTENT_RANGE};
use reqwest::Response;
use reqwest_middleware::RequestBuilder;
use tracing::instrument;

use super::{Error, PledgeStore};
use crate::repository::supabase::{HttpClient, SupabaseConfig};

/// `pledges` table exposed through the PostgREST API of Supabase.
#[derive(Debug)]
pub struct PledgeStoreSupabaseImpl {
    config: SupabaseConfig,
    client: Arc<HttpClient>,
}

impl PledgeStoreSupabaseImpl {
    pub fn new(config: SupabaseConfig, client: Arc<HttpClient>) -> Self {
        Self { config, client }
    }

    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", self.config.anon_key())
            .bearer_auth(self.config.anon_key())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, Error> {
        let response = self.authenticate(request).send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Error::RequestStatus(response.status()))
        }
    }
}

#[async_trait]
impl PledgeStore for PledgeStoreSupabaseImpl {
    #[instrument(level = "trace", skip(self, pledge))]
    async fn insert(
        &self,
        artwork_id: &ArtworkId,
        pledge: &ValidatedPledge,
    ) -> Result<Pledge, Error> {
        let request = self
            .client
            .post(self.config.rest("pledges"))
            .header("Prefer", HeaderValue::from_static("return=representation"))
            .json(&[PledgeInsertRow::new(artwork_id, pledge)]);
        let response = self.send(request).await?;
        let rows: Vec<PledgeRow> = deserialize_response(response).await?;
        let row = rows.into_iter().next().ok_or(Error::MissingInsertedRow)?;
        Ok(Pledge::try_from(row)?)
    }

    #[instrument(level = "trace", skip(self))]
    async fn query_by_artwork(
        &self,
        artwork_id: &ArtworkId,
    ) -> Result<Vec<Pledge>, Error> {
        let mut pages = Pages::default();
        let mut pledges = Vec::new();
        loop {
            let request = self
                .client
                .get(self.config.rest("pledges"))
                .header("Prefer", HeaderValue::from_static("count=exact"))
                .query(&[
                    ("artwork_id", format!("eq.{}", artwork_id)),
                    ("order", "created_at.asc,id.asc".to_string()),
                    ("limit", PAGE_SIZE.to_string()),
                    ("offset", pages.read.to_string()),
                ]);
            let response = self.send(request).await?;
            let total = response
                .headers()
                .get(CONTENT_RANGE)
                .and_then(|value| value.to_str().ok())
                .and_then(content_range_total);
            let rows: Vec<PledgeRow> = deserialize_response(response).await?;
            let more = pages.record(rows.len(), total)?;
            for row in rows {
                pledges.push(Pledge::try_from(row)?);
            }
            if !more {
                break;
            }
        }
        trace!("Read {} pledges for {}", pledges.len(), artwork_id);
        Ok(pledges)
    }
}

/// Rows asked for at once. The server may cap pages to fewer rows.
const PAGE_SIZE: u64 = 1_000;

/// Total of a PostgREST `Content-Range` header: `0-24/3573` or `*/0`. `0-24/*`
/// means the count was not computed.
fn content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

/// Progress of a paged read against the row count announced by the server.
#[derive(Debug, Default)]
struct Pages {
    read:  u64,
    total: Option<u64>,
}

impl Pages {
    /// Account for a page, tells whether another one is needed.
    fn record(
        &mut self,
        rows: usize,
        total: Option<u64>,
    ) -> Result<bool, Error> {
        self.read += rows as u64;
        if total.is_some() {
            self.total = total;
        }
        match self.total {
            Some(total) if self.read >= total => Ok(false),
            Some(total) if rows == 0 => {
                Err(Error::IncompleteRead { read: self.read, total })
            }
            Some(_) => Ok(true),
            None => Ok(rows > 0),
        }
    }
}
