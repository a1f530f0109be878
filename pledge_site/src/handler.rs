use actix_web::http::header::{self, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::web::{self, Data, Json, Path, Query};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use helper::log_err;
use model::domain::currency::CurrencyLocale;
use model::domain::history::{HistoryOrder, Privacy};
use model::view::artwork::RegisterArtwork;
use model::view::pledge::PledgeSubmission;
use model::ArtworkId;
use prometheus::{Encoder, TextEncoder};
use serde::Deserialize;
use serde_json::json;

use crate::controller::{self, ControllerError};
use crate::repository::catalog::ArtworkCatalog;
use crate::service::access::{self, AdminGuard};
use crate::service::ledger::LedgerReader;
use crate::service::pledge::{self, Pledging};

impl ResponseError for ControllerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ControllerError::UnknownArtwork(_)
            | ControllerError::Catalog(_)
            | ControllerError::Pledge(pledge::Error::UnknownArtwork(_)) => {
                StatusCode::NOT_FOUND
            }
            ControllerError::InvalidArtwork(_)
            | ControllerError::Pledge(pledge::Error::Invalid(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ControllerError::Ledger(_)
            | ControllerError::Pledge(pledge::Error::LedgerUnavailable(_))
            | ControllerError::Access(access::Error::Unavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ControllerError::Pledge(pledge::Error::Persistence(_)) => {
                StatusCode::BAD_GATEWAY
            }
            ControllerError::Access(access::Error::Unauthenticated) => {
                StatusCode::UNAUTHORIZED
            }
            ControllerError::Access(access::Error::Forbidden(_)) => {
                StatusCode::FORBIDDEN
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{:?}", self);
        }
        let body = match self {
            ControllerError::InvalidArtwork(errors) => {
                json!({ "errors": errors })
            }
            ControllerError::Pledge(pledge::Error::Invalid(errors)) => {
                json!({ "errors": errors })
            }
            _ => json!({ "message": self.to_string() }),
        };
        let mut response = HttpResponse::build(status);
        if status == StatusCode::SERVICE_UNAVAILABLE {
            response.insert_header((
                header::RETRY_AFTER,
                HeaderValue::from_static("3"),
            ));
        }
        if status == StatusCode::UNAUTHORIZED {
            response.insert_header((
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer"),
            ));
        }
        response.json(body)
    }
}

#[derive(Debug, Deserialize)]
pub struct ArtworkPath {
    id: ArtworkId,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default)]
    order: HistoryOrder,
}

fn bearer_token(request: &HttpRequest) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Catalog listing with the current minimum of each artwork.
pub async fn get_artworks(
    catalog: Data<dyn ArtworkCatalog>,
    ledger: Data<dyn LedgerReader>,
    locale: Data<CurrencyLocale>,
) -> Result<HttpResponse, ControllerError> {
    let res = controller::artwork::list_artworks(&catalog, &ledger, **locale)
        .await;
    log_err!(res);
    Ok(HttpResponse::Ok().json(res?))
}

pub async fn get_artwork(
    params: Path<ArtworkPath>,
    catalog: Data<dyn ArtworkCatalog>,
    ledger: Data<dyn LedgerReader>,
    locale: Data<CurrencyLocale>,
) -> Result<HttpResponse, ControllerError> {
    let res = controller::artwork::get_artwork(
        &params.id,
        &catalog,
        &ledger,
        **locale,
    )
    .await;
    log_err!(res);
    Ok(HttpResponse::Ok().json(res?))
}

pub async fn get_history(
    params: Path<ArtworkPath>,
    query: Query<HistoryParams>,
    catalog: Data<dyn ArtworkCatalog>,
    ledger: Data<dyn LedgerReader>,
    locale: Data<CurrencyLocale>,
) -> Result<HttpResponse, ControllerError> {
    let res = controller::artwork::get_history(
        &params.id,
        query.order,
        Privacy::Redacted,
        &catalog,
        &ledger,
        **locale,
    )
    .await;
    log_err!(res);
    Ok(HttpResponse::Ok().json(res?))
}

/// Public pledge form, no authentication needed.
pub async fn post_pledge(
    params: Path<ArtworkPath>,
    payload: Json<PledgeSubmission>,
    pledging: Data<dyn Pledging>,
    locale: Data<CurrencyLocale>,
) -> Result<HttpResponse, ControllerError> {
    let res = controller::artwork::submit_pledge(
        &params.id,
        &payload,
        &pledging,
        **locale,
    )
    .await;
    log_err!(res);
    let artwork_id = metric_label(&params.id, &res);
    match &res {
        Ok(accepted) => {
            crate::prom_metrics::PLEDGES_ACCEPTED
                .with_label_values(&[&artwork_id])
                .inc();
            crate::prom_metrics::HIGHEST_PLEDGE
                .with_label_values(&[&artwork_id])
                .set(accepted.highest_pledge as f64);
        }
        Err(err) => {
            crate::prom_metrics::PLEDGES_REFUSED
                .with_label_values(&[&artwork_id, refusal_reason(err)])
                .inc();
        }
    }
    Ok(HttpResponse::Ok().json(res?))
}

/// Ids outside the catalog come from the request path, they share one series.
fn metric_label<T>(
    id: &ArtworkId,
    res: &Result<T, ControllerError>,
) -> String {
    match res {
        Err(ControllerError::UnknownArtwork(_))
        | Err(ControllerError::Pledge(pledge::Error::UnknownArtwork(_))) => {
            "unknown".to_string()
        }
        _ => id.to_string(),
    }
}

fn refusal_reason(err: &ControllerError) -> &'static str {
    match err {
        ControllerError::Pledge(pledge::Error::Invalid(_)) => "invalid",
        ControllerError::Pledge(pledge::Error::UnknownArtwork(_)) => {
            "unknown_artwork"
        }
        ControllerError::Pledge(pledge::Error::LedgerUnavailable(_)) => {
            "ledger_unavailable"
        }
        ControllerError::Pledge(pledge::Error::Persistence(_)) => "persistence",
        _ => "other",
    }
}

/// Register or replace a listing.
pub async fn put_artwork(
    request: HttpRequest,
    payload: Json<RegisterArtwork>,
    guard: Data<dyn AdminGuard>,
    catalog: Data<dyn ArtworkCatalog>,
) -> Result<HttpResponse, ControllerError> {
    let admin = guard.require_admin(bearer_token(&request)).await;
    log_err!(admin);
    trace!("admin {} registers an artwork", admin?.id);
    let res = controller::admin::register_artwork(payload.0, &catalog);
    log_err!(res);
    Ok(HttpResponse::Ok().json(res?))
}

/// Mark an artwork as promised, it stops accepting pledges.
pub async fn post_close_artwork(
    request: HttpRequest,
    params: Path<ArtworkPath>,
    guard: Data<dyn AdminGuard>,
    catalog: Data<dyn ArtworkCatalog>,
) -> Result<HttpResponse, ControllerError> {
    let admin = guard.require_admin(bearer_token(&request)).await;
    log_err!(admin);
    admin?;
    let res = controller::admin::close_artwork(&params.id, &catalog);
    log_err!(res);
    Ok(HttpResponse::Ok().json(res?))
}

pub async fn get_pledges(
    request: HttpRequest,
    params: Path<ArtworkPath>,
    guard: Data<dyn AdminGuard>,
    catalog: Data<dyn ArtworkCatalog>,
    ledger: Data<dyn LedgerReader>,
    locale: Data<CurrencyLocale>,
) -> Result<HttpResponse, ControllerError> {
    let admin = guard.require_admin(bearer_token(&request)).await;
    log_err!(admin);
    admin?;
    let res =
        controller::admin::get_pledges(&params.id, &catalog, &ledger, **locale)
            .await;
    log_err!(res);
    Ok(HttpResponse::Ok().json(res?))
}

pub async fn metrics() -> HttpResponse {
    let mut buffer = vec![];
    let encoder = TextEncoder::new();
    if let Err(err) = encoder.encode(&prometheus::gather(), &mut buffer) {
        error!("Failed to encode the metrics: {:?}", err);
        return HttpResponse::InternalServerError().finish();
    }
    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}

pub async fn health() -> HttpResponse { HttpResponse::Ok().finish() }

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/metrics", web::get().to(metrics)).service(
        web::scope("/api")
            .route("/health", web::get().to(health))
            .route("/artworks", web::get().to(get_artworks))
            .route("/artworks/{id}", web::get().to(get_artwork))
            .route("/artworks/{id}/history", web::get().to(get_history))
            .route("/artworks/{id}/pledges", web::post().to(post_pledge))
            .route("/admin/artworks", web::put().to(put_artwork))
            .route(
                "/admin/artworks/{id}/close",
                web::post().to(post_close_artwork),
            )
            .route("/admin/artworks/{id}/pledges", web::get().to(get_pledges)),
    );
}
