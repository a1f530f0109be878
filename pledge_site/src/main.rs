#[macro_use]
extern crate tracing;

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::web::Data;
use actix_web::{middleware, App, HttpServer};
use anyhow::Context;
use helper::from_disk::FromDisk;
use helper::init::init_subscriber;
use helper::{env_load, env_var};
#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
use model::domain::currency::CurrencyLocale;
use model::dto::artwork::CatalogDisk;
use nutype::nutype;
use tracing_actix_web::TracingLogger;

use crate::repository::catalog::{ArtworkCatalog, ArtworkCatalogHashMapImpl};
use crate::repository::identity::Identity;
use crate::repository::pledge_store::PledgeStore;
use crate::service::access::{AdminGuard, AdminGuardImpl};
use crate::service::ledger::{LedgerReader, LedgerReaderImpl};
use crate::service::pledge::{Pledging, PledgingImpl};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod controller;
mod handler;
mod prom_metrics;
mod repository;
mod service;

env_var!(SERVER_PORT);
env_var!(ARTWORK_CATALOG_PATH);
env_var!(CURRENCY_LOCALE);
#[cfg(not(feature = "offline"))]
env_var!(SUPABASE_URL);
#[cfg(not(feature = "offline"))]
env_var!(SUPABASE_ANON_KEY);
#[cfg(feature = "offline")]
env_var!(ADMIN_TOKENS);

#[nutype(validate(greater = 0), derive(Debug, Clone, Copy))]
pub struct ServerPort(u16);

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, AsRef, Display)
)]
pub struct ArtworkCatalogPath(String);

fn currency_locale() -> anyhow::Result<CurrencyLocale> {
    match std::env::var(CURRENCY_LOCALE) {
        Ok(locale) => locale.parse().with_context(|| {
            format!("{} was not formatted right", CURRENCY_LOCALE)
        }),
        Err(_) => Ok(CurrencyLocale::default()),
    }
}

#[cfg(not(feature = "offline"))]
fn supabase_config(
) -> anyhow::Result<repository::supabase::SupabaseConfig> {
    use repository::supabase::{SupabaseAnonKey, SupabaseConfig, SupabaseUrl};
    Ok(SupabaseConfig {
        url:      env_load!(SupabaseUrl, SUPABASE_URL),
        anon_key: env_load!(SupabaseAnonKey, SUPABASE_ANON_KEY),
    })
}

#[cfg(not(feature = "offline"))]
fn backends_factory(
) -> anyhow::Result<(Arc<dyn PledgeStore>, Arc<dyn Identity>)> {
    use repository::identity::IdentitySupabaseImpl;
    use repository::pledge_store::PledgeStoreSupabaseImpl;
    use reqwest_middleware::ClientBuilder;

    let config = supabase_config()?;
    info!("Using the Supabase backend at {}", config.url);
    let http_client = Arc::new(
        ClientBuilder::new(
            reqwest::Client::builder()
                .gzip(true)
                .build()
                .context("Cannot build the HTTP client")?,
        )
        .build(),
    );
    Ok((
        Arc::new(PledgeStoreSupabaseImpl::new(
            config.clone(),
            http_client.clone(),
        )),
        Arc::new(IdentitySupabaseImpl::new(config, http_client)),
    ))
}

#[cfg(feature = "offline")]
fn backends_factory(
) -> anyhow::Result<(Arc<dyn PledgeStore>, Arc<dyn Identity>)> {
    use repository::identity::IdentityOfflineImpl;
    use repository::pledge_store::PledgeStoreOfflineImpl;

    let tokens = std::env::var(ADMIN_TOKENS).unwrap_or_default();
    Ok((
        Arc::new(PledgeStoreOfflineImpl::new()),
        Arc::new(IdentityOfflineImpl::new(&tokens)),
    ))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let _guard = init_subscriber("pledge_site", "info")?;
    debug!("Tracing initialized.");

    let port = env_load!(ServerPort, SERVER_PORT, u16).into_inner();
    let catalog_path = env_load!(ArtworkCatalogPath, ARTWORK_CATALOG_PATH);
    let locale = currency_locale()?;

    let catalog_disk =
        CatalogDisk::from_disk(&PathBuf::from(catalog_path.as_ref()))
            .await
            .with_context(|| {
                format!("Cannot load the artwork catalog at {}", catalog_path)
            })?;
    info!(
        "Loaded {} artworks from {}",
        catalog_disk.artworks.len(),
        catalog_path
    );

    let (store, identity) = backends_factory()?;

    // Repositories
    let catalog: Arc<dyn ArtworkCatalog> =
        Arc::new(ArtworkCatalogHashMapImpl::new(catalog_disk));

    // Services
    let ledger: Arc<dyn LedgerReader> =
        Arc::new(LedgerReaderImpl::new(store.clone()));
    let pledging: Arc<dyn Pledging> = Arc::new(PledgingImpl::new(
        catalog.clone(),
        ledger.clone(),
        store,
    ));
    let guard: Arc<dyn AdminGuard> = Arc::new(AdminGuardImpl::new(identity));

    info!("Starting HTTP server on 0.0.0.0:{} ({})", port, locale);

    let catalog = Data::from(catalog);
    let ledger = Data::from(ledger);
    let pledging = Data::from(pledging);
    let guard = Data::from(guard);
    let locale = Data::new(locale);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(TracingLogger::default())
            .app_data(Data::clone(&catalog))
            .app_data(Data::clone(&ledger))
            .app_data(Data::clone(&pledging))
            .app_data(Data::clone(&guard))
            .app_data(Data::clone(&locale))
            .configure(handler::routes)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await?;

    Ok(())
}
