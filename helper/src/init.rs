use anyhow::Context;
use std::env::var;
use tracing::subscriber::set_global_default;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_forest::ForestLayer;
use tracing_log::LogTracer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Compose the `tracing` layers and register them as the global default.
///
/// `RUST_LOG` overrides `env_filter`. Spans are written to a file located by
/// `LOG_CONFIG_PATH`/`LOG_CONFIG_FILENAME` and printed as a tree on stdout.
///
/// It should only be called once! The returned guard flushes the file writer
/// when dropped and must be kept alive for the whole program.
pub fn init_subscriber(
    name: &str,
    env_filter: &str,
) -> anyhow::Result<WorkerGuard> {
    let log_config_path =
        var("LOG_CONFIG_PATH").unwrap_or_else(|_| "./".to_string());
    let log_config_filename =
        var("LOG_CONFIG_FILENAME").unwrap_or_else(|_| format!("{name}.log"));

    let file_appender =
        tracing_appender::rolling::never(log_config_path, log_config_filename);
    let (non_blocking_file, guard) =
        tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env_filter));

    let subscriber = Registry::default()
        .with(env_filter)
        .with(fmt::Layer::default().with_writer(non_blocking_file))
        .with(ForestLayer::default());

    LogTracer::init().context("Failed to set logger")?;
    set_global_default(subscriber).context("Failed to set subscriber")?;

    Ok(guard)
}
