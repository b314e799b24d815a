//! Invoice dashboard server
//!
//! ```text
//! invoice-server [config.yaml]
//! ```
//!
//! Without an argument `invoices.yaml` is read when present, otherwise the
//! defaults apply. Environment variables override the file.

use anyhow::{Context, Result};
use invoices::prelude::*;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "invoices.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = load_config()?;
    config.apply_env();
    config.validate().context("invalid configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let dates = DateFormatPolicy::system(config.date_locale()?);
    let credentials = config.credential_provider();
    if credentials.is_empty() {
        tracing::warn!("no users configured; every sign-in will be rejected");
    }

    let builder = ServerBuilder::new()
        .with_shared_repository(repository(&config).await?)
        .with_credentials(credentials)
        .with_dates(dates);

    builder.serve(&config.server.bind).await
}

fn load_config() -> Result<AppConfig> {
    match std::env::args().nth(1) {
        Some(path) => AppConfig::from_yaml_file(&path)
            .with_context(|| format!("failed to load configuration from {}", path)),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            Ok(AppConfig::from_yaml_file(DEFAULT_CONFIG)?)
        }
        None => Ok(AppConfig::default()),
    }
}

#[cfg(feature = "postgres")]
async fn repository(config: &AppConfig) -> Result<Arc<dyn InvoiceRepository>> {
    use invoices::storage::postgres::{connect, ensure_schema};

    let Some(url) = config.database.url.as_deref() else {
        tracing::info!("no database configured, using in-memory invoices");
        return Ok(Arc::new(InMemoryInvoiceRepository::new()));
    };

    let pool = connect(url, config.database.max_connections).await?;
    ensure_schema(&pool).await?;
    tracing::info!("connected to PostgreSQL");

    Ok(Arc::new(PostgresInvoiceRepository::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn repository(config: &AppConfig) -> Result<Arc<dyn InvoiceRepository>> {
    if config.database.url.is_some() {
        tracing::warn!("database.url ignored: built without the postgres feature");
    }
    Ok(Arc::new(InMemoryInvoiceRepository::new()))
}
