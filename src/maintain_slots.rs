//! One-shot maintenance run, meant to be invoked daily by an external cron.
//! Exits non-zero on a fatal failure, a timeout, or any per-template failure.

use std::sync::Arc;

use chrono::Utc;
use color_eyre::eyre::{bail, Result, WrapErr};
use dotenv::dotenv;
use recurslot_api::config::parse_log_level;
use recurslot_db::{create_pool, schema::initialize_database, PgSlotStore};
use recurslot_scheduler::{SchedulerConfig, WindowMaintainer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_log_level(std::env::var("LOG_LEVEL").ok().as_deref()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = SchedulerConfig::from_env()?;
    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL environment variable must be set")?;

    let db_pool = create_pool(&database_url).await?;
    initialize_database(&db_pool).await?;

    let maintainer = WindowMaintainer::new(Arc::new(PgSlotStore::new(db_pool)), config);
    let report = maintainer.run_with_timeout(Utc::now()).await?;

    info!(
        "Maintenance complete: {} generated, {} deleted, net change {}",
        report.slots_generated,
        report.slots_deleted,
        report.net_change()
    );

    if !report.is_complete() {
        for failure in &report.errors {
            warn!("Template {} failed: {}", failure.template, failure.error);
        }
        bail!("{} templates could not be extended", report.errors.len());
    }

    Ok(())
}
