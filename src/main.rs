use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use recurslot_api::{config::ApiConfig, ApiState};
use recurslot_db::{create_pool, schema::initialize_database, PgSlotStore};
use recurslot_scheduler::{SchedulerConfig, WindowMaintainer};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = ApiConfig::from_env()?;
    let scheduler_config = SchedulerConfig::from_env()?;

    let db_pool = create_pool(&config.database_url).await?;
    initialize_database(&db_pool).await?;

    let store = Arc::new(PgSlotStore::new(db_pool));
    let maintainer = WindowMaintainer::new(store, scheduler_config);

    recurslot_api::start_server(config, ApiState::new(maintainer)).await?;

    Ok(())
}
