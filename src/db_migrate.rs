use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use recurslot_db::schema::initialize_database;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL environment variable must be set")?;

    println!("Connecting to database...");
    let db_pool = recurslot_db::create_pool(&database_url).await?;

    println!("Creating slot table and indexes...");
    initialize_database(&db_pool).await?;
    println!("Database schema is up to date.");

    Ok(())
}
