use color_eyre::eyre::Result;
use dotenv::dotenv;

use kabinet_api::config::ApiConfig;
use kabinet_db::{create_pool, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    // Schema bootstrap is idempotent, so every start runs it.
    let pool = create_pool(&config.database_url).await?;
    initialize_database(&pool).await?;

    kabinet_api::start_server(config, pool).await?;
    Ok(())
}
