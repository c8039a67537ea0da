use std::sync::Arc;

use channel_manager::server::{
    bot::start::start_bot,
    config::BotConfig,
    error::AppError,
    startup::{connect_to_database, init_tracing},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Arc::new(BotConfig::from_env()?);
    let db = connect_to_database(&config.database_url).await?;

    tracing::info!("Database ready at {}", config.database_url);

    start_bot(config, db).await
}
