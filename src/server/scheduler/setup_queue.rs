use sea_orm::DatabaseConnection;
use serenity::{cache::Cache, http::Http};
use std::{collections::HashSet, sync::Arc};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::setup_executor::{QueueGuard, SetupExecutorService},
};

/// Starts the setup queue poller
///
/// Every 10 seconds the bot picks up requests the dashboard queued in
/// `pending_setup_request` and performs them. Guild membership comes from the gateway
/// cache so requests for guilds the bot left are skipped without a REST call. A tick
/// that fires while the previous poll is still running is skipped.
///
/// # Arguments
/// - `db`: Database connection shared with the dashboard
/// - `discord_http`: Discord HTTP client for guild changes
/// - `cache`: Gateway cache with the bot's guilds and user
pub async fn start_scheduler(
    db: DatabaseConnection,
    discord_http: Arc<Http>,
    cache: Arc<Cache>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;
    let guard = QueueGuard::new();

    let job = Job::new_async("*/10 * * * * *", move |_uuid, _lock| {
        let db = db.clone();
        let http = discord_http.clone();
        let cache = cache.clone();
        let guard = guard.clone();

        Box::pin(async move {
            if let Err(e) = process_setup_queue(&db, http, &cache, &guard).await {
                tracing::error!("Error processing setup queue: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Setup queue scheduler started");

    Ok(())
}

async fn process_setup_queue(
    db: &DatabaseConnection,
    discord_http: Arc<Http>,
    cache: &Cache,
    guard: &QueueGuard,
) -> Result<(), AppError> {
    let bot_guilds: HashSet<_> = cache.guilds().into_iter().collect();
    let bot_user_id = cache.current_user().id.get();

    let Some(run) = SetupExecutorService::new(db, discord_http, bot_user_id)
        .process_exclusive(guard, &bot_guilds)
        .await?
    else {
        tracing::debug!("Previous setup queue poll still running, skipping tick");
        return Ok(());
    };

    if run.executed + run.failed + run.skipped > 0 {
        tracing::info!(
            "Setup queue: {} executed, {} failed, {} skipped",
            run.executed,
            run.failed,
            run.skipped
        );
    }

    Ok(())
}
