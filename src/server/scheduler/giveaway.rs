use chrono::Utc;
use sea_orm::DatabaseConnection;
use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::giveaway_message::GiveawayMessageService};

/// Starts the giveaway finisher
///
/// Runs every 30 seconds, draws winners for giveaways whose end time has passed and
/// announces them in the giveaway channel.
pub async fn start_scheduler(db: DatabaseConnection, discord_http: Arc<Http>) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("*/30 * * * * *", move |_uuid, _lock| {
        let db = db.clone();
        let http = discord_http.clone();

        Box::pin(async move {
            match GiveawayMessageService::new(&db, http)
                .finish_due(Utc::now())
                .await
            {
                Ok(0) => {}
                Ok(finished) => tracing::info!("Finished {} due giveaways", finished),
                Err(e) => tracing::error!("Error finishing giveaways: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Giveaway scheduler started");

    Ok(())
}
