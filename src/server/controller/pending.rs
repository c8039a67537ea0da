use std::{convert::Infallible, time::Duration};

use axum::{
    extract::{Path, Query, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use futures::{stream, Stream};
use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, SuccessDto},
        setup::{PendingListDto, PendingQuery, PendingSetupRequestDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::setup_queue::SetupQueueService,
        state::AppState,
    },
};

/// Tag for grouping queue inspection endpoints in OpenAPI documentation
pub static PENDING_TAG: &str = "pending";

const STREAM_POLL_INTERVAL: Duration = Duration::from_secs(3);

async fn pending_list(db: &DatabaseConnection, guild_id: u64) -> Result<PendingListDto, AppError> {
    let requests: Vec<PendingSetupRequestDto> = SetupQueueService::new(db)
        .list(guild_id)
        .await?
        .into_iter()
        .map(|request| request.into_dto())
        .collect();

    Ok(PendingListDto { requests })
}

#[utoipa::path(
    get,
    path = "/api/guild/{guild_id}/pending",
    tag = PENDING_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "Queue rows for the guild, newest first", body = PendingListDto),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn list_pending(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &session)
        .require_guild_access(guild_id)
        .await?;

    Ok(Json(pending_list(&state.db, guild_id).await?))
}

/// Removes a queued request, processed or not.
#[utoipa::path(
    delete,
    path = "/api/guild/{guild_id}/pending",
    tag = PENDING_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("id" = i32, Query, description = "Queue row ID")
    ),
    responses(
        (status = 200, description = "Request removed", body = SuccessDto),
        (status = 400, description = "Missing id param", body = ErrorDto),
        (status = 404, description = "Pending request not found", body = ErrorDto)
    ),
)]
pub async fn delete_pending(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
    Query(query): Query<PendingQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &session)
        .require_guild_access(guild_id)
        .await?;

    let id = query
        .id
        .ok_or_else(|| AppError::BadRequest("Missing id param".to_string()))?;

    SetupQueueService::new(&state.db).delete(guild_id, id).await?;

    Ok(Json(SuccessDto::ok()))
}

/// Server-sent events carrying the guild's queue whenever it changes.
///
/// The queue is polled every three seconds. The first poll always emits, later polls
/// emit only when the rows differ from the last event.
#[utoipa::path(
    get,
    path = "/api/guild/{guild_id}/pending/stream",
    tag = PENDING_TAG,
    params(("guild_id" = u64, Path, description = "Discord guild ID")),
    responses(
        (status = 200, description = "`text/event-stream` of queue snapshots", body = PendingListDto, content_type = "text/event-stream"),
        (status = 403, description = "No management access to the guild", body = ErrorDto)
    ),
)]
pub async fn stream_pending(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state, &session)
        .require_guild_access(guild_id)
        .await?;

    let events = pending_events(state.db.clone(), guild_id, STREAM_POLL_INTERVAL);

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

struct StreamState {
    db: DatabaseConnection,
    guild_id: u64,
    interval: Duration,
    /// Queue as last sent to the client
    last: Option<Vec<PendingSetupRequestDto>>,
    polled: bool,
}

fn pending_events(
    db: DatabaseConnection,
    guild_id: u64,
    interval: Duration,
) -> impl Stream<Item = Result<Event, Infallible>> {
    let initial = StreamState {
        db,
        guild_id,
        interval,
        last: None,
        polled: false,
    };

    stream::unfold(initial, |mut state| async move {
        loop {
            if state.polled {
                tokio::time::sleep(state.interval).await;
            }
            state.polled = true;

            // `last` only ever holds a queue the client was sent.
            let list = match pending_list(&state.db, state.guild_id).await {
                Ok(list) => list,
                Err(e) => {
                    tracing::warn!(guild_id = state.guild_id, "Pending stream poll failed: {}", e);
                    continue;
                }
            };

            if state.last.as_ref() == Some(&list.requests) {
                continue;
            }

            let event = match Event::default().event("pending").json_data(&list) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("Failed to encode pending stream event: {}", e);
                    continue;
                }
            };
            state.last = Some(list.requests);

            return Some((Ok(event), state));
        }
    })
}
