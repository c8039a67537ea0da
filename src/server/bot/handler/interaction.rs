use serenity::all::{Context, Interaction};

use crate::server::{
    bot::command::{self, ephemeral, user_message},
    error::AppError,
};

use super::Handler;

/// Routes an interaction and reports failures back to the member.
///
/// When the handler already responded before failing, the follow up error reply is
/// rejected by Discord and only logged.
pub async fn handle_interaction(handler: &Handler, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => {
            if let Err(e) = command::run_command(handler, &ctx, &command).await {
                log_failure("command", &command.data.name, &e);
                if let Err(reply_err) = command
                    .create_response(&ctx.http, ephemeral(user_message(&e)))
                    .await
                {
                    tracing::debug!("Could not report command error: {}", reply_err);
                }
            }
        }
        Interaction::Component(component) => {
            if let Err(e) = command::run_component(handler, &ctx, &component).await {
                log_failure("component", &component.data.custom_id, &e);
                if let Err(reply_err) = component
                    .create_response(&ctx.http, ephemeral(user_message(&e)))
                    .await
                {
                    tracing::debug!("Could not report component error: {}", reply_err);
                }
            }
        }
        Interaction::Modal(modal) => {
            if let Err(e) = command::run_modal(handler, &ctx, &modal).await {
                log_failure("modal", &modal.data.custom_id, &e);
                if let Err(reply_err) = modal
                    .create_response(&ctx.http, ephemeral(user_message(&e)))
                    .await
                {
                    tracing::debug!("Could not report modal error: {}", reply_err);
                }
            }
        }
        _ => {}
    }
}

fn log_failure(kind: &str, name: &str, err: &AppError) {
    match err {
        AppError::BadRequest(_) | AppError::Forbidden(_) | AppError::NotFound(_) => {
            tracing::debug!("Rejected {} {}: {}", kind, name, err)
        }
        _ => tracing::error!("Failed to handle {} {}: {}", kind, name, err),
    }
}
