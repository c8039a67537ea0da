use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        api::{ErrorDto, QueuedDto, SuccessDto},
        command::{CreateCustomCommandDto, CustomCommandDto, DeleteCustomCommandDto},
        guild::{BotPresenceDto, GuildDashboardDto},
        role::{BulkRolesDto, CreateRoleDto, DeleteRoleDto, GuildRoleDto, LevelRoleDto},
        setup::{
            AnnouncementDto, EmbedDto, EmbedFieldDto, GiveawayDto, LevelingSetupDto,
            PendingListDto, PendingSetupRequestDto, SendEmbedDto, TicketingDto,
        },
        template::{ApplyTemplateDto, StructureDto, TemplateDto},
        user::{DashboardDto, DashboardUserDto, IndexDto, UserGuildDto},
    },
    server::{
        controller::{auth, command, config, dashboard, pending, role, setup, template},
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Channel Manager Dashboard API"),
    paths(
        auth::index,
        auth::login,
        auth::callback,
        auth::logout,
        dashboard::dashboard,
        dashboard::user_guilds,
        dashboard::guild_dashboard,
        config::get_config,
        config::update_config,
        command::list_commands,
        command::create_command,
        command::delete_command,
        command::delete_command_by_name,
        role::list_roles,
        role::create_role,
        role::delete_role,
        role::bulk_roles,
        template::apply_template,
        template::preview_template,
        template::apply_structure,
        template::preview_structure,
        setup::send_embed,
        setup::announcement,
        setup::leveling_setup,
        setup::list_level_roles,
        setup::add_level_role,
        setup::giveaway,
        setup::ticketing,
        setup::verified_role,
        setup::bot_presence,
        pending::list_pending,
        pending::delete_pending,
        pending::stream_pending,
    ),
    components(schemas(
        ErrorDto,
        SuccessDto,
        QueuedDto,
        IndexDto,
        DashboardDto,
        DashboardUserDto,
        UserGuildDto,
        GuildDashboardDto,
        BotPresenceDto,
        CustomCommandDto,
        CreateCustomCommandDto,
        DeleteCustomCommandDto,
        GuildRoleDto,
        CreateRoleDto,
        DeleteRoleDto,
        BulkRolesDto,
        LevelRoleDto,
        ApplyTemplateDto,
        StructureDto,
        TemplateDto,
        EmbedDto,
        EmbedFieldDto,
        SendEmbedDto,
        AnnouncementDto,
        LevelingSetupDto,
        GiveawayDto,
        TicketingDto,
        PendingSetupRequestDto,
        PendingListDto,
    )),
    tags(
        (name = auth::AUTH_TAG, description = "Discord OAuth2 login"),
        (name = dashboard::DASHBOARD_TAG, description = "Signed in user and manageable guilds"),
        (name = config::CONFIG_TAG, description = "Per guild settings document"),
        (name = command::COMMAND_TAG, description = "Custom text commands"),
        (name = role::ROLE_TAG, description = "Guild roles"),
        (name = template::TEMPLATE_TAG, description = "Server templates and structure text"),
        (name = setup::SETUP_TAG, description = "Work queued for the bot"),
        (name = pending::PENDING_TAG, description = "Setup queue inspection"),
    )
)]
pub struct ApiDoc;

/// Guild scoped routes, nested under `/api/guild/{guild_id}`.
fn guild_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/config",
            get(config::get_config).post(config::update_config),
        )
        .route(
            "/commands",
            get(command::list_commands)
                .post(command::create_command)
                .delete(command::delete_command),
        )
        .route("/commands/{name}", delete(command::delete_command_by_name))
        .route("/send-embed", post(setup::send_embed))
        .route("/announcement", post(setup::announcement))
        .route(
            "/roles",
            get(role::list_roles)
                .post(role::create_role)
                .delete(role::delete_role),
        )
        .route("/roles/bulk", post(role::bulk_roles))
        .route("/template", post(template::apply_template))
        .route("/template/preview", post(template::preview_template))
        .route("/apply-structure", post(template::apply_structure))
        .route("/structure/preview", post(template::preview_structure))
        .route("/bot-presence", get(setup::bot_presence))
        .route("/leveling-setup", post(setup::leveling_setup))
        .route(
            "/level-roles",
            get(setup::list_level_roles).post(setup::add_level_role),
        )
        .route("/giveaway", post(setup::giveaway))
        .route("/ticketing", post(setup::ticketing))
        .route("/verified-role", post(setup::verified_role))
        .route(
            "/pending",
            get(pending::list_pending).delete(pending::delete_pending),
        )
        .route("/pending/stream", get(pending::stream_pending))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::index))
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback))
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/dashboard/guild/{guild_id}", get(dashboard::guild_dashboard))
        .route("/api/user/guilds", get(dashboard::user_guilds))
        .nest("/api/guild/{guild_id}", guild_routes())
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_documents_guild_routes() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/guild/{guild_id}/pending/stream"));
        assert!(doc.paths.paths.contains_key("/api/guild/{guild_id}/roles/bulk"));
        assert!(doc.paths.paths.contains_key("/callback"));
    }
}
