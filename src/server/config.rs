use crate::server::error::{config::ConfigError, AppError};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DISCORD_API_URL: &str = "https://discord.com/api/v10";

const DEFAULT_DATABASE_URL: &str = "sqlite://bot_data.db?mode=rwc";
const DEFAULT_DASHBOARD_URL: &str = "http://localhost:6767";
const DEFAULT_DASHBOARD_PORT: u16 = 6767;
const DEFAULT_SUPPORT_SERVER_URL: &str = "https://discord.gg/zjr3Umcu";

fn require_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Dashboard configuration.
pub struct Config {
    pub database_url: String,

    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_url: String,

    pub discord_auth_url: String,
    pub discord_token_url: String,
    pub discord_api_url: String,

    pub port: u16,

    /// Token used to check bot membership and list guild roles. Optional so the
    /// dashboard can run before the bot is configured.
    pub bot_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let port = match std::env::var("DASHBOARD_PORT") {
            Ok(value) => value.parse::<u16>().map_err(|e| ConfigError::InvalidEnvVar {
                key: "DASHBOARD_PORT".to_string(),
                reason: e.to_string(),
            })?,
            Err(_) => DEFAULT_DASHBOARD_PORT,
        };

        let bot_token = std::env::var("DISCORD_BOT_TOKEN")
            .or_else(|_| std::env::var("DISCORD_TOKEN"))
            .ok()
            .filter(|token| !token.trim().is_empty());

        Ok(Self {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            discord_client_id: require_env("DISCORD_CLIENT_ID")?,
            discord_client_secret: require_env("DISCORD_CLIENT_SECRET")?,
            discord_redirect_url: require_env("DISCORD_REDIRECT_URI")?,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            discord_api_url: DISCORD_API_URL.to_string(),
            port,
            bot_token,
        })
    }
}

/// Bot process configuration.
pub struct BotConfig {
    pub database_url: String,
    pub discord_token: String,
    /// Public dashboard URL linked from `/setup`.
    pub dashboard_url: String,
    pub support_server_url: String,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            discord_token: require_env("DISCORD_TOKEN")?,
            dashboard_url: env_or("DASHBOARD_URL", DEFAULT_DASHBOARD_URL),
            support_server_url: env_or("SUPPORT_SERVER_URL", DEFAULT_SUPPORT_SERVER_URL),
        })
    }
}
