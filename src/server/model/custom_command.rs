//! Guild-defined text commands triggered by `{prefix}{name}` messages.

use chrono::{DateTime, Utc};

use crate::{
    model::command::CustomCommandDto,
    server::{error::AppError, util::parse::parse_u64_from_string},
};

pub const MAX_COMMAND_NAME: usize = 32;
pub const MAX_COMMAND_RESPONSE: usize = 2000;

#[derive(Debug, Clone, PartialEq)]
pub struct CustomCommand {
    pub id: i32,
    pub guild_id: u64,
    pub name: String,
    pub response: String,
    pub is_embed: bool,
    pub created_by: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl CustomCommand {
    pub fn from_entity(entity: entity::custom_command::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            name: entity.name,
            response: entity.response,
            is_embed: entity.is_embed,
            created_by: entity.created_by.map(parse_u64_from_string).transpose()?,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> CustomCommandDto {
        CustomCommandDto {
            name: self.name,
            response: self.response,
            embed: self.is_embed,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpsertCustomCommandParam {
    pub guild_id: u64,
    pub name: String,
    pub response: String,
    pub is_embed: bool,
    pub created_by: Option<u64>,
}

/// Lowercases and strips a leading prefix-like `!` and whitespace.
///
/// Returns `None` when the name is empty, too long, or contains whitespace.
pub fn normalize_name(raw: &str) -> Option<String> {
    let name = raw.trim().trim_start_matches('!').to_lowercase();

    if name.is_empty()
        || name.chars().count() > MAX_COMMAND_NAME
        || name.chars().any(char::is_whitespace)
    {
        return None;
    }

    Some(name)
}

/// Extracts the invoked command name from a message, if it starts with `prefix`.
pub fn invoked_name<'a>(content: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = content.trim().strip_prefix(prefix)?;
    rest.split_whitespace().next().filter(|name| !name.is_empty())
}

/// Values substituted into `{user}`, `{server}` and `{channel}`.
pub struct RenderContext<'a> {
    pub user: &'a str,
    pub server: &'a str,
    pub channel: &'a str,
}

pub fn render(response: &str, ctx: &RenderContext<'_>) -> String {
    response
        .replace("{user}", ctx.user)
        .replace("{server}", ctx.server)
        .replace("{channel}", ctx.channel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_names() {
        assert_eq!(normalize_name(" !Hello ").as_deref(), Some("hello"));
        assert_eq!(normalize_name("two words"), None);
        assert_eq!(normalize_name("!"), None);
    }

    #[test]
    fn finds_invoked_name_after_prefix() {
        assert_eq!(invoked_name("!rules please", "!"), Some("rules"));
        assert_eq!(invoked_name("?rules", "!"), None);
        assert_eq!(invoked_name("! ", "!"), None);
    }

    #[test]
    fn substitutes_placeholders() {
        let ctx = RenderContext {
            user: "<@1>",
            server: "Guild",
            channel: "<#2>",
        };

        assert_eq!(
            render("Hi {user}, welcome to {server} in {channel}", &ctx),
            "Hi <@1>, welcome to Guild in <#2>"
        );
    }
}
