use crate::server::{
    data::guild_config::GuildConfigRepository,
    error::AppError,
    model::guild_config::{patch, KEY_PREFIX, KEY_VERIFIED_ROLE_ID},
};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use test_utils::{builder::TestBuilder, factory::guild_config::create_guild_config};

mod get_or_default;
mod merge;
