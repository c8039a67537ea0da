use crate::server::{
    data::custom_command::CustomCommandRepository, error::AppError,
    model::custom_command::UpsertCustomCommandParam,
};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{
    builder::TestBuilder,
    factory::custom_command::{create_custom_command, CustomCommandFactory},
};

mod delete;
mod list;
mod upsert;
