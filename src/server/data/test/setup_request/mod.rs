use crate::server::{
    data::setup_request::SetupRequestRepository, error::AppError,
    model::setup_request::SETUP_CREATE_ROLE,
};
use chrono::{Duration, Utc};
use sea_orm::EntityTrait;
use test_utils::{builder::TestBuilder, factory::setup_request::SetupRequestFactory};

mod delete;
mod enqueue;
mod get_unprocessed;
mod list_for_guild;
mod mark_processed;
