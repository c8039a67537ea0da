use crate::server::{
    data::leveling::LevelingRepository, error::AppError, model::leveling::MemberLevel,
};
use chrono::Utc;
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{
    builder::TestBuilder,
    factory::member_level::{create_level_role, MemberLevelFactory},
};

mod level_roles;
mod rank;
mod save_member;
