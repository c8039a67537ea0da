use crate::server::{
    data::moderation::ModerationRepository, error::AppError,
    model::moderation::CreateWarningParam,
};
use test_utils::builder::TestBuilder;

mod list;
