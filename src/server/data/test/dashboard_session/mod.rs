use crate::server::{
    data::dashboard_session::DashboardSessionRepository,
    error::AppError,
    model::session::{CreateDashboardSessionParam, OAuthTokens},
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory::dashboard_session::DashboardSessionFactory};

mod create;
mod find_valid;
mod update_tokens;
