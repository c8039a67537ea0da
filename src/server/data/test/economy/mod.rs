use crate::server::{
    data::economy::EconomyRepository,
    error::AppError,
    model::economy::{DailyOutcome, TransferOutcome, DAILY_REWARD},
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory::economy_account::create_account};

mod claim_daily;
mod richest;
mod transfer;
