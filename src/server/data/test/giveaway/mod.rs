use crate::server::{
    data::giveaway::GiveawayRepository,
    error::AppError,
    model::giveaway::{CreateGiveawayParam, EntryToggle},
};
use chrono::{Duration, Utc};
use test_utils::{
    builder::TestBuilder,
    factory::{giveaway::GiveawayFactory, helpers::create_giveaway_with_entries},
};

mod create;
mod delete;
mod due;
mod mark_ended;
mod toggle_entry;
