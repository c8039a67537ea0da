use crate::server::{
    data::ticket::TicketRepository,
    error::AppError,
    model::ticket::{CreateTicketParam, TicketTopic},
};
use test_utils::{builder::TestBuilder, factory::ticket::create_ticket};

mod close;
mod create;
