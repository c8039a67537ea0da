//! Bot side cron jobs, started once the gateway cache is ready.

pub mod giveaway;
pub mod setup_queue;
