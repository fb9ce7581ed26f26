pub mod auth;
pub mod cron;
pub mod payments;
pub mod users;
