pub mod achievement;
pub mod contest;
pub mod notification;
pub mod participant;
pub mod payment;
pub mod streak;
pub mod user;
