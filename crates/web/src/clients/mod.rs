pub mod auth;
pub mod razorpay;
