mod achievement;
mod contest;
mod notification;
mod payment;
mod streak;
mod user;

pub use achievement::{Badge, UserAchievement};
pub use contest::{Contest, ContestParticipant};
pub use notification::Notification;
pub use payment::{Payment, PaymentStatus};
pub use streak::Streak;
pub use user::User;
