//! Domain entities - core business objects

mod reaction;
mod session;
mod user;

pub use reaction::{Reaction, VoteAction, VoteCounts, VoteOutcome, VoteStatus};
pub use session::Session;
pub use user::User;
