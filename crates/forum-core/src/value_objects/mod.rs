//! Value objects - immutable types that represent domain concepts

mod activity_slot;
mod ids;
mod session_token;
mod subject;

pub use activity_slot::{ActivitySlot, SlotError};
pub use ids::{IdParseError, SubjectId, UserId};
pub use session_token::{SessionToken, TokenParseError};
pub use subject::{Polarity, SubjectKind};
