//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in forum-core.

mod error;
mod reaction;
mod session;
mod subject;
mod user;

pub(crate) use error::corrupt_row;
pub use error::{map_db_error, map_unique_violation};
pub use reaction::PgReactionRepository;
pub use session::PgSessionRepository;
pub use subject::PgSubjectRepository;
pub use user::PgUserRepository;
