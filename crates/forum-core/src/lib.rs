//! # forum-core
//!
//! Domain layer for the forum: entities, value objects, the store traits the
//! vote engine and session tracker consume, and the domain error type.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Reaction, Session, User, VoteAction, VoteCounts, VoteOutcome, VoteStatus};
pub use error::DomainError;
pub use traits::{
    ReactionRepository, RepoResult, SessionRepository, SubjectRepository, UserRepository,
};
pub use value_objects::{
    ActivitySlot, IdParseError, Polarity, SessionToken, SlotError, SubjectId, SubjectKind,
    TokenParseError, UserId,
};
