//! Business logic services
//!
//! Services borrow a [`ServiceContext`] for the duration of a call; all
//! long-lived state (repositories, clock, key locks) lives in the context.

pub mod auth;
pub mod clock;
pub mod context;
pub mod error;
pub mod locks;
pub mod session;
pub mod subject;
pub mod vote;

// Re-export all services for convenience
pub use auth::AuthService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use error::{ServiceError, ServiceResult};
pub use locks::{KeyedGuard, KeyedLocks};
pub use session::SessionTracker;
pub use subject::SubjectService;
pub use vote::VoteEngine;
