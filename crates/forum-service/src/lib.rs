//! # forum-service
//!
//! Application layer: the vote engine, the session activity tracker,
//! thread and post creation, authentication, and the DTOs the HTTP layer speaks.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, Clock, FixedClock, KeyedLocks, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, ServiceSettings, SessionTracker, SubjectService, SystemClock,
    VoteEngine,
};
