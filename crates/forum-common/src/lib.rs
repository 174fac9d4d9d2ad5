//! # forum-common
//!
//! Shared utilities including configuration, error handling, password hashing, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{hash_password, verify_password};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, ServerConfig,
    SessionConfig, StoreConfig, VoteConfig,
};
pub use error::{domain_status, AppError};
pub use telemetry::{try_init_tracing, TracingConfig, TracingError};
