//! # forum-db
//!
//! Storage for the forum: PostgreSQL implementations of the repository traits
//! defined in `forum-core`, plus an in-memory store with the same semantics.
//!
//! ## Overview
//!
//! - Connection pool management and schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//! - [`MemoryStore`] for the service and HTTP tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use forum_db::pool::{create_pool, DatabaseConfig};
//! use forum_db::repositories::PgSessionRepository;
//!
//! async fn example(config: &forum_common::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let db = DatabaseConfig::from_app(&config.database, config.store.timeout());
//!     let pool = create_pool(&db).await?;
//!     forum_db::run_migrations(&pool).await?;
//!     let sessions = PgSessionRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;
mod schema;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use repositories::{
    PgReactionRepository, PgSessionRepository, PgSubjectRepository, PgUserRepository,
};
pub use schema::run_migrations;
