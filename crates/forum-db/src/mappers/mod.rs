//! Entity to model mappers
//!
//! Conversions between domain entities (forum-core) and database models.
//! - `From<Model> for Entity` when every row is valid
//! - `TryFrom<Model> for Entity` when a column carries a checked value object
//! - `*Insert` structs: prepare entity data for database writes

mod reaction;
mod session;
mod user;

pub use reaction::ReactionInsert;
pub use session::SessionInsert;
