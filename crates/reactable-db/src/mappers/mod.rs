//! Entity to model mappers
//!
//! Conversions between domain entities (reactable-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations

mod comment;
mod reaction;
mod user;

pub use comment::CommentInsert;
pub use reaction::ReactionInsert;
