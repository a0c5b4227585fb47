//! # reactable-core
//!
//! Domain layer containing entities, value objects, capability traits,
//! repository ports, and domain events for the reaction/comment attachment
//! layer. This crate has zero dependencies on infrastructure (database,
//! web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Actor, Comment, Reaction, ReactionCount, ReactionSummary, UserProfile};
pub use error::DomainError;
pub use events::{DomainEvent, EventSink, NullEventSink};
pub use traits::{
    CommentRepository, Commentable, Reactable, ReactionRepository, RepoResult, UserDirectory,
};
pub use value_objects::{EntityRef, Snowflake, SnowflakeGenerator, SnowflakeParseError};
