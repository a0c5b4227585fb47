//! PostgreSQL repository implementations
//!
//! Implements the repository ports defined in `reactable_core::traits`.

mod comment;
mod error;
mod reaction;
mod user_directory;

pub use comment::PgCommentRepository;
pub use reaction::PgReactionRepository;
pub use user_directory::PgUserDirectory;
