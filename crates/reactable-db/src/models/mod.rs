//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod reaction;
mod user;

pub use comment::CommentModel;
pub use reaction::{ReactionCountModel, ReactionModel};
pub use user::UserProfileModel;
