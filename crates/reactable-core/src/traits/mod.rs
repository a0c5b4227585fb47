//! Ports - capability traits for host entities and repository interfaces

mod capabilities;
mod repositories;

pub use capabilities::{Commentable, Reactable};
pub use repositories::{CommentRepository, ReactionRepository, RepoResult, UserDirectory};
