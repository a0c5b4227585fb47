//! Domain entities - core business objects

mod actor;
mod comment;
mod reaction;

pub use actor::{Actor, UserProfile};
pub use comment::{strip_tags, Comment, MAX_COMMENT_LEN};
pub use reaction::{Reaction, ReactionCount, ReactionSummary};
