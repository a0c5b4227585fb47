//! Data transfer objects
//!
//! Request DTOs carry validated input into the stores; response rows are
//! the view-ready shapes the controllers hold in session state.

mod requests;
mod responses;
mod time;

pub use requests::{CreateCommentRequest, UpdateCommentRequest};
pub use responses::{CommentEntry, CommentsPage, ReactorEntry};
pub use time::humanize_ago;
