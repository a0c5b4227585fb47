//! Interaction controllers
//!
//! Stateful per-entity session components sitting between a view and the
//! aggregate stores. They mirror persisted state locally (optimistic
//! updates after a successful persist), absorb authorization/not-found
//! conditions as silent no-ops, and turn unauthenticated mutations into a
//! login-modal event.

mod comments;
mod reactions;

pub use comments::CommentController;
pub use reactions::ReactionController;
