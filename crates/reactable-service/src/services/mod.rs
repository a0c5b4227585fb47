//! Application services
//!
//! The aggregate stores wrap the repository ports with registry rules,
//! validation, event dispatch and view-row assembly. `ServiceContext` is
//! the dependency container handed to every store and controller.

mod comment;
mod context;
mod error;
mod reaction;

pub use comment::CommentStore;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use reaction::ReactionStore;
