//! Response row DTOs
//!
//! View-ready rows produced by the aggregate stores. Timestamps are
//! already humanized; ids stay typed so the view can round-trip them into
//! controller calls.

use serde::Serialize;

use reactable_core::value_objects::Snowflake;

/// One row of the "who reacted" listing
#[derive(Debug, Clone, Serialize)]
pub struct ReactorEntry {
    pub user_name: String,
    pub avatar_url: Option<String>,
    pub type_key: String,
    /// Humanized, e.g. "5 minutes ago"
    pub reacted_at: String,
}

/// One row of the comment listing
#[derive(Debug, Clone, Serialize)]
pub struct CommentEntry {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub user_name: String,
    pub content: String,
    /// Humanized, e.g. "just now"
    pub created_at: String,
    /// Whether the viewing actor may edit/delete this row
    pub can_delete: bool,
}

/// A page of comments plus whether more exist beyond the window
#[derive(Debug, Clone, Serialize)]
pub struct CommentsPage {
    pub items: Vec<CommentEntry>,
    pub has_more: bool,
}
