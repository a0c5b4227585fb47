//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL in `reactable-db`, in-memory
//! fixtures in `reactable-service::testing`).

use async_trait::async_trait;

use crate::entities::{Comment, Reaction, UserProfile};
use crate::error::DomainError;
use crate::value_objects::{EntityRef, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find the reaction a user placed on an entity, if any
    async fn find_by_user(
        &self,
        entity: &EntityRef,
        user_id: Snowflake,
    ) -> RepoResult<Option<Reaction>>;

    /// All reactions on an entity (insertion order)
    async fn find_by_entity(&self, entity: &EntityRef) -> RepoResult<Vec<Reaction>>;

    /// Newest-first reactions on an entity, optionally restricted to one
    /// type. Always reads from offset 0; "load more" re-fetches with a
    /// larger limit.
    async fn list_recent(
        &self,
        entity: &EntityRef,
        type_filter: Option<&str>,
        limit: i64,
    ) -> RepoResult<Vec<Reaction>>;

    /// Replace the user's reaction on the entity: delete any existing row
    /// for `(reaction.user_id, reaction.entity)`, then insert the new row.
    /// The unique index on that triple is the backstop for concurrent
    /// writers.
    async fn replace(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Delete the user's reaction on the entity; returns rows removed
    async fn delete_by_user(&self, entity: &EntityRef, user_id: Snowflake) -> RepoResult<u64>;

    /// Grouped reaction counts `(type_key, count)` for an entity
    async fn count_by_type(&self, entity: &EntityRef) -> RepoResult<Vec<(String, i64)>>;

    /// Total reaction rows for an entity
    async fn count_total(&self, entity: &EntityRef) -> RepoResult<i64>;

    /// Reaction rows of one type for an entity
    async fn count_of_type(&self, entity: &EntityRef, type_key: &str) -> RepoResult<i64>;

    /// Whether the user has any reaction on the entity
    async fn exists_by_user(&self, entity: &EntityRef, user_id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Newest-first page of comments for an entity. Always reads from
    /// offset 0 with the given limit (see `list_recent` note).
    async fn list_page(&self, entity: &EntityRef, limit: i64) -> RepoResult<Vec<Comment>>;

    /// Create a new comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Update a comment's content if (and only if) `author_id` authored
    /// it; returns whether a row changed
    async fn update_content(
        &self,
        id: Snowflake,
        author_id: Snowflake,
        content: &str,
    ) -> RepoResult<bool>;

    /// Delete a comment if (and only if) `author_id` authored it; returns
    /// whether a row was removed
    async fn delete_owned(&self, id: Snowflake, author_id: Snowflake) -> RepoResult<bool>;

    /// Total comments on an entity
    async fn count(&self, entity: &EntityRef) -> RepoResult<i64>;

    /// Whether the user has commented on the entity
    async fn exists_by_user(&self, entity: &EntityRef, user_id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// User Directory
// ============================================================================

/// Lookup-only access to user display data
///
/// Users are owned by the host application; the attachment layer only
/// resolves ids to names and avatar URLs for listings.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Batch-resolve user profiles; ids with no matching user are simply
    /// absent from the result
    async fn lookup(&self, ids: &[Snowflake]) -> RepoResult<Vec<UserProfile>>;

    /// Resolve a single user profile
    async fn find(&self, id: Snowflake) -> RepoResult<Option<UserProfile>> {
        Ok(self.lookup(&[id]).await?.into_iter().next())
    }
}
