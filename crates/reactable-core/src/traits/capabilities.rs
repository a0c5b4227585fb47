//! Entity capability traits
//!
//! Host entities opt in to the attachment layer by implementing these.
//! The layer treats entities opaquely: all it needs is the tagged
//! reference, plus two optional hooks for vetoing reaction types and for
//! handing over already-fetched data so aggregate queries can be skipped.

use crate::entities::Reaction;
use crate::value_objects::EntityRef;

/// An entity that can own reactions
pub trait Reactable: Send + Sync {
    /// Tagged reference identifying this entity
    fn entity_ref(&self) -> EntityRef;

    /// Veto hook: return false to disallow a specific reaction type on
    /// this entity (e.g. no "love" on certain content). Defaults to
    /// allowing every configured type.
    fn can_react(&self, _type_key: &str) -> bool {
        true
    }

    /// Eager-loaded reactions, when the host already fetched them for this
    /// entity. When present, count and current-user lookups aggregate
    /// in memory instead of querying.
    fn loaded_reactions(&self) -> Option<&[Reaction]> {
        None
    }
}

/// An entity that can own comments
pub trait Commentable: Send + Sync {
    /// Tagged reference identifying this entity
    fn entity_ref(&self) -> EntityRef;

    /// Precomputed comment count, when the host batch-counted comments for
    /// a page of entities. When present, `load_count` skips its query.
    fn loaded_comment_count(&self) -> Option<i64> {
        None
    }
}
