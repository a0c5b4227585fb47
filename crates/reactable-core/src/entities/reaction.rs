//! Reaction entity - a typed emoji reaction placed by one user on one entity

use chrono::{DateTime, Utc};

use crate::value_objects::{EntityRef, Snowflake};

/// Reaction entity
///
/// At most one reaction exists per `(user_id, entity)`; switching type is
/// modeled as delete-then-insert, never an in-place update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub entity: EntityRef,
    pub type_key: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(id: Snowflake, entity: EntityRef, user_id: Snowflake, type_key: String) -> Self {
        Self {
            id,
            user_id,
            entity,
            type_key,
            created_at: Utc::now(),
        }
    }

    /// Check if reaction uses a specific type
    #[inline]
    pub fn is_type(&self, type_key: &str) -> bool {
        self.type_key == type_key
    }

    /// Check if reaction was placed by a specific user
    #[inline]
    pub fn is_by(&self, user_id: Snowflake) -> bool {
        self.user_id == user_id
    }
}

/// Count of one reaction type on one entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionCount {
    pub type_key: String,
    pub count: i64,
}

impl ReactionCount {
    /// Create a new ReactionCount
    pub fn new(type_key: impl Into<String>, count: i64) -> Self {
        Self {
            type_key: type_key.into(),
            count,
        }
    }
}

/// Per-entity reaction counts, one entry per configured type in registry
/// order, zero-filled.
///
/// Also serves as the interaction controller's local mirror: `increment`
/// and `decrement` apply the optimistic deltas after a successful persist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionSummary {
    counts: Vec<ReactionCount>,
}

impl ReactionSummary {
    /// Zero-filled summary for the given type keys, preserving their order
    pub fn zeroed<I, S>(type_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            counts: type_keys
                .into_iter()
                .map(|key| ReactionCount::new(key, 0))
                .collect(),
        }
    }

    /// Set the count for a type; keys outside the registry are ignored
    pub fn set(&mut self, type_key: &str, count: i64) {
        if let Some(entry) = self.counts.iter_mut().find(|c| c.type_key == type_key) {
            entry.count = count;
        }
    }

    /// Get the count for a type (0 for unknown keys)
    pub fn get(&self, type_key: &str) -> i64 {
        self.counts
            .iter()
            .find(|c| c.type_key == type_key)
            .map_or(0, |c| c.count)
    }

    /// Increment the count for a type
    pub fn increment(&mut self, type_key: &str) {
        if let Some(entry) = self.counts.iter_mut().find(|c| c.type_key == type_key) {
            entry.count += 1;
        }
    }

    /// Decrement the count for a type, saturating at zero
    pub fn decrement(&mut self, type_key: &str) {
        if let Some(entry) = self.counts.iter_mut().find(|c| c.type_key == type_key) {
            entry.count = (entry.count - 1).max(0);
        }
    }

    /// Sum of all per-type counts
    pub fn total(&self) -> i64 {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Iterate entries in registry order
    pub fn iter(&self) -> impl Iterator<Item = &ReactionCount> {
        self.counts.iter()
    }

    /// Number of configured types
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no types are configured
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<'a> IntoIterator for &'a ReactionSummary {
    type Item = &'a ReactionCount;
    type IntoIter = std::slice::Iter<'a, ReactionCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}
