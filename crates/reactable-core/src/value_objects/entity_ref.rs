//! EntityRef - tagged reference to a polymorphic host entity

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Snowflake;

/// Tagged reference identifying any host entity that can own reactions or
/// comments: a type tag (e.g. `"post"`, `"media"`) plus the entity's id.
///
/// Resolution back to the concrete entity is the host application's
/// concern; this layer only stores and compares the reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub entity_type: String,
    pub entity_id: Snowflake,
}

impl EntityRef {
    /// Create a new EntityRef
    pub fn new(entity_type: impl Into<String>, entity_id: Snowflake) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id,
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.entity_type, self.entity_id)
    }
}
