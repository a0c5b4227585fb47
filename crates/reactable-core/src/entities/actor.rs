//! Actor and user read models
//!
//! User lifecycle is owned by the host application; this layer only needs
//! an authenticated identity for mutations and a lookup read model for
//! listings.

use crate::value_objects::Snowflake;

/// Authenticated user performing an operation
///
/// Mutating operations take `Option<&Actor>`; `None` means unauthenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: Snowflake,
    pub name: String,
}

impl Actor {
    /// Create a new Actor
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// User read model resolved through the `UserDirectory` port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Snowflake,
    pub name: String,
    pub avatar_url: Option<String>,
}

impl UserProfile {
    /// Create a new UserProfile
    pub fn new(id: Snowflake, name: impl Into<String>, avatar_url: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar_url,
        }
    }
}
