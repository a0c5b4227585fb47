//! User directory read model
//!
//! The users table belongs to the host application; this model only reads
//! the columns the directory lookup needs. `profile_avatar` is the value
//! extracted from the JSON profile document at the configured dotted path,
//! `fallback_avatar` the user record's own avatar column.

use sqlx::FromRow;

/// Read model for user directory lookups
#[derive(Debug, Clone, FromRow)]
pub struct UserProfileModel {
    pub id: i64,
    pub name: String,
    pub profile_avatar: Option<String>,
    pub fallback_avatar: Option<String>,
}
