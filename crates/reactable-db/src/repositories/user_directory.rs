//! PostgreSQL implementation of UserDirectory
//!
//! The users table belongs to the host application. The directory only
//! reads display data: name plus an avatar URL resolved through a
//! configurable fallback chain (configured profile field first, then the
//! `avatar` column).

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use reactable_common::config::ReactableConfig;
use reactable_core::entities::UserProfile;
use reactable_core::traits::{RepoResult, UserDirectory};
use reactable_core::value_objects::Snowflake;

use crate::models::UserProfileModel;

use super::error::map_db_error;

/// PostgreSQL implementation of UserDirectory
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
    query: String,
}

impl PgUserDirectory {
    /// Create a new PgUserDirectory.
    ///
    /// `avatar_field` is a dotted path into the user row: the first segment
    /// names a column, the rest walk into it as a JSON document (e.g.
    /// `profile.image` reads `profile #>> '{image}'`). A single segment
    /// reads the column directly. `None` or an unsafe path disables the
    /// configured lookup and leaves only the `avatar` column fallback.
    pub fn new(pool: PgPool, avatar_field: Option<&str>) -> Self {
        let avatar_expr = avatar_field
            .and_then(build_avatar_expr)
            .unwrap_or_else(|| "NULL".to_string());

        let query = format!(
            "SELECT id, name, {avatar_expr} AS profile_avatar, avatar AS fallback_avatar \
             FROM users WHERE id = ANY($1) ORDER BY id"
        );

        Self { pool, query }
    }

    /// Create a directory using the avatar field from application config
    pub fn from_config(pool: PgPool, config: &ReactableConfig) -> Self {
        Self::new(pool, config.avatar_field.as_deref())
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    #[instrument(skip(self))]
    async fn lookup(&self, ids: &[Snowflake]) -> RepoResult<Vec<UserProfile>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw_ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, UserProfileModel>(&self.query)
            .bind(&raw_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(UserProfile::from).collect())
    }
}

/// Build the SQL expression for the configured avatar field.
///
/// Returns `None` when any path segment contains characters that are not
/// safe to splice into SQL (only `[A-Za-z0-9_]` segments are accepted).
fn build_avatar_expr(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('.').collect();
    let valid = !segments.is_empty()
        && segments.iter().all(|s| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
    if !valid {
        return None;
    }

    let column = segments[0];
    if segments.len() == 1 {
        Some(column.to_string())
    } else {
        let json_path = segments[1..].join(",");
        Some(format!("{column} #>> '{{{json_path}}}'"))
    }
}
