//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use reactable_core::entities::Reaction;
use reactable_core::error::DomainError;
use reactable_core::traits::{ReactionRepository, RepoResult};
use reactable_core::value_objects::{EntityRef, Snowflake};

use crate::mappers::ReactionInsert;
use crate::models::{ReactionCountModel, ReactionModel};

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        entity: &EntityRef,
        user_id: Snowflake,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT id, user_id, reactable_type, reactable_id, type AS type_key, created_at
            FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2 AND user_id = $3
            "#,
        )
        .bind(&entity.entity_type)
        .bind(entity.entity_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Reaction::from))
    }

    #[instrument(skip(self))]
    async fn find_by_entity(&self, entity: &EntityRef) -> RepoResult<Vec<Reaction>> {
        let results = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT id, user_id, reactable_type, reactable_id, type AS type_key, created_at
            FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2
            ORDER BY created_at, id
            "#,
        )
        .bind(&entity.entity_type)
        .bind(entity.entity_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Reaction::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_recent(
        &self,
        entity: &EntityRef,
        type_filter: Option<&str>,
        limit: i64,
    ) -> RepoResult<Vec<Reaction>> {
        let limit = limit.clamp(1, 500);

        let query = if type_filter.is_some() {
            r#"
            SELECT id, user_id, reactable_type, reactable_id, type AS type_key, created_at
            FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2 AND type = $3
            ORDER BY created_at DESC, id DESC
            LIMIT $4
            "#
        } else {
            r#"
            SELECT id, user_id, reactable_type, reactable_id, type AS type_key, created_at
            FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            "#
        };

        let mut q = sqlx::query_as::<_, ReactionModel>(query)
            .bind(&entity.entity_type)
            .bind(entity.entity_id.into_inner());
        if let Some(type_key) = type_filter {
            q = q.bind(type_key);
        }

        let results = q
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Reaction::from).collect())
    }

    #[instrument(skip(self))]
    async fn replace(&self, reaction: &Reaction) -> RepoResult<()> {
        let insert = ReactionInsert::new(reaction);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            DELETE FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2 AND user_id = $3
            "#,
        )
        .bind(insert.reactable_type)
        .bind(insert.reactable_id)
        .bind(insert.user_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO reactions (id, user_id, reactable_type, reactable_id, type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(insert.id)
        .bind(insert.user_id)
        .bind(insert.reactable_type)
        .bind(insert.reactable_id)
        .bind(insert.type_key)
        .bind(reaction.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::DatabaseError("reaction replaced by concurrent writer".to_string())
            })
        })?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_user(&self, entity: &EntityRef, user_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2 AND user_id = $3
            "#,
        )
        .bind(&entity.entity_type)
        .bind(entity.entity_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn count_by_type(&self, entity: &EntityRef) -> RepoResult<Vec<(String, i64)>> {
        let results = sqlx::query_as::<_, ReactionCountModel>(
            r#"
            SELECT type AS type_key, COUNT(*) AS count
            FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2
            GROUP BY type
            "#,
        )
        .bind(&entity.entity_type)
        .bind(entity.entity_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(|r| (r.type_key, r.count)).collect())
    }

    #[instrument(skip(self))]
    async fn count_total(&self, entity: &EntityRef) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2
            "#,
        )
        .bind(&entity.entity_type)
        .bind(entity.entity_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn count_of_type(&self, entity: &EntityRef, type_key: &str) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2 AND type = $3
            "#,
        )
        .bind(&entity.entity_type)
        .bind(entity.entity_id.into_inner())
        .bind(type_key)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self))]
    async fn exists_by_user(&self, entity: &EntityRef, user_id: Snowflake) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM reactions
                WHERE reactable_type = $1 AND reactable_id = $2 AND user_id = $3
            )
            "#,
        )
        .bind(&entity.entity_type)
        .bind(entity.entity_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }
}
