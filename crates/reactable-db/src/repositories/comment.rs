//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use reactable_core::entities::Comment;
use reactable_core::traits::{CommentRepository, RepoResult};
use reactable_core::value_objects::{EntityRef, Snowflake};

use crate::mappers::CommentInsert;
use crate::models::CommentModel;

use super::error::map_db_error;

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, user_id, commentable_type, commentable_id, content, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn list_page(&self, entity: &EntityRef, limit: i64) -> RepoResult<Vec<Comment>> {
        let limit = limit.clamp(1, 500);

        let results = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT id, user_id, commentable_type, commentable_id, content, created_at, updated_at
            FROM comments
            WHERE commentable_type = $1 AND commentable_id = $2
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(&entity.entity_type)
        .bind(entity.entity_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self, comment))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let insert = CommentInsert::new(comment);

        sqlx::query(
            r#"
            INSERT INTO comments
                (id, user_id, commentable_type, commentable_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(insert.id)
        .bind(insert.user_id)
        .bind(insert.commentable_type)
        .bind(insert.commentable_id)
        .bind(insert.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, content))]
    async fn update_content(
        &self,
        id: Snowflake,
        author_id: Snowflake,
        content: &str,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET content = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(author_id.into_inner())
        .bind(content)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_owned(&self, id: Snowflake, author_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM comments WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(author_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self, entity: &EntityRef) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM comments
            WHERE commentable_type = $1 AND commentable_id = $2
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
    async fn exists_by_user(&self, entity: &EntityRef, user_id: Snowflake) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM comments
                WHERE commentable_type = $1 AND commentable_id = $2 AND user_id = $3
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
