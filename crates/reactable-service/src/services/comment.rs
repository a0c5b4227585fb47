//! Comment aggregate store
//!
//! Wraps the comment repository with authentication, content validation,
//! author-gated mutation and event dispatch. Author checks ride on the
//! repository's `WHERE user_id` predicates, so non-author and missing are
//! indistinguishable (both read as false).

use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use reactable_core::entities::{Actor, Comment};
use reactable_core::events::{
    CommentAddedEvent, CommentDeletedEvent, CommentUpdatedEvent, DomainEvent,
};
use reactable_core::traits::Commentable;
use reactable_core::value_objects::Snowflake;
use reactable_core::DomainError;

use crate::dto::{humanize_ago, CommentEntry, CommentsPage, CreateCommentRequest, UpdateCommentRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Comment aggregate store
pub struct CommentStore<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentStore<'a> {
    /// Create a new CommentStore
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a comment on an entity.
    ///
    /// Requires an authenticated actor; content is validated (trimmed
    /// non-empty, length-capped, tag-free). Returns the stored comment so
    /// the caller can prepend it optimistically.
    #[instrument(skip(self, entity, actor, request), fields(entity = %entity.entity_ref()))]
    pub async fn create(
        &self,
        entity: &dyn Commentable,
        request: &CreateCommentRequest,
        actor: Option<&Actor>,
    ) -> ServiceResult<Comment> {
        let actor = actor.ok_or(DomainError::AuthenticationRequired)?;
        request.validate()?;
        let content = Comment::validate_content(&request.content)?;

        let entity_ref = entity.entity_ref();
        let comment = Comment::new(self.ctx.generate_id(), entity_ref.clone(), actor.id, content);
        self.ctx.comment_repo().create(&comment).await?;

        info!(
            entity = %entity_ref,
            comment_id = %comment.id,
            user_id = %actor.id,
            "Comment created"
        );

        self.ctx
            .event_sink()
            .dispatch(DomainEvent::CommentAdded(CommentAddedEvent::new(entity_ref)));

        Ok(comment)
    }

    /// Update a comment's content.
    ///
    /// Author-only; returns false when the comment is missing or the actor
    /// is not its author. Content is re-validated.
    #[instrument(skip(self, actor, request))]
    pub async fn update(
        &self,
        id: Snowflake,
        request: &UpdateCommentRequest,
        actor: Option<&Actor>,
    ) -> ServiceResult<bool> {
        let actor = actor.ok_or(DomainError::AuthenticationRequired)?;
        request.validate()?;
        let content = Comment::validate_content(&request.content)?;

        let Some(existing) = self.ctx.comment_repo().find_by_id(id).await? else {
            return Ok(false);
        };

        let changed = self
            .ctx
            .comment_repo()
            .update_content(id, actor.id, &content)
            .await?;
        if !changed {
            return Ok(false);
        }

        info!(comment_id = %id, user_id = %actor.id, "Comment updated");

        self.ctx
            .event_sink()
            .dispatch(DomainEvent::CommentUpdated(CommentUpdatedEvent::new(
                existing.entity,
                id,
            )));

        Ok(true)
    }

    /// Delete a comment.
    ///
    /// Author-only; returns false when the comment is missing or the actor
    /// is not its author.
    #[instrument(skip(self, actor))]
    pub async fn delete(&self, id: Snowflake, actor: Option<&Actor>) -> ServiceResult<bool> {
        let actor = actor.ok_or(DomainError::AuthenticationRequired)?;

        let Some(existing) = self.ctx.comment_repo().find_by_id(id).await? else {
            return Ok(false);
        };

        let removed = self.ctx.comment_repo().delete_owned(id, actor.id).await?;
        if !removed {
            return Ok(false);
        }

        info!(comment_id = %id, user_id = %actor.id, "Comment deleted");

        self.ctx
            .event_sink()
            .dispatch(DomainEvent::CommentDeleted(CommentDeletedEvent::new(
                existing.entity,
                id,
            )));

        Ok(true)
    }

    /// Mixin alias: create from raw content
    pub async fn add_comment(
        &self,
        entity: &dyn Commentable,
        content: &str,
        actor: Option<&Actor>,
    ) -> ServiceResult<Comment> {
        self.create(entity, &CreateCommentRequest::new(content), actor)
            .await
    }

    /// Mixin alias: author-only delete, absorbing missing auth to false
    pub async fn remove_comment(
        &self,
        id: Snowflake,
        actor: Option<&Actor>,
    ) -> ServiceResult<bool> {
        if actor.is_none() {
            return Ok(false);
        }
        self.delete(id, actor).await
    }

    /// Whether the user has commented on the entity
    pub async fn has_commented_by(
        &self,
        entity: &dyn Commentable,
        user_id: Snowflake,
    ) -> ServiceResult<bool> {
        Ok(self
            .ctx
            .comment_repo()
            .exists_by_user(&entity.entity_ref(), user_id)
            .await?)
    }

    /// Total comments on the entity, preferring a precomputed count
    pub async fn load_count(&self, entity: &dyn Commentable) -> ServiceResult<i64> {
        if let Some(count) = entity.loaded_comment_count() {
            return Ok(count);
        }
        Ok(self.ctx.comment_repo().count(&entity.entity_ref()).await?)
    }

    /// Mixin alias for [`load_count`](Self::load_count)
    pub async fn comments_count(&self, entity: &dyn Commentable) -> ServiceResult<i64> {
        self.load_count(entity).await
    }

    /// Newest-first page of view-ready comment rows.
    ///
    /// Always reads from offset 0 with the given limit; "load more"
    /// re-fetches with a larger window. `can_delete` is computed against
    /// the viewing actor.
    #[instrument(skip(self, entity, viewer), fields(entity = %entity.entity_ref()))]
    pub async fn load_page(
        &self,
        entity: &dyn Commentable,
        limit: i64,
        viewer: Option<&Actor>,
    ) -> ServiceResult<CommentsPage> {
        let entity_ref = entity.entity_ref();
        let comments = self.ctx.comment_repo().list_page(&entity_ref, limit).await?;
        let total = self.ctx.comment_repo().count(&entity_ref).await?;

        let user_ids: Vec<Snowflake> = comments.iter().map(|c| c.user_id).collect();
        let profiles = self.ctx.user_directory().lookup(&user_ids).await?;
        let by_id: HashMap<Snowflake, _> = profiles.into_iter().map(|p| (p.id, p)).collect();

        let viewer_id = viewer.map(|a| a.id);
        let now = Utc::now();
        let items: Vec<CommentEntry> = comments
            .into_iter()
            .map(|comment| CommentEntry {
                id: comment.id,
                user_id: comment.user_id,
                user_name: by_id
                    .get(&comment.user_id)
                    .map_or_else(|| format!("user#{}", comment.user_id), |p| p.name.clone()),
                can_delete: viewer_id == Some(comment.user_id),
                created_at: humanize_ago(comment.created_at, now),
                content: comment.content,
            })
            .collect();

        let has_more = total > items.len() as i64;
        Ok(CommentsPage { items, has_more })
    }
}
