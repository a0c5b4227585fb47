//! Comment entity <-> model mapper

use reactable_core::entities::Comment;
use reactable_core::value_objects::{EntityRef, Snowflake};

use crate::models::CommentModel;

/// Convert CommentModel to Comment entity
impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            entity: EntityRef::new(model.commentable_type, Snowflake::new(model.commentable_id)),
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert Comment entity reference to values for database insertion
pub struct CommentInsert<'a> {
    pub id: i64,
    pub user_id: i64,
    pub commentable_type: &'a str,
    pub commentable_id: i64,
    pub content: &'a str,
}

impl<'a> CommentInsert<'a> {
    pub fn new(comment: &'a Comment) -> Self {
        Self {
            id: comment.id.into_inner(),
            user_id: comment.user_id.into_inner(),
            commentable_type: &comment.entity.entity_type,
            commentable_id: comment.entity.entity_id.into_inner(),
            content: &comment.content,
        }
    }
}
