//! Reaction entity <-> model mapper

use reactable_core::entities::Reaction;
use reactable_core::value_objects::{EntityRef, Snowflake};

use crate::models::ReactionModel;

/// Convert ReactionModel to Reaction entity
impl From<ReactionModel> for Reaction {
    fn from(model: ReactionModel) -> Self {
        Reaction {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            entity: EntityRef::new(model.reactable_type, Snowflake::new(model.reactable_id)),
            type_key: model.type_key,
            created_at: model.created_at,
        }
    }
}

/// Convert Reaction entity reference to values for database insertion
pub struct ReactionInsert<'a> {
    pub id: i64,
    pub user_id: i64,
    pub reactable_type: &'a str,
    pub reactable_id: i64,
    pub type_key: &'a str,
}

impl<'a> ReactionInsert<'a> {
    pub fn new(reaction: &'a Reaction) -> Self {
        Self {
            id: reaction.id.into_inner(),
            user_id: reaction.user_id.into_inner(),
            reactable_type: &reaction.entity.entity_type,
            reactable_id: reaction.entity.entity_id.into_inner(),
            type_key: &reaction.type_key,
        }
    }
}
