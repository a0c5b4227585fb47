//! Reaction aggregate store
//!
//! Wraps the reaction repository with registry rules, per-user uniqueness
//! (delete-then-insert replace), event dispatch and view-row assembly.
//! When an entity carries eager-loaded reactions, count and current-user
//! lookups aggregate in memory instead of querying.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, instrument};

use reactable_core::entities::{Actor, Reaction, ReactionSummary};
use reactable_core::events::{DomainEvent, ReactionAddedEvent, ReactionRemovedEvent};
use reactable_core::traits::Reactable;
use reactable_core::value_objects::Snowflake;
use reactable_core::DomainError;

use crate::dto::{humanize_ago, ReactorEntry};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction aggregate store
pub struct ReactionStore<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionStore<'a> {
    /// Create a new ReactionStore
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Place (or switch) the actor's reaction on an entity.
    ///
    /// Requires an authenticated actor. The type must be configured and
    /// not vetoed by the entity. Any existing reaction by the same user is
    /// replaced; a duplicate error is never surfaced.
    #[instrument(skip(self, entity, actor), fields(entity = %entity.entity_ref()))]
    pub async fn react(
        &self,
        entity: &dyn Reactable,
        actor: Option<&Actor>,
        type_key: &str,
    ) -> ServiceResult<Reaction> {
        let actor = actor.ok_or(DomainError::AuthenticationRequired)?;

        if !self.ctx.config().reaction_types.contains(type_key) {
            return Err(DomainError::InvalidReactionType(type_key.to_string()).into());
        }
        if !entity.can_react(type_key) {
            return Err(DomainError::ReactionVetoed(type_key.to_string()).into());
        }

        let entity_ref = entity.entity_ref();
        let reaction = Reaction::new(
            self.ctx.generate_id(),
            entity_ref.clone(),
            actor.id,
            type_key.to_string(),
        );
        self.ctx.reaction_repo().replace(&reaction).await?;

        info!(
            entity = %entity_ref,
            user_id = %actor.id,
            type_key = %type_key,
            "Reaction placed"
        );

        self.ctx
            .event_sink()
            .dispatch(DomainEvent::ReactionAdded(ReactionAddedEvent::new(
                entity_ref, type_key,
            )));

        Ok(reaction)
    }

    /// Remove the actor's reaction from an entity.
    ///
    /// Returns false when the actor is unauthenticated or had no reaction
    /// to remove.
    #[instrument(skip(self, entity, actor), fields(entity = %entity.entity_ref()))]
    pub async fn unreact(
        &self,
        entity: &dyn Reactable,
        actor: Option<&Actor>,
    ) -> ServiceResult<bool> {
        let Some(actor) = actor else {
            return Ok(false);
        };

        let entity_ref = entity.entity_ref();
        let Some(existing) = self
            .ctx
            .reaction_repo()
            .find_by_user(&entity_ref, actor.id)
            .await?
        else {
            return Ok(false);
        };

        let removed = self
            .ctx
            .reaction_repo()
            .delete_by_user(&entity_ref, actor.id)
            .await?;
        if removed == 0 {
            return Ok(false);
        }

        info!(
            entity = %entity_ref,
            user_id = %actor.id,
            type_key = %existing.type_key,
            "Reaction removed"
        );

        self.ctx
            .event_sink()
            .dispatch(DomainEvent::ReactionRemoved(ReactionRemovedEvent::new(
                entity_ref,
                existing.type_key,
            )));

        Ok(true)
    }

    /// Whether the user has any reaction on the entity
    pub async fn has_reacted_by(
        &self,
        entity: &dyn Reactable,
        user_id: Snowflake,
    ) -> ServiceResult<bool> {
        if let Some(loaded) = entity.loaded_reactions() {
            return Ok(loaded.iter().any(|r| r.is_by(user_id)));
        }
        Ok(self
            .ctx
            .reaction_repo()
            .exists_by_user(&entity.entity_ref(), user_id)
            .await?)
    }

    /// The type of the user's reaction on the entity, if any
    pub async fn reaction_by(
        &self,
        entity: &dyn Reactable,
        user_id: Snowflake,
    ) -> ServiceResult<Option<String>> {
        if let Some(loaded) = entity.loaded_reactions() {
            return Ok(loaded
                .iter()
                .find(|r| r.is_by(user_id))
                .map(|r| r.type_key.clone()));
        }
        Ok(self
            .ctx
            .reaction_repo()
            .find_by_user(&entity.entity_ref(), user_id)
            .await?
            .map(|r| r.type_key))
    }

    /// Per-type counts in registry order, zero-filled for absent types.
    ///
    /// Unconfigured type keys lingering in storage are not listed.
    #[instrument(skip(self, entity), fields(entity = %entity.entity_ref()))]
    pub async fn load_counts(&self, entity: &dyn Reactable) -> ServiceResult<ReactionSummary> {
        let mut summary = ReactionSummary::zeroed(self.ctx.config().reaction_types.keys());

        if let Some(loaded) = entity.loaded_reactions() {
            let mut grouped: HashMap<&str, i64> = HashMap::new();
            for reaction in loaded {
                *grouped.entry(reaction.type_key.as_str()).or_insert(0) += 1;
            }
            for (type_key, count) in grouped {
                summary.set(type_key, count);
            }
        } else {
            let counts = self
                .ctx
                .reaction_repo()
                .count_by_type(&entity.entity_ref())
                .await?;
            for (type_key, count) in counts {
                summary.set(&type_key, count);
            }
        }

        Ok(summary)
    }

    /// Alias used by the capability mixin surface
    pub async fn reactions_summary(&self, entity: &dyn Reactable) -> ServiceResult<ReactionSummary> {
        self.load_counts(entity).await
    }

    /// The current actor's reaction type, if authenticated and reacted
    pub async fn load_current_user_reaction(
        &self,
        entity: &dyn Reactable,
        actor: Option<&Actor>,
    ) -> ServiceResult<Option<String>> {
        match actor {
            Some(actor) => self.reaction_by(entity, actor.id).await,
            None => Ok(None),
        }
    }

    /// Total reaction rows on the entity
    pub async fn total_reactions_count(&self, entity: &dyn Reactable) -> ServiceResult<i64> {
        if let Some(loaded) = entity.loaded_reactions() {
            return Ok(loaded.len() as i64);
        }
        Ok(self
            .ctx
            .reaction_repo()
            .count_total(&entity.entity_ref())
            .await?)
    }

    /// Reaction rows of one type on the entity
    pub async fn reactions_count_by_type(
        &self,
        entity: &dyn Reactable,
        type_key: &str,
    ) -> ServiceResult<i64> {
        if let Some(loaded) = entity.loaded_reactions() {
            return Ok(loaded.iter().filter(|r| r.is_type(type_key)).count() as i64);
        }
        Ok(self
            .ctx
            .reaction_repo()
            .count_of_type(&entity.entity_ref(), type_key)
            .await?)
    }

    /// Newest-first "who reacted" rows, optionally filtered to one type.
    ///
    /// Always reads from offset 0; "load more" re-fetches with a larger
    /// limit. Users missing from the directory are rendered with a
    /// placeholder name and no avatar.
    #[instrument(skip(self, entity), fields(entity = %entity.entity_ref()))]
    pub async fn load_reactors(
        &self,
        entity: &dyn Reactable,
        filter: Option<&str>,
        limit: i64,
    ) -> ServiceResult<Vec<ReactorEntry>> {
        let reactions = self
            .ctx
            .reaction_repo()
            .list_recent(&entity.entity_ref(), filter, limit)
            .await?;

        let user_ids: Vec<Snowflake> = reactions.iter().map(|r| r.user_id).collect();
        let profiles = self.ctx.user_directory().lookup(&user_ids).await?;
        let by_id: HashMap<Snowflake, _> = profiles.into_iter().map(|p| (p.id, p)).collect();

        let now = Utc::now();
        let entries = reactions
            .into_iter()
            .map(|reaction| {
                let profile = by_id.get(&reaction.user_id);
                ReactorEntry {
                    user_name: profile
                        .map_or_else(|| format!("user#{}", reaction.user_id), |p| p.name.clone()),
                    avatar_url: profile.and_then(|p| p.avatar_url.clone()),
                    type_key: reaction.type_key,
                    reacted_at: humanize_ago(reaction.created_at, now),
                }
            })
            .collect();

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{memory_context, MemoryBackend};
    use reactable_core::value_objects::EntityRef;

    struct Post(Snowflake);

    impl Reactable for Post {
        fn entity_ref(&self) -> EntityRef {
            EntityRef::new("post", self.0)
        }
    }

    struct NoLovePost(Snowflake);

    impl Reactable for NoLovePost {
        fn entity_ref(&self) -> EntityRef {
            EntityRef::new("post", self.0)
        }

        fn can_react(&self, type_key: &str) -> bool {
            type_key != "love"
        }
    }

    fn actor(id: i64) -> Actor {
        Actor::new(Snowflake::new(id), format!("user{id}"))
    }

    #[tokio::test]
    async fn test_react_requires_actor() {
        let backend = MemoryBackend::new();
        let ctx = memory_context(&backend);
        let store = ReactionStore::new(&ctx);
        let post = Post(Snowflake::new(1));

        let err = store.react(&post, None, "like").await.unwrap_err();
        assert!(err.is_authentication());
        assert_eq!(store.total_reactions_count(&post).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_react_rejects_unknown_type() {
        let backend = MemoryBackend::new();
        let ctx = memory_context(&backend);
        let store = ReactionStore::new(&ctx);
        let post = Post(Snowflake::new(1));
        let alice = actor(10);

        let err = store.react(&post, Some(&alice), "meh").await.unwrap_err();
        assert!(err.is_silent_no_op());
    }

    #[tokio::test]
    async fn test_react_honors_entity_veto() {
        let backend = MemoryBackend::new();
        let ctx = memory_context(&backend);
        let store = ReactionStore::new(&ctx);
        let post = NoLovePost(Snowflake::new(1));
        let alice = actor(10);

        assert!(store.react(&post, Some(&alice), "like").await.is_ok());
        let err = store.react(&post, Some(&alice), "love").await.unwrap_err();
        assert!(err.is_silent_no_op());
    }

    #[tokio::test]
    async fn test_react_replaces_existing() {
        let backend = MemoryBackend::new();
        let ctx = memory_context(&backend);
        let store = ReactionStore::new(&ctx);
        let post = Post(Snowflake::new(1));
        let alice = actor(10);

        store.react(&post, Some(&alice), "like").await.unwrap();
        store.react(&post, Some(&alice), "love").await.unwrap();

        assert_eq!(store.total_reactions_count(&post).await.unwrap(), 1);
        assert_eq!(
            store.reaction_by(&post, alice.id).await.unwrap().as_deref(),
            Some("love")
        );

        let events = backend.events();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.event_type() == "REACTION_ADDED"));
    }

    #[tokio::test]
    async fn test_unreact() {
        let backend = MemoryBackend::new();
        let ctx = memory_context(&backend);
        let store = ReactionStore::new(&ctx);
        let post = Post(Snowflake::new(1));
        let alice = actor(10);

        // Nothing to remove yet, and unauthenticated is also false
        assert!(!store.unreact(&post, Some(&alice)).await.unwrap());
        assert!(!store.unreact(&post, None).await.unwrap());

        store.react(&post, Some(&alice), "like").await.unwrap();
        assert!(store.unreact(&post, Some(&alice)).await.unwrap());
        assert!(!store.has_reacted_by(&post, alice.id).await.unwrap());

        let events = backend.events();
        assert_eq!(events.last().unwrap().event_type(), "REACTION_REMOVED");
    }

    #[tokio::test]
    async fn test_counts_are_registry_ordered_and_zero_filled() {
        let backend = MemoryBackend::new();
        let ctx = memory_context(&backend);
        let store = ReactionStore::new(&ctx);
        let post = Post(Snowflake::new(1));

        store.react(&post, Some(&actor(10)), "love").await.unwrap();
        store.react(&post, Some(&actor(11)), "love").await.unwrap();
        store.react(&post, Some(&actor(12)), "sad").await.unwrap();

        let summary = store.load_counts(&post).await.unwrap();
        let keys: Vec<_> = summary.iter().map(|c| c.type_key.as_str()).collect();
        assert_eq!(keys, ["like", "love", "laugh", "wow", "sad", "angry"]);
        assert_eq!(summary.get("love"), 2);
        assert_eq!(summary.get("like"), 0);
        assert_eq!(
            summary.total(),
            store.total_reactions_count(&post).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_loaded_reactions_skip_queries() {
        struct EagerPost {
            id: Snowflake,
            reactions: Vec<Reaction>,
        }

        impl Reactable for EagerPost {
            fn entity_ref(&self) -> EntityRef {
                EntityRef::new("post", self.id)
            }

            fn loaded_reactions(&self) -> Option<&[Reaction]> {
                Some(&self.reactions)
            }
        }

        let backend = MemoryBackend::new();
        let ctx = memory_context(&backend);
        let store = ReactionStore::new(&ctx);

        // Nothing in the repository; everything comes from the eager set
        let id = Snowflake::new(1);
        let post = EagerPost {
            id,
            reactions: vec![
                Reaction::new(
                    Snowflake::new(100),
                    EntityRef::new("post", id),
                    Snowflake::new(10),
                    "like".to_string(),
                ),
                Reaction::new(
                    Snowflake::new(101),
                    EntityRef::new("post", id),
                    Snowflake::new(11),
                    "wow".to_string(),
                ),
            ],
        };

        assert_eq!(store.total_reactions_count(&post).await.unwrap(), 2);
        assert_eq!(
            store
                .reactions_count_by_type(&post, "wow")
                .await
                .unwrap(),
            1
        );
        assert!(store.has_reacted_by(&post, Snowflake::new(10)).await.unwrap());
        let summary = store.load_counts(&post).await.unwrap();
        assert_eq!(summary.get("like"), 1);
        assert_eq!(summary.get("wow"), 1);

        let alice = actor(10);
        assert_eq!(
            store
                .load_current_user_reaction(&post, Some(&alice))
                .await
                .unwrap()
                .as_deref(),
            Some("like")
        );
    }

    #[tokio::test]
    async fn test_load_reactors_with_directory_and_fallback() {
        let backend = MemoryBackend::new();
        backend.add_user(Snowflake::new(10), "Alice", Some("https://img/a.png"));
        let ctx = memory_context(&backend);
        let store = ReactionStore::new(&ctx);
        let post = Post(Snowflake::new(1));

        store.react(&post, Some(&actor(10)), "like").await.unwrap();
        store.react(&post, Some(&actor(99)), "love").await.unwrap();

        let rows = store.load_reactors(&post, None, 10).await.unwrap();
        assert_eq!(rows.len(), 2);
        // Newest first: 99's love landed last
        assert_eq!(rows[0].user_name, "user#99");
        assert!(rows[0].avatar_url.is_none());
        assert_eq!(rows[1].user_name, "Alice");
        assert_eq!(rows[1].avatar_url.as_deref(), Some("https://img/a.png"));
        assert_eq!(rows[1].reacted_at, "just now");

        let filtered = store.load_reactors(&post, Some("like"), 10).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].type_key, "like");
    }
}
