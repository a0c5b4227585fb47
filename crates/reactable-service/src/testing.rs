//! In-memory fixtures for driving stores and controllers without a
//! database.
//!
//! Shipped as a public module (not `#[cfg(test)]`) so the workspace
//! integration tests and host applications' own tests can use them. The
//! repositories mirror the PostgreSQL implementations' observable
//! behavior: newest-first listings, author-gated mutation, delete-then-
//! insert replace.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use reactable_common::ReactableConfig;
use reactable_core::entities::{Comment, Reaction, UserProfile};
use reactable_core::events::{DomainEvent, EventSink};
use reactable_core::traits::{CommentRepository, ReactionRepository, RepoResult, UserDirectory};
use reactable_core::value_objects::{EntityRef, Snowflake};

use crate::services::{ServiceContext, ServiceContextBuilder};

/// In-memory ReactionRepository
#[derive(Default)]
pub struct MemoryReactionRepository {
    rows: Mutex<Vec<Reaction>>,
}

impl MemoryReactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all stored rows (test assertions)
    pub fn rows(&self) -> Vec<Reaction> {
        self.rows.lock().clone()
    }
}

#[async_trait]
impl ReactionRepository for MemoryReactionRepository {
    async fn find_by_user(
        &self,
        entity: &EntityRef,
        user_id: Snowflake,
    ) -> RepoResult<Option<Reaction>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .find(|r| &r.entity == entity && r.user_id == user_id)
            .cloned())
    }

    async fn find_by_entity(&self, entity: &EntityRef) -> RepoResult<Vec<Reaction>> {
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|r| &r.entity == entity)
            .cloned()
            .collect())
    }

    async fn list_recent(
        &self,
        entity: &EntityRef,
        type_filter: Option<&str>,
        limit: i64,
    ) -> RepoResult<Vec<Reaction>> {
        let mut matched: Vec<Reaction> = self
            .rows
            .lock()
            .iter()
            .filter(|r| &r.entity == entity)
            .filter(|r| type_filter.is_none_or(|t| r.is_type(t)))
            .cloned()
            .collect();
        matched.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        matched.truncate(usize::try_from(limit.max(0)).unwrap_or(0));
        Ok(matched)
    }

    async fn replace(&self, reaction: &Reaction) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        rows.retain(|r| !(r.entity == reaction.entity && r.user_id == reaction.user_id));
        rows.push(reaction.clone());
        Ok(())
    }

    async fn delete_by_user(&self, entity: &EntityRef, user_id: Snowflake) -> RepoResult<u64> {
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|r| !(&r.entity == entity && r.user_id == user_id));
        Ok((before - rows.len()) as u64)
    }

    async fn count_by_type(&self, entity: &EntityRef) -> RepoResult<Vec<(String, i64)>> {
        let rows = self.rows.lock();
        let mut grouped: Vec<(String, i64)> = Vec::new();
        for reaction in rows.iter().filter(|r| &r.entity == entity) {
            match grouped.iter_mut().find(|(t, _)| t == &reaction.type_key) {
                Some((_, count)) => *count += 1,
                None => grouped.push((reaction.type_key.clone(), 1)),
            }
        }
        Ok(grouped)
    }

    async fn count_total(&self, entity: &EntityRef) -> RepoResult<i64> {
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|r| &r.entity == entity)
            .count() as i64)
    }

    async fn count_of_type(&self, entity: &EntityRef, type_key: &str) -> RepoResult<i64> {
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|r| &r.entity == entity && r.is_type(type_key))
            .count() as i64)
    }

    async fn exists_by_user(&self, entity: &EntityRef, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self
            .rows
            .lock()
            .iter()
            .any(|r| &r.entity == entity && r.user_id == user_id))
    }
}

/// In-memory CommentRepository
#[derive(Default)]
pub struct MemoryCommentRepository {
    rows: Mutex<Vec<Comment>>,
}

impl MemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all stored rows (test assertions)
    pub fn rows(&self) -> Vec<Comment> {
        self.rows.lock().clone()
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.rows.lock().iter().find(|c| c.id == id).cloned())
    }

    async fn list_page(&self, entity: &EntityRef, limit: i64) -> RepoResult<Vec<Comment>> {
        let mut matched: Vec<Comment> = self
            .rows
            .lock()
            .iter()
            .filter(|c| &c.entity == entity)
            .cloned()
            .collect();
        matched.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        matched.truncate(usize::try_from(limit.max(0)).unwrap_or(0));
        Ok(matched)
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.rows.lock().push(comment.clone());
        Ok(())
    }

    async fn update_content(
        &self,
        id: Snowflake,
        author_id: Snowflake,
        content: &str,
    ) -> RepoResult<bool> {
        let mut rows = self.rows.lock();
        match rows
            .iter_mut()
            .find(|c| c.id == id && c.user_id == author_id)
        {
            Some(comment) => {
                comment.content = content.to_string();
                comment.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_owned(&self, id: Snowflake, author_id: Snowflake) -> RepoResult<bool> {
        let mut rows = self.rows.lock();
        let before = rows.len();
        rows.retain(|c| !(c.id == id && c.user_id == author_id));
        Ok(rows.len() < before)
    }

    async fn count(&self, entity: &EntityRef) -> RepoResult<i64> {
        Ok(self
            .rows
            .lock()
            .iter()
            .filter(|c| &c.entity == entity)
            .count() as i64)
    }

    async fn exists_by_user(&self, entity: &EntityRef, user_id: Snowflake) -> RepoResult<bool> {
        Ok(self
            .rows
            .lock()
            .iter()
            .any(|c| &c.entity == entity && c.user_id == user_id))
    }
}

/// In-memory UserDirectory
#[derive(Default)]
pub struct MemoryUserDirectory {
    users: Mutex<Vec<UserProfile>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user profile for lookups
    pub fn insert(&self, profile: UserProfile) {
        self.users.lock().push(profile);
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn lookup(&self, ids: &[Snowflake]) -> RepoResult<Vec<UserProfile>> {
        Ok(self
            .users
            .lock()
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }
}

/// Event sink that buffers every dispatched event
#[derive(Default)]
pub struct BufferEventSink {
    events: Mutex<Vec<DomainEvent>>,
}

impl BufferEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of dispatched events in order
    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().clone()
    }

    /// Drain the buffer
    pub fn take(&self) -> Vec<DomainEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventSink for BufferEventSink {
    fn dispatch(&self, event: DomainEvent) {
        self.events.lock().push(event);
    }
}

/// Bundle of in-memory dependencies with handles kept for assertions
pub struct MemoryBackend {
    pub reactions: Arc<MemoryReactionRepository>,
    pub comments: Arc<MemoryCommentRepository>,
    pub directory: Arc<MemoryUserDirectory>,
    pub sink: Arc<BufferEventSink>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            reactions: Arc::new(MemoryReactionRepository::new()),
            comments: Arc::new(MemoryCommentRepository::new()),
            directory: Arc::new(MemoryUserDirectory::new()),
            sink: Arc::new(BufferEventSink::new()),
        }
    }

    /// Register a user in the directory
    pub fn add_user(&self, id: Snowflake, name: &str, avatar_url: Option<&str>) {
        self.directory
            .insert(UserProfile::new(id, name, avatar_url.map(String::from)));
    }

    /// Events dispatched so far
    pub fn events(&self) -> Vec<DomainEvent> {
        self.sink.events()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a ServiceContext over a memory backend with the default config
pub fn memory_context(backend: &MemoryBackend) -> ServiceContext {
    memory_context_with(backend, ReactableConfig::default())
}

/// Build a ServiceContext over a memory backend with a custom config
pub fn memory_context_with(backend: &MemoryBackend, config: ReactableConfig) -> ServiceContext {
    ServiceContextBuilder::new()
        .reaction_repo(backend.reactions.clone())
        .comment_repo(backend.comments.clone())
        .user_directory(backend.directory.clone())
        .event_sink(backend.sink.clone())
        .config(config)
        .build()
        .unwrap_or_else(|_| unreachable!("memory backend supplies every dependency"))
}
