//! Domain events - notifications emitted when reaction/comment state changes
//!
//! Events are fire-and-forget: controllers dispatch them through an
//! [`EventSink`] and never wait on or inspect the outcome. The host
//! application decides what a sink does (toast, websocket fan-out, audit
//! log, nothing).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{EntityRef, Snowflake};

/// All events emitted by the attachment layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    ReactionAdded(ReactionAddedEvent),
    ReactionRemoved(ReactionRemovedEvent),
    CommentAdded(CommentAddedEvent),
    CommentUpdated(CommentUpdatedEvent),
    CommentDeleted(CommentDeletedEvent),
    /// An unauthenticated actor attempted a mutation; the view should
    /// prompt for login instead of failing
    ShowLoginModal,
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ReactionAdded(_) => "REACTION_ADDED",
            Self::ReactionRemoved(_) => "REACTION_REMOVED",
            Self::CommentAdded(_) => "COMMENT_ADDED",
            Self::CommentUpdated(_) => "COMMENT_UPDATED",
            Self::CommentDeleted(_) => "COMMENT_DELETED",
            Self::ShowLoginModal => "SHOW_LOGIN_MODAL",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionAddedEvent {
    pub entity: EntityRef,
    pub type_key: String,
    pub timestamp: DateTime<Utc>,
}

impl ReactionAddedEvent {
    pub fn new(entity: EntityRef, type_key: impl Into<String>) -> Self {
        Self {
            entity,
            type_key: type_key.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionRemovedEvent {
    pub entity: EntityRef,
    pub type_key: String,
    pub timestamp: DateTime<Utc>,
}

impl ReactionRemovedEvent {
    pub fn new(entity: EntityRef, type_key: impl Into<String>) -> Self {
        Self {
            entity,
            type_key: type_key.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentAddedEvent {
    pub entity: EntityRef,
    pub timestamp: DateTime<Utc>,
}

impl CommentAddedEvent {
    pub fn new(entity: EntityRef) -> Self {
        Self {
            entity,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentUpdatedEvent {
    pub entity: EntityRef,
    pub comment_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

impl CommentUpdatedEvent {
    pub fn new(entity: EntityRef, comment_id: Snowflake) -> Self {
        Self {
            entity,
            comment_id,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDeletedEvent {
    pub entity: EntityRef,
    pub comment_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

impl CommentDeletedEvent {
    pub fn new(entity: EntityRef, comment_id: Snowflake) -> Self {
        Self {
            entity,
            comment_id,
            timestamp: Utc::now(),
        }
    }
}

/// Dispatch port for domain events
///
/// Implementations must not block and must not fail loudly; dispatch is
/// fire-and-forget from the caller's perspective.
pub trait EventSink: Send + Sync {
    fn dispatch(&self, event: DomainEvent);
}

/// Sink that drops all events
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn dispatch(&self, _event: DomainEvent) {}
}
