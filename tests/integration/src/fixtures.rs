//! Test fixtures and data generators
//!
//! Host-side stand-ins: a `Post` entity that opted into both capability
//! traits, unique id generation, and seeded actors/users.

use std::sync::atomic::{AtomicI64, Ordering};

use reactable_core::entities::Actor;
use reactable_core::traits::{Commentable, Reactable};
use reactable_core::value_objects::{EntityRef, Snowflake};
use reactable_service::testing::MemoryBackend;

/// Counter for unique test ids
static COUNTER: AtomicI64 = AtomicI64::new(1_000_000);

/// Get a unique Snowflake for test data
pub fn unique_id() -> Snowflake {
    Snowflake::new(COUNTER.fetch_add(1, Ordering::SeqCst))
}

/// A host application entity carrying reactions and comments
pub struct Post {
    pub id: Snowflake,
}

impl Post {
    pub fn unique() -> Self {
        Self { id: unique_id() }
    }
}

impl Reactable for Post {
    fn entity_ref(&self) -> EntityRef {
        EntityRef::new("post", self.id)
    }
}

impl Commentable for Post {
    fn entity_ref(&self) -> EntityRef {
        EntityRef::new("post", self.id)
    }
}

/// A host entity that vetoes one reaction type
pub struct GuardedPost {
    pub id: Snowflake,
    pub vetoed: &'static str,
}

impl GuardedPost {
    pub fn unique(vetoed: &'static str) -> Self {
        Self {
            id: unique_id(),
            vetoed,
        }
    }
}

impl Reactable for GuardedPost {
    fn entity_ref(&self) -> EntityRef {
        EntityRef::new("post", self.id)
    }

    fn can_react(&self, type_key: &str) -> bool {
        type_key != self.vetoed
    }
}

/// Create an actor and register the matching directory profile
pub fn seeded_actor(backend: &MemoryBackend, name: &str, avatar_url: Option<&str>) -> Actor {
    let id = unique_id();
    backend.add_user(id, name, avatar_url);
    Actor::new(id, name)
}

/// Create an actor with no directory entry (deleted/external user)
pub fn unlisted_actor(name: &str) -> Actor {
    Actor::new(unique_id(), name)
}
