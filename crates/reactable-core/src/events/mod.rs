//! Domain events and the dispatch port

mod domain_event;

pub use domain_event::{
    CommentAddedEvent, CommentDeletedEvent, CommentUpdatedEvent, DomainEvent, EventSink,
    NullEventSink, ReactionAddedEvent, ReactionRemovedEvent,
};
