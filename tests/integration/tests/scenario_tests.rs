//! End-to-end scenario tests
//!
//! Drive the interaction controllers and aggregate stores over the
//! in-memory backend, the way a host view would.
//!
//! Run with: cargo test -p integration-tests --test scenario_tests

use integration_tests::{seeded_actor, unlisted_actor, GuardedPost, Post};
use reactable_common::{ReactableConfig, ReactionTypeDef, ReactionTypeRegistry};
use reactable_service::testing::{memory_context, memory_context_with, MemoryBackend};
use reactable_service::{CommentController, CommentStore, ReactionController, ReactionStore};

// ============================================================================
// Reaction Scenarios
// ============================================================================

#[tokio::test]
async fn test_full_reaction_widget_session() {
    let backend = MemoryBackend::new();
    let alice = seeded_actor(&backend, "Alice", Some("https://img/a.png"));
    let post = Post::unique();

    let mut widget = ReactionController::mount(memory_context(&backend), post, Some(alice))
        .await
        .unwrap();

    // Pick a type from the picker
    widget.toggle_picker();
    widget.react("love").await.unwrap();
    assert!(!widget.picker_open());
    assert_eq!(widget.user_reaction(), Some("love"));
    assert_eq!(widget.total(), 1);

    // Open the list and inspect the row
    widget.toggle_reactions_list().await.unwrap();
    assert!(widget.list_open());
    assert_eq!(widget.reactors().len(), 1);
    assert_eq!(widget.reactors()[0].user_name, "Alice");
    assert_eq!(widget.reactors()[0].avatar_url.as_deref(), Some("https://img/a.png"));
    assert_eq!(widget.reactors()[0].type_key, "love");
    assert_eq!(widget.reactors()[0].reacted_at, "just now");

    // Switch type, then undo by clicking it again
    widget.react("wow").await.unwrap();
    assert_eq!(widget.user_reaction(), Some("wow"));
    assert_eq!(widget.counts().get("love"), 0);
    widget.react("wow").await.unwrap();
    assert_eq!(widget.user_reaction(), None);
    assert_eq!(widget.total(), 0);

    let types: Vec<&str> = backend
        .events()
        .iter()
        .map(reactable_core::events::DomainEvent::event_type)
        .collect();
    assert_eq!(
        types,
        ["REACTION_ADDED", "REACTION_ADDED", "REACTION_REMOVED"]
    );
}

#[tokio::test]
async fn test_per_user_uniqueness_across_sessions() {
    let backend = MemoryBackend::new();
    let alice = seeded_actor(&backend, "Alice", None);
    let bob = seeded_actor(&backend, "Bob", None);
    let post = Post::unique();
    let ctx = memory_context(&backend);

    let store = ReactionStore::new(&ctx);
    store.react(&post, Some(&alice), "like").await.unwrap();
    store.react(&post, Some(&bob), "like").await.unwrap();
    store.react(&post, Some(&alice), "angry").await.unwrap();

    // Alice's switch replaced her row; Bob's is untouched
    assert_eq!(store.total_reactions_count(&post).await.unwrap(), 2);
    assert_eq!(
        store.reaction_by(&post, alice.id).await.unwrap().as_deref(),
        Some("angry")
    );
    assert_eq!(
        store.reaction_by(&post, bob.id).await.unwrap().as_deref(),
        Some("like")
    );

    // Summary invariant: total equals the sum of per-type counts
    let summary = store.load_counts(&post).await.unwrap();
    assert_eq!(summary.total(), 2);
    assert_eq!(summary.get("like"), 1);
    assert_eq!(summary.get("angry"), 1);
}

#[tokio::test]
async fn test_entity_veto_and_unknown_types_no_op() {
    let backend = MemoryBackend::new();
    let alice = seeded_actor(&backend, "Alice", None);
    let post = GuardedPost::unique("angry");

    let mut widget =
        ReactionController::mount(memory_context(&backend), post, Some(alice))
            .await
            .unwrap();

    widget.react("angry").await.unwrap();
    widget.react("not-a-type").await.unwrap();
    assert_eq!(widget.total(), 0);
    assert!(backend.reactions.rows().is_empty());
    assert!(backend.events().is_empty());
}

#[tokio::test]
async fn test_reactors_list_staleness_window() {
    let backend = MemoryBackend::new();
    let alice = seeded_actor(&backend, "Alice", None);
    let post = Post::unique();
    let ctx = memory_context(&backend);

    let mut widget = ReactionController::mount(
        ctx.clone(),
        Post { id: post.id },
        Some(alice),
    )
    .await
    .unwrap();
    widget.toggle_reactions_list().await.unwrap();
    assert!(widget.reactors().is_empty());

    // Another user reacts after the list was loaded
    let bob = seeded_actor(&backend, "Bob", None);
    ReactionStore::new(&ctx)
        .react(&post, Some(&bob), "like")
        .await
        .unwrap();
    assert!(widget.reactors().is_empty());

    // The next window re-fetch from offset 0 picks it up
    widget.load_more().await.unwrap();
    assert_eq!(widget.reactors().len(), 1);
    assert_eq!(widget.reactors()[0].user_name, "Bob");
}

#[tokio::test]
async fn test_reactor_from_unlisted_user_gets_placeholder() {
    let backend = MemoryBackend::new();
    let ghost = unlisted_actor("Ghost");
    let post = Post::unique();
    let ctx = memory_context(&backend);

    ReactionStore::new(&ctx)
        .react(&post, Some(&ghost), "like")
        .await
        .unwrap();

    let rows = ReactionStore::new(&ctx)
        .load_reactors(&post, None, 7)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_name, format!("user#{}", ghost.id));
    assert!(rows[0].avatar_url.is_none());
}

#[tokio::test]
async fn test_custom_registry_drives_default_and_order() {
    let backend = MemoryBackend::new();
    let alice = seeded_actor(&backend, "Alice", None);

    let config = ReactableConfig {
        reaction_types: ReactionTypeRegistry::new(vec![
            ("up".into(), ReactionTypeDef::new("⬆️", "Up", "green")),
            ("down".into(), ReactionTypeDef::new("⬇️", "Down", "red")),
        ]),
        ..ReactableConfig::default()
    };

    let ctx = memory_context_with(&backend, config);
    let mut widget = ReactionController::mount(ctx, Post::unique(), Some(alice))
        .await
        .unwrap();

    // Plain toggle places the first registry key
    widget.toggle_reaction().await.unwrap();
    assert_eq!(widget.user_reaction(), Some("up"));

    let keys: Vec<&str> = widget.counts().iter().map(|c| c.type_key.as_str()).collect();
    assert_eq!(keys, ["up", "down"]);

    // Types from the shipped default registry are unknown here
    widget.react("like").await.unwrap();
    assert_eq!(widget.user_reaction(), Some("up"));
}

// ============================================================================
// Comment Scenarios
// ============================================================================

#[tokio::test]
async fn test_full_comment_panel_session() {
    let backend = MemoryBackend::new();
    let alice = seeded_actor(&backend, "Alice", None);
    let post = Post::unique();

    let mut panel = CommentController::mount(memory_context(&backend), post, Some(alice))
        .await
        .unwrap();

    panel.toggle_comments().await.unwrap();
    assert!(panel.show_panel());
    assert!(panel.items().is_empty());

    // Add, edit, then two-phase delete
    panel.set_new_text("  First comment  ");
    panel.add_comment().await.unwrap();
    assert_eq!(panel.count(), 1);
    assert_eq!(panel.items()[0].content, "First comment");
    assert_eq!(panel.items()[0].created_at, "just now");

    let id = panel.items()[0].id;
    panel.edit_comment(id);
    panel.set_edited_text("Edited comment");
    panel.update_comment().await.unwrap();
    assert_eq!(panel.items()[0].content, "Edited comment");

    panel.delete_comment(id);
    panel.confirm_delete().await.unwrap();
    assert_eq!(panel.count(), 0);
    assert!(panel.items().is_empty());

    let types: Vec<&str> = backend
        .events()
        .iter()
        .map(reactable_core::events::DomainEvent::event_type)
        .collect();
    assert_eq!(types, ["COMMENT_ADDED", "COMMENT_UPDATED", "COMMENT_DELETED"]);
}

#[tokio::test]
async fn test_comment_validation_rules() {
    let backend = MemoryBackend::new();
    let alice = seeded_actor(&backend, "Alice", None);
    let post = Post::unique();
    let ctx = memory_context(&backend);
    let store = CommentStore::new(&ctx);

    // Markup, blank and over-length are rejected with validation errors
    for bad in [
        "<script>alert(1)</script>hi".to_string(),
        "   ".to_string(),
        "a".repeat(1001),
    ] {
        let err = store.add_comment(&post, &bad, Some(&alice)).await.unwrap_err();
        assert!(!err.is_authentication(), "expected validation for {bad:?}");
    }
    assert_eq!(store.load_count(&post).await.unwrap(), 0);

    // Exactly at the limit is fine
    let comment = store
        .add_comment(&post, &"a".repeat(1000), Some(&alice))
        .await
        .unwrap();
    assert_eq!(comment.content.chars().count(), 1000);
}

#[tokio::test]
async fn test_foreign_comments_cannot_be_touched() {
    let backend = MemoryBackend::new();
    let alice = seeded_actor(&backend, "Alice", None);
    let bob = seeded_actor(&backend, "Bob", None);
    let post = Post::unique();
    let ctx = memory_context(&backend);
    let store = CommentStore::new(&ctx);

    let theirs = store
        .add_comment(&post, "Bob's comment", Some(&bob))
        .await
        .unwrap();

    // Alice's panel renders the row without delete rights
    let mut panel = CommentController::mount(
        ctx.clone(),
        Post { id: post.id },
        Some(alice.clone()),
    )
    .await
    .unwrap();
    panel.toggle_comments().await.unwrap();
    assert_eq!(panel.items().len(), 1);
    assert!(!panel.items()[0].can_delete);

    // Forcing the two-phase delete anyway changes nothing
    panel.delete_comment(theirs.id);
    panel.confirm_delete().await.unwrap();
    assert_eq!(panel.count(), 1);
    assert_eq!(store.load_count(&post).await.unwrap(), 1);
    assert_eq!(backend.comments.rows()[0].content, "Bob's comment");
}

#[tokio::test]
async fn test_comment_paging_grows_by_configured_increment() {
    let backend = MemoryBackend::new();
    let alice = seeded_actor(&backend, "Alice", None);
    let post = Post::unique();
    let ctx = memory_context(&backend);

    let store = CommentStore::new(&ctx);
    for i in 0..25 {
        store
            .add_comment(&post, &format!("comment {i}"), Some(&alice))
            .await
            .unwrap();
    }

    let mut panel = CommentController::mount(ctx, Post { id: post.id }, Some(alice))
        .await
        .unwrap();
    panel.toggle_comments().await.unwrap();
    assert_eq!(panel.items().len(), 10);
    assert!(panel.has_more());
    assert_eq!(panel.items()[0].content, "comment 24");

    panel.load_more().await.unwrap();
    assert_eq!(panel.items().len(), 20);
    assert!(panel.has_more());

    panel.load_more().await.unwrap();
    assert_eq!(panel.items().len(), 25);
    assert!(!panel.has_more());
}

// ============================================================================
// Authentication Scenarios
// ============================================================================

#[tokio::test]
async fn test_anonymous_visitor_is_read_only_with_login_prompts() {
    let backend = MemoryBackend::new();
    let alice = seeded_actor(&backend, "Alice", None);
    let post = Post::unique();
    let ctx = memory_context(&backend);

    ReactionStore::new(&ctx)
        .react(&post, Some(&alice), "like")
        .await
        .unwrap();
    CommentStore::new(&ctx)
        .add_comment(&post, "visible to all", Some(&alice))
        .await
        .unwrap();
    backend.sink.take();

    // Anonymous session: everything reads, nothing mutates
    let mut widget =
        ReactionController::mount(ctx.clone(), Post { id: post.id }, None)
            .await
            .unwrap();
    assert_eq!(widget.total(), 1);
    assert_eq!(widget.user_reaction(), None);
    widget.toggle_reactions_list().await.unwrap();
    assert_eq!(widget.reactors().len(), 1);

    let mut panel = CommentController::mount(ctx, Post { id: post.id }, None)
        .await
        .unwrap();
    panel.toggle_comments().await.unwrap();
    assert_eq!(panel.items().len(), 1);
    assert!(!panel.items()[0].can_delete);

    widget.toggle_reaction().await.unwrap();
    panel.set_new_text("drive-by");
    panel.add_comment().await.unwrap();

    assert_eq!(backend.reactions.rows().len(), 1);
    assert_eq!(backend.comments.rows().len(), 1);
    let events = backend.events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.event_type() == "SHOW_LOGIN_MODAL"));
}
