//! Comment interaction controller
//!
//! Session state for one entity's comment panel: lazily loaded listing,
//! draft text, inline edit state and the two-phase delete confirmation.
//! Successful mutations are mirrored locally instead of re-fetching.

use tracing::instrument;

use reactable_core::entities::Actor;
use reactable_core::events::DomainEvent;
use reactable_core::traits::Commentable;
use reactable_core::value_objects::Snowflake;

use crate::dto::{CommentEntry, CreateCommentRequest, UpdateCommentRequest};
use crate::services::{CommentStore, ServiceContext, ServiceResult};

/// Comment interaction controller
pub struct CommentController<E: Commentable> {
    ctx: ServiceContext,
    entity: E,
    actor: Option<Actor>,
    items: Vec<CommentEntry>,
    count: i64,
    show_panel: bool,
    new_text: String,
    page_size: i64,
    has_more: bool,
    editing_id: Option<Snowflake>,
    edited_text: String,
    pending_delete_id: Option<Snowflake>,
    loaded: bool,
}

impl<E: Commentable> CommentController<E> {
    /// Create the controller and load the comment count; the listing
    /// itself loads lazily when the panel first opens
    pub async fn mount(
        ctx: ServiceContext,
        entity: E,
        actor: Option<Actor>,
    ) -> ServiceResult<Self> {
        let count = CommentStore::new(&ctx).load_count(&entity).await?;
        let page_size = ctx.config().comments_page_size;

        Ok(Self {
            ctx,
            entity,
            actor,
            items: Vec::new(),
            count,
            show_panel: false,
            new_text: String::new(),
            page_size,
            has_more: false,
            editing_id: None,
            edited_text: String::new(),
            pending_delete_id: None,
            loaded: false,
        })
    }

    /// Toggle the comment panel, loading the first page on first open
    #[instrument(skip(self))]
    pub async fn toggle_comments(&mut self) -> ServiceResult<()> {
        self.show_panel = !self.show_panel;
        if self.show_panel && !self.loaded {
            self.refresh_page().await?;
        }
        Ok(())
    }

    /// Submit the draft text as a new comment.
    ///
    /// On success the row is prepended optimistically with a "just now"
    /// timestamp, the count bumps, the draft clears and the panel opens.
    /// Validation errors surface to the caller; missing authentication
    /// prompts the login modal instead.
    #[instrument(skip(self))]
    pub async fn add_comment(&mut self) -> ServiceResult<()> {
        let Some(actor) = self.actor.clone() else {
            self.prompt_login();
            return Ok(());
        };

        let request = CreateCommentRequest::new(self.new_text.clone());
        let comment = CommentStore::new(&self.ctx)
            .create(&self.entity, &request, Some(&actor))
            .await?;

        self.items.insert(
            0,
            CommentEntry {
                id: comment.id,
                user_id: comment.user_id,
                user_name: actor.name,
                content: comment.content,
                created_at: "just now".to_string(),
                can_delete: true,
            },
        );
        self.count += 1;
        self.new_text.clear();
        self.show_panel = true;
        Ok(())
    }

    /// Enter inline edit mode for one of the viewer's own rows
    pub fn edit_comment(&mut self, id: Snowflake) {
        if let Some(item) = self.items.iter().find(|i| i.id == id && i.can_delete) {
            self.editing_id = Some(id);
            self.edited_text = item.content.clone();
        }
    }

    /// Persist the inline edit.
    ///
    /// A false from the store (non-author or vanished row) just drops the
    /// edit state. Validation errors surface and keep the edit open.
    #[instrument(skip(self))]
    pub async fn update_comment(&mut self) -> ServiceResult<()> {
        let Some(id) = self.editing_id else {
            return Ok(());
        };

        let request = UpdateCommentRequest::new(self.edited_text.clone());
        let result = CommentStore::new(&self.ctx)
            .update(id, &request, self.actor.as_ref())
            .await;

        match result {
            Ok(changed) => {
                if changed {
                    let content = self.edited_text.trim().to_string();
                    if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
                        item.content = content;
                    }
                }
                self.cancel_edit();
                Ok(())
            }
            Err(e) if e.is_authentication() => {
                self.cancel_edit();
                self.prompt_login();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Abandon the inline edit
    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.edited_text.clear();
    }

    /// First phase of deletion: arm the confirmation
    pub fn delete_comment(&mut self, id: Snowflake) {
        self.pending_delete_id = Some(id);
    }

    /// Second phase: actually delete the armed row
    #[instrument(skip(self))]
    pub async fn confirm_delete(&mut self) -> ServiceResult<()> {
        let Some(id) = self.pending_delete_id.take() else {
            return Ok(());
        };
        if self.actor.is_none() {
            self.prompt_login();
            return Ok(());
        }

        let removed = CommentStore::new(&self.ctx)
            .delete(id, self.actor.as_ref())
            .await?;
        if removed {
            self.items.retain(|i| i.id != id);
            self.count = (self.count - 1).max(0);
        }
        Ok(())
    }

    /// Disarm the delete confirmation
    pub fn cancel_delete(&mut self) {
        self.pending_delete_id = None;
    }

    /// Grow the listing window and re-fetch from the top
    #[instrument(skip(self))]
    pub async fn load_more(&mut self) -> ServiceResult<()> {
        self.page_size += self.ctx.config().comments_page_size;
        self.refresh_page().await
    }

    /// Replace the draft text
    pub fn set_new_text(&mut self, text: impl Into<String>) {
        self.new_text = text.into();
    }

    /// Replace the inline-edit text
    pub fn set_edited_text(&mut self, text: impl Into<String>) {
        self.edited_text = text.into();
    }

    pub fn items(&self) -> &[CommentEntry] {
        &self.items
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn show_panel(&self) -> bool {
        self.show_panel
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn new_text(&self) -> &str {
        &self.new_text
    }

    pub fn editing_id(&self) -> Option<Snowflake> {
        self.editing_id
    }

    pub fn edited_text(&self) -> &str {
        &self.edited_text
    }

    pub fn pending_delete_id(&self) -> Option<Snowflake> {
        self.pending_delete_id
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    async fn refresh_page(&mut self) -> ServiceResult<()> {
        let store = CommentStore::new(&self.ctx);
        let page = store
            .load_page(&self.entity, self.page_size, self.actor.as_ref())
            .await?;
        self.count = store.load_count(&self.entity).await?;
        self.items = page.items;
        self.has_more = page.has_more;
        self.loaded = true;
        Ok(())
    }

    fn prompt_login(&self) {
        self.ctx.event_sink().dispatch(DomainEvent::ShowLoginModal);
    }
}
