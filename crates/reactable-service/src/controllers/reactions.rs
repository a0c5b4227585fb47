//! Reaction interaction controller
//!
//! Session state for one entity's reaction widget: local count mirror,
//! the viewer's current reaction, the type picker and the "who reacted"
//! list with its filter and growing page window. Picker and list are
//! mutually exclusive overlays.

use tracing::instrument;

use reactable_core::entities::{Actor, ReactionSummary};
use reactable_core::events::DomainEvent;
use reactable_core::traits::Reactable;

use crate::dto::ReactorEntry;
use crate::services::{ReactionStore, ServiceContext, ServiceResult};

/// Reaction interaction controller
pub struct ReactionController<E: Reactable> {
    ctx: ServiceContext,
    entity: E,
    actor: Option<Actor>,
    counts: ReactionSummary,
    user_reaction: Option<String>,
    picker_open: bool,
    list_open: bool,
    reactors: Vec<ReactorEntry>,
    filter: Option<String>,
    page_size: i64,
}

impl<E: Reactable> ReactionController<E> {
    /// Create the controller and load counts plus the viewer's reaction
    pub async fn mount(
        ctx: ServiceContext,
        entity: E,
        actor: Option<Actor>,
    ) -> ServiceResult<Self> {
        let store = ReactionStore::new(&ctx);
        let counts = store.load_counts(&entity).await?;
        let user_reaction = store
            .load_current_user_reaction(&entity, actor.as_ref())
            .await?;
        let page_size = ctx.config().reactors_page_size;

        Ok(Self {
            ctx,
            entity,
            actor,
            counts,
            user_reaction,
            picker_open: false,
            list_open: false,
            reactors: Vec::new(),
            filter: None,
            page_size,
        })
    }

    /// Plain click on the widget: undo the current reaction, or place the
    /// registry's default type
    #[instrument(skip(self))]
    pub async fn toggle_reaction(&mut self) -> ServiceResult<()> {
        if self.require_actor().is_none() {
            return Ok(());
        }
        if self.user_reaction.is_some() {
            return self.remove_reaction().await;
        }
        let Some(default_key) = self
            .ctx
            .config()
            .reaction_types
            .default_key()
            .map(str::to_string)
        else {
            // Empty registry: nothing to place
            return Ok(());
        };
        self.react(&default_key).await
    }

    /// Place (or switch to) a reaction type.
    ///
    /// Clicking the type already held undoes it. Unknown or vetoed types
    /// are absorbed silently. On success the local counts are adjusted and
    /// the picker closes.
    #[instrument(skip(self))]
    pub async fn react(&mut self, type_key: &str) -> ServiceResult<()> {
        if self.require_actor().is_none() {
            return Ok(());
        }
        if self.user_reaction.as_deref() == Some(type_key) {
            return self.remove_reaction().await;
        }

        let result = ReactionStore::new(&self.ctx)
            .react(&self.entity, self.actor.as_ref(), type_key)
            .await;

        match result {
            Ok(_) => {
                if let Some(previous) = self.user_reaction.take() {
                    self.counts.decrement(&previous);
                }
                self.counts.increment(type_key);
                self.user_reaction = Some(type_key.to_string());
                self.picker_open = false;
                Ok(())
            }
            Err(e) if e.is_silent_no_op() => Ok(()),
            Err(e) if e.is_authentication() => {
                self.prompt_login();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Remove the viewer's reaction, mirroring the removal locally
    #[instrument(skip(self))]
    pub async fn remove_reaction(&mut self) -> ServiceResult<()> {
        if self.require_actor().is_none() {
            return Ok(());
        }

        let removed = ReactionStore::new(&self.ctx)
            .unreact(&self.entity, self.actor.as_ref())
            .await?;
        if removed {
            if let Some(previous) = self.user_reaction.take() {
                self.counts.decrement(&previous);
            }
        } else {
            self.user_reaction = None;
        }
        Ok(())
    }

    /// Toggle the type picker; opening it closes the reactors list
    pub fn toggle_picker(&mut self) {
        self.picker_open = !self.picker_open;
        if self.picker_open {
            self.list_open = false;
        }
    }

    /// Toggle the "who reacted" list; opening it closes the picker,
    /// resets the filter and page window, and loads the first page
    #[instrument(skip(self))]
    pub async fn toggle_reactions_list(&mut self) -> ServiceResult<()> {
        self.list_open = !self.list_open;
        if self.list_open {
            self.picker_open = false;
            self.filter = None;
            self.page_size = self.ctx.config().reactors_page_size;
            self.refresh_reactors().await?;
        }
        Ok(())
    }

    /// Restrict the reactors list to one type (`None` clears the filter)
    #[instrument(skip(self))]
    pub async fn filter_by(&mut self, type_key: Option<&str>) -> ServiceResult<()> {
        self.filter = type_key.map(str::to_string);
        self.refresh_reactors().await
    }

    /// Grow the reactors window and re-fetch from the top
    #[instrument(skip(self))]
    pub async fn load_more(&mut self) -> ServiceResult<()> {
        self.page_size += self.ctx.config().reactors_page_size;
        self.refresh_reactors().await
    }

    /// Sum of the locally mirrored counts
    pub fn total(&self) -> i64 {
        self.counts.total()
    }

    pub fn counts(&self) -> &ReactionSummary {
        &self.counts
    }

    pub fn user_reaction(&self) -> Option<&str> {
        self.user_reaction.as_deref()
    }

    pub fn picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn list_open(&self) -> bool {
        self.list_open
    }

    pub fn reactors(&self) -> &[ReactorEntry] {
        &self.reactors
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    async fn refresh_reactors(&mut self) -> ServiceResult<()> {
        self.reactors = ReactionStore::new(&self.ctx)
            .load_reactors(&self.entity, self.filter.as_deref(), self.page_size)
            .await?;
        Ok(())
    }

    /// Returns the actor, or emits the login-modal event
    fn require_actor(&self) -> Option<&Actor> {
        if self.actor.is_none() {
            self.prompt_login();
        }
        self.actor.as_ref()
    }

    fn prompt_login(&self) {
        self.ctx.event_sink().dispatch(DomainEvent::ShowLoginModal);
    }
}
