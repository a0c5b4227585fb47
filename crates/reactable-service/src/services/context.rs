//! Service context - dependency container for stores and controllers

use std::sync::Arc;

use reactable_common::ReactableConfig;
use reactable_core::traits::{CommentRepository, ReactionRepository, UserDirectory};
use reactable_core::{EventSink, NullEventSink, Snowflake, SnowflakeGenerator};

/// Service context containing all dependencies
///
/// Handed by reference to every store and controller. It provides access
/// to the repository ports, the user directory, the event sink, the
/// attachment-layer configuration and the Snowflake generator.
#[derive(Clone)]
pub struct ServiceContext {
    reaction_repo: Arc<dyn ReactionRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    user_directory: Arc<dyn UserDirectory>,
    event_sink: Arc<dyn EventSink>,
    config: Arc<ReactableConfig>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        reaction_repo: Arc<dyn ReactionRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        user_directory: Arc<dyn UserDirectory>,
        event_sink: Arc<dyn EventSink>,
        config: Arc<ReactableConfig>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            reaction_repo,
            comment_repo,
            user_directory,
            event_sink,
            config,
            snowflake_generator,
        }
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the user directory
    pub fn user_directory(&self) -> &dyn UserDirectory {
        self.user_directory.as_ref()
    }

    /// Get the event sink
    pub fn event_sink(&self) -> &dyn EventSink {
        self.event_sink.as_ref()
    }

    /// Get the attachment layer configuration
    pub fn config(&self) -> &ReactableConfig {
        self.config.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("config", &self.config)
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
///
/// Repositories and the directory are required; the event sink, config and
/// generator fall back to `NullEventSink`, defaults and worker 0.
pub struct ServiceContextBuilder {
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    user_directory: Option<Arc<dyn UserDirectory>>,
    event_sink: Option<Arc<dyn EventSink>>,
    config: Option<Arc<ReactableConfig>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            reaction_repo: None,
            comment_repo: None,
            user_directory: None,
            event_sink: None,
            config: None,
            snowflake_generator: None,
        }
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn user_directory(mut self, directory: Arc<dyn UserDirectory>) -> Self {
        self.user_directory = Some(directory);
        self
    }

    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    pub fn config(mut self, config: ReactableConfig) -> Self {
        self.config = Some(Arc::new(config));
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.reaction_repo
                .ok_or_else(|| super::error::ServiceError::validation("reaction_repo is required"))?,
            self.comment_repo
                .ok_or_else(|| super::error::ServiceError::validation("comment_repo is required"))?,
            self.user_directory
                .ok_or_else(|| super::error::ServiceError::validation("user_directory is required"))?,
            self.event_sink.unwrap_or_else(|| Arc::new(NullEventSink)),
            self.config.unwrap_or_default(),
            self.snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::new(0))),
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
