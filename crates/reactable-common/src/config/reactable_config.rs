//! Attachment layer configuration
//!
//! The reaction type registry plus display/avatar settings. Supplied by
//! the host application, read-only to the layer. Scalar settings can be
//! overridden from environment variables; the registry itself is defined
//! in host code or deserialized from the host's config file.

use serde::Deserialize;
use std::env;

/// Display metadata for one reaction type
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReactionTypeDef {
    pub icon: String,
    pub label: String,
    pub color: String,
}

impl ReactionTypeDef {
    pub fn new(
        icon: impl Into<String>,
        label: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            icon: icon.into(),
            label: label.into(),
            color: color.into(),
        }
    }
}

/// Ordered registry of configured reaction types
///
/// Order is significant: aggregates are listed in registry order, and the
/// first key is the default type for plain toggle clicks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ReactionTypeRegistry {
    entries: Vec<(String, ReactionTypeDef)>,
}

impl ReactionTypeRegistry {
    /// Build a registry from `(key, definition)` pairs, preserving order
    pub fn new(entries: Vec<(String, ReactionTypeDef)>) -> Self {
        Self { entries }
    }

    /// Whether a type key is configured
    pub fn contains(&self, type_key: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == type_key)
    }

    /// Definition for a type key
    pub fn get(&self, type_key: &str) -> Option<&ReactionTypeDef> {
        self.entries
            .iter()
            .find(|(key, _)| key == type_key)
            .map(|(_, def)| def)
    }

    /// Type keys in registry order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// The implied default type for toggle clicks (first registry entry)
    pub fn default_key(&self) -> Option<&str> {
        self.entries.first().map(|(key, _)| key.as_str())
    }

    /// Number of configured types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no types are configured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, definition)` pairs in registry order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReactionTypeDef)> {
        self.entries.iter().map(|(key, def)| (key.as_str(), def))
    }
}

impl Default for ReactionTypeRegistry {
    /// The shipped registry: like, love, laugh, wow, sad, angry
    fn default() -> Self {
        Self::new(vec![
            ("like".into(), ReactionTypeDef::new("👍", "Like", "blue")),
            ("love".into(), ReactionTypeDef::new("❤️", "Love", "red")),
            ("laugh".into(), ReactionTypeDef::new("😂", "Laugh", "yellow")),
            ("wow".into(), ReactionTypeDef::new("😮", "Wow", "purple")),
            ("sad".into(), ReactionTypeDef::new("😢", "Sad", "blue")),
            ("angry".into(), ReactionTypeDef::new("😠", "Angry", "orange")),
        ])
    }
}

/// View-layer display flags
///
/// These govern rendering only; the stores expose counts and totals
/// regardless of what the view chooses to show.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub show_breakdown: bool,
    #[serde(default = "default_true")]
    pub show_total: bool,
    #[serde(default = "default_true")]
    pub show_tooltips: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_breakdown: true,
            show_total: true,
            show_tooltips: true,
        }
    }
}

/// Main attachment layer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReactableConfig {
    #[serde(default)]
    pub reaction_types: ReactionTypeRegistry,

    #[serde(default)]
    pub display: DisplayConfig,

    /// Dotted path into the user's profile document used to resolve an
    /// avatar URL (e.g. `profile.image`); `None` skips straight to the
    /// user record's own avatar column
    #[serde(default = "default_avatar_field")]
    pub avatar_field: Option<String>,

    /// Whether a comment's own embedded reaction widget is rendered
    /// (view-layer concern; the core is indifferent)
    #[serde(default = "default_true")]
    pub comment_reactions: bool,

    /// Initial page size and "load more" increment for reactor listings
    #[serde(default = "default_reactors_page_size")]
    pub reactors_page_size: i64,

    /// Initial page size and "load more" increment for comment listings
    #[serde(default = "default_comments_page_size")]
    pub comments_page_size: i64,
}

impl Default for ReactableConfig {
    fn default() -> Self {
        Self {
            reaction_types: ReactionTypeRegistry::default(),
            display: DisplayConfig::default(),
            avatar_field: default_avatar_field(),
            comment_reactions: true,
            reactors_page_size: default_reactors_page_size(),
            comments_page_size: default_comments_page_size(),
        }
    }
}

impl ReactableConfig {
    /// Load configuration from environment variables, starting from the
    /// defaults. The registry is not env-configurable.
    ///
    /// # Errors
    /// Returns an error if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(value) = env::var("REACTABLE_SHOW_BREAKDOWN") {
            config.display.show_breakdown = parse_bool("REACTABLE_SHOW_BREAKDOWN", &value)?;
        }
        if let Ok(value) = env::var("REACTABLE_SHOW_TOTAL") {
            config.display.show_total = parse_bool("REACTABLE_SHOW_TOTAL", &value)?;
        }
        if let Ok(value) = env::var("REACTABLE_SHOW_TOOLTIPS") {
            config.display.show_tooltips = parse_bool("REACTABLE_SHOW_TOOLTIPS", &value)?;
        }
        if let Ok(value) = env::var("REACTABLE_COMMENT_REACTIONS") {
            config.comment_reactions = parse_bool("REACTABLE_COMMENT_REACTIONS", &value)?;
        }
        if let Ok(value) = env::var("REACTABLE_AVATAR_FIELD") {
            config.avatar_field = if value.is_empty() { None } else { Some(value) };
        }
        if let Ok(value) = env::var("REACTABLE_REACTORS_PAGE_SIZE") {
            config.reactors_page_size = value
                .parse()
                .map_err(|_| ConfigError::InvalidValue("REACTABLE_REACTORS_PAGE_SIZE", value))?;
        }
        if let Ok(value) = env::var("REACTABLE_COMMENTS_PAGE_SIZE") {
            config.comments_page_size = value
                .parse()
                .map_err(|_| ConfigError::InvalidValue("REACTABLE_COMMENTS_PAGE_SIZE", value))?;
        }

        Ok(config)
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(var, value.to_string())),
    }
}

fn default_true() -> bool {
    true
}

fn default_avatar_field() -> Option<String> {
    Some("profile.image".to_string())
}

fn default_reactors_page_size() -> i64 {
    7
}

fn default_comments_page_size() -> i64 {
    10
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
