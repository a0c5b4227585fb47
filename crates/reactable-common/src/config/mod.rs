//! Configuration

mod reactable_config;

pub use reactable_config::{
    ConfigError, DisplayConfig, ReactableConfig, ReactionTypeDef, ReactionTypeRegistry,
};
