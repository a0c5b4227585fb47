//! # reactable-db
//!
//! Database layer implementing the repository ports with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `reactable-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//! - SQL migrations for the `reactions` and `comments` tables
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reactable_db::pool::{create_pool, DatabaseConfig};
//! use reactable_db::PgReactionRepository;
//! use reactable_core::traits::ReactionRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let reaction_repo = PgReactionRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{PgCommentRepository, PgReactionRepository, PgUserDirectory};
