//! # reactable-service
//!
//! Application layer: the reaction/comment aggregate stores, the stateful
//! interaction controllers, DTO row types, and the dependency-container
//! context. The `testing` module ships in-memory repository fixtures so
//! stores and controllers can be driven without a database.

pub mod controllers;
pub mod dto;
pub mod services;
pub mod testing;

pub use controllers::{CommentController, ReactionController};
pub use services::{
    CommentStore, ReactionStore, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult,
};
