//! Integration test utilities for the reactable attachment layer
//!
//! Provides host-side entity fixtures and context builders for the
//! end-to-end scenario tests driving the interaction controllers.

pub mod fixtures;

pub use fixtures::*;
