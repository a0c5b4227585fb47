//! Value objects - immutable types that represent domain concepts

mod entity_ref;
mod snowflake;

pub use entity_ref::EntityRef;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
