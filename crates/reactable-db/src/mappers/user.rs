//! User directory model -> read model mapper
//!
//! Applies the avatar fallback chain: configured profile path first, then
//! the user record's own avatar column, else no avatar.

use reactable_core::entities::UserProfile;
use reactable_core::value_objects::Snowflake;

use crate::models::UserProfileModel;

impl From<UserProfileModel> for UserProfile {
    fn from(model: UserProfileModel) -> Self {
        UserProfile {
            id: Snowflake::new(model.id),
            name: model.name,
            avatar_url: model.profile_avatar.or(model.fallback_avatar),
        }
    }
}
