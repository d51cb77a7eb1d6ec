//! Guild roles.

use serde::{Deserialize, Serialize};

use crate::types::{
    flags::Permissions,
    id::{
        marker::{IntegrationMarker, RoleMarker, UserMarker},
        Id,
    },
    Maybe,
};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Role {
    pub id: Id<RoleMarker>,
    pub name: String,
    #[serde(default)]
    pub color: u32,
    #[serde(default)]
    pub hoist: bool,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub icon: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub unicode_emoji: Maybe<String>,
    pub position: i64,
    pub permissions: Permissions,
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub mentionable: bool,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub tags: Maybe<RoleTags>,
    #[serde(default)]
    pub flags: u64,
}

impl Role {
    pub fn mention(&self) -> String {
        format!("<@&{}>", self.id)
    }
}

/// Tags describing why a role exists.
///
/// Several tags are booleans encoded by presence: the key is sent with a
/// `null` value when true and omitted otherwise, which is exactly what a
/// [`Maybe<()>`] distinguishes.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoleTags {
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub bot_id: Maybe<Id<UserMarker>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub integration_id: Maybe<Id<IntegrationMarker>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub premium_subscriber: Maybe<()>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub subscription_listing_id: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub available_for_purchase: Maybe<()>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub guild_connections: Maybe<()>,
}

impl RoleTags {
    /// Whether this is the guild's booster role.
    pub const fn is_premium_subscriber(&self) -> bool {
        !self.premium_subscriber.is_missing()
    }

    pub const fn is_available_for_purchase(&self) -> bool {
        !self.available_for_purchase.is_missing()
    }

    /// Whether the role is granted through a linked role connection.
    pub const fn is_guild_connection(&self) -> bool {
        !self.guild_connections.is_missing()
    }
}

#[cfg(test)]
mod tests {
    use super::{Role, RoleTags};
    use crate::types::{flags::Permissions, Maybe};
    use serde_json::json;

    #[test]
    fn presence_tags() {
        let tags: RoleTags = serde_json::from_value(json!({ "premium_subscriber": null })).unwrap();
        assert!(tags.is_premium_subscriber());
        assert!(!tags.is_available_for_purchase());
        assert_eq!(
            serde_json::to_value(&tags).unwrap(),
            json!({ "premium_subscriber": null })
        );
    }

    #[test]
    fn role_from_payload() {
        let role: Role = serde_json::from_value(json!({
            "id": "41771983423143936",
            "name": "WE DEM BOYZZ!!!!!!",
            "color": 3447003,
            "hoist": true,
            "icon": "cf3ced8600b777c9486c6d8d84fb4327",
            "unicode_emoji": null,
            "position": 1,
            "permissions": "66321471",
            "managed": false,
            "mentionable": false,
            "flags": 0
        }))
        .unwrap();

        assert_eq!(role.unicode_emoji, Maybe::Null);
        assert!(role.tags.is_missing());
        assert!(role.permissions.contains(Permissions::MANAGE_CHANNELS));
        assert_eq!(role.mention(), "<@&41771983423143936>");
    }
}
