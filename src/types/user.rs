//! Users.

use serde::{Deserialize, Serialize};

use crate::types::{
    id::{marker::UserMarker, Id},
    Maybe,
};

/// A Discord user, bot or human.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct User {
    pub id: Id<UserMarker>,
    pub username: String,
    /// `"0"` for accounts migrated to the unique username system.
    #[serde(default = "default_discriminator")]
    pub discriminator: String,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub global_name: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub avatar: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub banner: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub accent_color: Maybe<u32>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub bot: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub system: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub public_flags: Maybe<u64>,
}

fn default_discriminator() -> String {
    "0".to_owned()
}

impl User {
    /// `Username#Discriminator`, or just `Username` for the new username
    /// system.
    pub fn tag(&self) -> String {
        if self.discriminator == "0" {
            self.username.clone()
        } else {
            format!("{}#{}", self.username, self.discriminator)
        }
    }

    /// Returns the CDN URL for the user's avatar, or `None` if no avatar is
    /// set. Animated avatars (hash prefixed `a_`) resolve to a GIF.
    pub fn avatar_url(&self) -> Option<String> {
        let hash = self.avatar.value()?;
        let extension = if hash.starts_with("a_") { "gif" } else { "png" };
        Some(format!(
            "https://cdn.discordapp.com/avatars/{}/{}.{}",
            self.id, hash, extension
        ))
    }

    /// Global display name, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.global_name
            .value()
            .map_or(self.username.as_str(), String::as_str)
    }

    pub fn is_bot(&self) -> bool {
        self.bot.value().copied().unwrap_or(false)
    }

    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::User;
    use crate::types::Maybe;
    use serde_json::json;

    fn user(discriminator: &str, avatar: Option<&str>) -> User {
        serde_json::from_value(json!({
            "id": "80351110224678912",
            "username": "nelly",
            "discriminator": discriminator,
            "avatar": avatar,
        }))
        .unwrap()
    }

    #[test]
    fn tag_omits_migrated_discriminators() {
        assert_eq!(user("0", None).tag(), "nelly");
        assert_eq!(user("1337", None).tag(), "nelly#1337");
    }

    #[test]
    fn avatar_urls() {
        assert_eq!(user("0", None).avatar_url(), None);
        assert_eq!(
            user("0", Some("8342729096ea3675442027381ff50dfe")).avatar_url().unwrap(),
            "https://cdn.discordapp.com/avatars/80351110224678912/8342729096ea3675442027381ff50dfe.png"
        );
        assert!(user("0", Some("a_1234")).avatar_url().unwrap().ends_with(".gif"));
    }

    #[test]
    fn null_avatar_round_trips_as_null() {
        let user = user("0", None);
        assert_eq!(user.avatar, Maybe::Null);
        assert!(user.global_name.is_missing());

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["avatar"], json!(null));
        assert!(value.get("global_name").is_none());
    }
}
