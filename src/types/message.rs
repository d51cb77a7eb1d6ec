//! Messages: the read model Discord returns and the body we send.

use serde::{Deserialize, Serialize};

use crate::types::{
    attachment::Attachment,
    id::{
        marker::{ChannelMarker, GuildMarker, MessageMarker, RoleMarker, UserMarker, WebhookMarker},
        Id,
    },
    user::User,
    Maybe, Timestamp,
};

/// A message as received from the API.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Message {
    pub id: Id<MessageMarker>,
    pub channel_id: Id<ChannelMarker>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub guild_id: Maybe<Id<GuildMarker>>,
    pub author: User,
    #[serde(default)]
    pub content: String,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub edited_timestamp: Maybe<Timestamp>,
    #[serde(default)]
    pub tts: bool,
    #[serde(default)]
    pub mention_everyone: bool,
    #[serde(default)]
    pub mentions: Vec<User>,
    #[serde(default)]
    pub mention_roles: Vec<Id<RoleMarker>>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub webhook_id: Maybe<Id<WebhookMarker>>,
    #[serde(rename = "type", default)]
    pub kind: u8,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub flags: Maybe<u64>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub message_reference: Maybe<MessageReference>,
}

impl Message {
    /// Whether a given user ID is mentioned in the message.
    pub fn mentions_user(&self, user_id: Id<UserMarker>) -> bool {
        self.mentions.iter().any(|user| user.id == user_id)
    }

    /// Link to the message in the client.
    pub fn jump_url(&self) -> String {
        let guild = self
            .guild_id
            .value()
            .map_or_else(|| "@me".to_owned(), ToString::to_string);
        format!(
            "https://discord.com/channels/{}/{}/{}",
            guild, self.channel_id, self.id
        )
    }
}

/// Reference to another message, used for replies and crossposts.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MessageReference {
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub message_id: Maybe<Id<MessageMarker>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub channel_id: Maybe<Id<ChannelMarker>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub guild_id: Maybe<Id<GuildMarker>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub fail_if_not_exists: Maybe<bool>,
}

/// Body for creating a new message via the REST API.
///
/// ```ignore
/// let msg = CreateMessage::new()
///     .content("Hello!")
///     .reply_to(message_id);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CreateMessage {
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub content: Maybe<String>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub tts: Maybe<bool>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub message_reference: Maybe<MessageReference>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub allowed_mentions: Maybe<AllowedMentions>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub flags: Maybe<u64>,
}

impl CreateMessage {
    /// Create a new empty message body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text content of the message.
    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.content = Maybe::Value(text.into());
        self
    }

    pub fn tts(mut self, tts: bool) -> Self {
        self.tts = Maybe::Value(tts);
        self
    }

    /// Mark the message as a reply to another message.
    pub fn reply_to(mut self, message_id: Id<MessageMarker>) -> Self {
        self.message_reference = Maybe::Value(MessageReference {
            message_id: Maybe::Value(message_id),
            fail_if_not_exists: Maybe::Value(false),
            ..MessageReference::default()
        });
        self
    }

    pub fn allowed_mentions(mut self, allowed: AllowedMentions) -> Self {
        self.allowed_mentions = Maybe::Value(allowed);
        self
    }

    pub fn flags(mut self, flags: u64) -> Self {
        self.flags = Maybe::Value(flags);
        self
    }
}

/// Controls which mentions in `content` actually ping.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AllowedMentions {
    /// Any of `"roles"`, `"users"` and `"everyone"`.
    #[serde(default)]
    pub parse: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Id<RoleMarker>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<Id<UserMarker>>,
    #[serde(default)]
    pub replied_user: bool,
}

impl AllowedMentions {
    /// Suppress every mention.
    pub fn none() -> Self {
        Self::default()
    }
}
