//! Request bodies for changing channels.
//!
//! One struct per editable variant, each listing only the fields Discord
//! accepts for that kind. Build them with struct-update syntax over
//! `Default`: unset fields stay [`Maybe::Missing`] and are left alone,
//! [`Maybe::Null`] clears.

use serde::Serialize;

use crate::types::{
    channel::{
        forum::{DefaultReaction, ForumLayout, ForumSortOrder, ForumTag},
        overwrite::PermissionOverwrite,
        ChannelType, VideoQualityMode,
    },
    flags::ChannelFlags,
    id::{
        marker::{ChannelMarker, TagMarker},
        Id,
    },
    message::CreateMessage,
    Maybe,
};

/// Edit a text or announcement channel.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EditTextChannel {
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub name: Maybe<String>,
    /// Convert between text and announcement channels.
    #[serde(rename = "type", skip_serializing_if = "Maybe::is_missing")]
    pub kind: Maybe<ChannelType>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub position: Maybe<i64>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub topic: Maybe<String>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub nsfw: Maybe<bool>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub rate_limit_per_user: Maybe<u16>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub permission_overwrites: Maybe<Vec<PermissionOverwrite>>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub parent_id: Maybe<Id<ChannelMarker>>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub default_auto_archive_duration: Maybe<u16>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub default_thread_rate_limit_per_user: Maybe<u16>,
}

/// Edit a voice or stage channel.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EditAudioChannel {
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub name: Maybe<String>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub position: Maybe<i64>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub nsfw: Maybe<bool>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub bitrate: Maybe<u32>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub user_limit: Maybe<u32>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub permission_overwrites: Maybe<Vec<PermissionOverwrite>>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub parent_id: Maybe<Id<ChannelMarker>>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub rtc_region: Maybe<String>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub video_quality_mode: Maybe<VideoQualityMode>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EditGroupDm {
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub name: Maybe<String>,
    /// Base64 image data URI.
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub icon: Maybe<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EditCategory {
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub name: Maybe<String>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub position: Maybe<i64>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub permission_overwrites: Maybe<Vec<PermissionOverwrite>>,
}

/// Edit a thread.
///
/// `invitable`, `flags` and `applied_tags` are rejected for announcement
/// threads.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EditThread {
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub name: Maybe<String>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub archived: Maybe<bool>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub auto_archive_duration: Maybe<u16>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub locked: Maybe<bool>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub invitable: Maybe<bool>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub rate_limit_per_user: Maybe<u16>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub flags: Maybe<ChannelFlags>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub applied_tags: Maybe<Vec<Id<TagMarker>>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EditForum {
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub name: Maybe<String>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub position: Maybe<i64>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub topic: Maybe<String>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub nsfw: Maybe<bool>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub rate_limit_per_user: Maybe<u16>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub permission_overwrites: Maybe<Vec<PermissionOverwrite>>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub parent_id: Maybe<Id<ChannelMarker>>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub default_auto_archive_duration: Maybe<u16>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub flags: Maybe<ChannelFlags>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub available_tags: Maybe<Vec<ForumTag>>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub default_reaction_emoji: Maybe<DefaultReaction>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub default_thread_rate_limit_per_user: Maybe<u16>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub default_sort_order: Maybe<ForumSortOrder>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub default_forum_layout: Maybe<ForumLayout>,
}

/// Body for starting a thread or forum post.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CreateThread {
    pub name: String,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub auto_archive_duration: Maybe<u16>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub rate_limit_per_user: Maybe<u16>,
    /// Thread kind when started without a message. Ignored by forums.
    #[serde(rename = "type", skip_serializing_if = "Maybe::is_missing")]
    pub kind: Maybe<ChannelType>,
    /// Whether non-moderators can add others to a private thread.
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub invitable: Maybe<bool>,
    /// Opening message of a forum post.
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub message: Maybe<CreateMessage>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub applied_tags: Maybe<Vec<Id<TagMarker>>>,
}

impl CreateThread {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            auto_archive_duration: Maybe::Missing,
            rate_limit_per_user: Maybe::Missing,
            kind: Maybe::Missing,
            invitable: Maybe::Missing,
            message: Maybe::Missing,
            applied_tags: Maybe::Missing,
        }
    }

    /// The subset accepted when starting from an existing message.
    pub(crate) fn for_existing_message(&self) -> CreateThread {
        Self {
            kind: Maybe::Missing,
            invitable: Maybe::Missing,
            message: Maybe::Missing,
            applied_tags: Maybe::Missing,
            ..self.clone()
        }
    }
}
