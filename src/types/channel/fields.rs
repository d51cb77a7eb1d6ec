//! Capability blocks.
//!
//! Each block is a serde struct over the subset of channel keys one
//! capability needs. All fields are tri-state: a block deserializes from
//! any channel payload and writes back only what was there.

use serde::{Deserialize, Serialize};

use crate::types::{
    channel::{
        forum::{DefaultReaction, ForumLayout, ForumSortOrder, ForumTag},
        overwrite::PermissionOverwrite,
        thread::ThreadMetadata,
    },
    flags::Permissions,
    id::{
        marker::{ChannelMarker, GuildMarker, MessageMarker, TagMarker, UserMarker},
        Id,
    },
    user::User,
    Maybe, Timestamp,
};

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct GuildFields {
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub guild_id: Maybe<Id<GuildMarker>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub position: Maybe<i64>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub permission_overwrites: Maybe<Vec<PermissionOverwrite>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub topic: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub nsfw: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub permissions: Maybe<Permissions>,
    /// Category for regular channels, parent channel for threads.
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub parent_id: Maybe<Id<ChannelMarker>>,
    /// Slowmode in seconds.
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub rate_limit_per_user: Maybe<u16>,
    /// Minutes of inactivity before new threads archive.
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub default_auto_archive_duration: Maybe<u16>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MessageableFields {
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub last_message_id: Maybe<Id<MessageMarker>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub last_pin_timestamp: Maybe<Timestamp>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AudioFields {
    /// Voice region, `null` for automatic.
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub rtc_region: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub video_quality_mode: Maybe<VideoQualityMode>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub bitrate: Maybe<u32>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub user_limit: Maybe<u32>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ThreadFields {
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub default_thread_rate_limit_per_user: Maybe<u16>,
    /// Approximate, stops counting at 50.
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub message_count: Maybe<u32>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub member_count: Maybe<u32>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub thread_metadata: Maybe<ThreadMetadata>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub owner_id: Maybe<Id<UserMarker>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub applied_tags: Maybe<Vec<Id<TagMarker>>>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ForumFields {
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub default_sort_order: Maybe<ForumSortOrder>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub default_reaction_emoji: Maybe<DefaultReaction>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub available_tags: Maybe<Vec<ForumTag>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub default_forum_layout: Maybe<ForumLayout>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub default_thread_rate_limit_per_user: Maybe<u16>,
}

/// Direct messages and group DMs.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct PrivateFields {
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub recipients: Maybe<Vec<User>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub icon: Maybe<String>,
    /// Creator of a group DM.
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub owner_id: Maybe<Id<UserMarker>>,
}

/// Camera video quality of a voice channel.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u8", into = "u8")]
pub enum VideoQualityMode {
    /// Discord chooses.
    Auto,
    /// 720p.
    Full,
    Unknown(u8),
}

impl From<u8> for VideoQualityMode {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Auto,
            2 => Self::Full,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<VideoQualityMode> for u8 {
    fn from(value: VideoQualityMode) -> Self {
        match value {
            VideoQualityMode::Auto => 1,
            VideoQualityMode::Full => 2,
            VideoQualityMode::Unknown(unknown) => unknown,
        }
    }
}
