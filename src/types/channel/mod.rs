//! Channels.
//!
//! Discord sends every kind of channel as one object discriminated by its
//! `type` field. Each kind carries a different subset of fields, so a
//! channel here is a [`ChannelBase`] plus the capability blocks its kind
//! supports, all deserialized from the same payload. [`identify_channel`]
//! picks the concrete variant; the capability traits ([`GuildChannel`],
//! [`Messageable`], [`AudioChannel`]) expose behavior shared across
//! variants.
//!
//! Every value is an immutable snapshot: operations that change a channel
//! return a fresh value built from the API's response.

/// Declare a channel variant made of a base and a fixed set of capability
/// blocks, with payload conversions in both directions.
macro_rules! channel_entity {
    (
        $(#[$meta:meta])*
        $name:ident { $($field:ident: $block:ty),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            state: $crate::state::State,
            base: $crate::types::channel::ChannelBase,
            $($field: $block,)*
        }

        impl $name {
            /// Build from a channel payload. The `type` field is not checked.
            pub fn from_payload(
                payload: &::serde_json::Value,
                state: &$crate::state::State,
            ) -> $crate::error::Result<Self> {
                use ::serde::Deserialize;

                Ok(Self {
                    state: state.clone(),
                    base: $crate::types::channel::ChannelBase::deserialize(payload)?,
                    $($field: <$block>::deserialize(payload)?,)*
                })
            }

            /// Merge the blocks back into one payload. Missing fields are
            /// omitted; explicit nulls are kept.
            pub fn to_payload(&self) -> $crate::error::Result<::serde_json::Value> {
                Ok($crate::types::util::merge_objects([
                    ::serde_json::to_value(&self.base)?,
                    $(::serde_json::to_value(&self.$field)?,)*
                ]))
            }

            $(
                pub fn $field(&self) -> &$block {
                    &self.$field
                }
            )*
        }

        impl $crate::types::channel::ChannelEntity for $name {
            fn state(&self) -> &$crate::state::State {
                &self.state
            }

            fn base(&self) -> &$crate::types::channel::ChannelBase {
                &self.base
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("base", &self.base)
                    $(.field(stringify!($field), &self.$field))*
                    .finish()
            }
        }
    };
}

mod category;
mod fields;
mod forum;
mod modify;
mod overwrite;
mod private;
mod text;
mod thread;
mod voice;

pub use self::{
    category::{BaseChannel, CategoryChannel, DirectoryChannel},
    fields::{
        AudioFields, ForumFields, GuildFields, MessageableFields, PrivateFields, ThreadFields,
        VideoQualityMode,
    },
    forum::{DefaultReaction, ForumChannel, ForumLayout, ForumSortOrder, ForumTag},
    modify::{
        CreateThread, EditAudioChannel, EditCategory, EditForum, EditGroupDm, EditTextChannel,
        EditThread,
    },
    overwrite::{OverwriteType, PermissionOverwrite},
    private::{DmChannel, GroupDmChannel},
    text::{AnnouncementChannel, FollowedChannel, TextChannel},
    thread::{ArchivedThreads, ThreadChannel, ThreadMember, ThreadMetadata},
    voice::VoiceChannel,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::{
    error::Result,
    state::State,
    types::{
        flags::{ChannelFlags, Permissions},
        id::{
            marker::{ChannelMarker, GenericMarker, GuildMarker, MessageMarker},
            Id,
        },
        message::{CreateMessage, Message},
        Maybe,
    },
};

/// The wire discriminant of a channel.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "i64", into = "i64")]
pub enum ChannelType {
    GuildText,
    Private,
    GuildVoice,
    Group,
    GuildCategory,
    GuildAnnouncement,
    AnnouncementThread,
    PublicThread,
    PrivateThread,
    GuildStageVoice,
    GuildDirectory,
    GuildForum,
    /// A discriminant this crate doesn't know. Preserved for round trips.
    Unknown(i64),
}

impl ChannelType {
    /// Whether the channel is one of the three thread kinds.
    pub const fn is_thread(self) -> bool {
        matches!(
            self,
            Self::AnnouncementThread | Self::PublicThread | Self::PrivateThread
        )
    }
}

impl From<i64> for ChannelType {
    fn from(value: i64) -> Self {
        match value {
            0 => Self::GuildText,
            1 => Self::Private,
            2 => Self::GuildVoice,
            3 => Self::Group,
            4 => Self::GuildCategory,
            5 => Self::GuildAnnouncement,
            10 => Self::AnnouncementThread,
            11 => Self::PublicThread,
            12 => Self::PrivateThread,
            13 => Self::GuildStageVoice,
            14 => Self::GuildDirectory,
            15 => Self::GuildForum,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<ChannelType> for i64 {
    fn from(value: ChannelType) -> Self {
        match value {
            ChannelType::GuildText => 0,
            ChannelType::Private => 1,
            ChannelType::GuildVoice => 2,
            ChannelType::Group => 3,
            ChannelType::GuildCategory => 4,
            ChannelType::GuildAnnouncement => 5,
            ChannelType::AnnouncementThread => 10,
            ChannelType::PublicThread => 11,
            ChannelType::PrivateThread => 12,
            ChannelType::GuildStageVoice => 13,
            ChannelType::GuildDirectory => 14,
            ChannelType::GuildForum => 15,
            ChannelType::Unknown(unknown) => unknown,
        }
    }
}

/// Fields every channel has.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ChannelBase {
    pub id: Id<ChannelMarker>,
    #[serde(rename = "type")]
    pub kind: ChannelType,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub name: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub flags: Maybe<ChannelFlags>,
}

/// Behavior shared by every channel variant.
#[async_trait]
pub trait ChannelEntity: Send + Sync {
    fn state(&self) -> &State;

    fn base(&self) -> &ChannelBase;

    fn id(&self) -> Id<ChannelMarker> {
        self.base().id
    }

    fn kind(&self) -> ChannelType {
        self.base().kind
    }

    fn mention(&self) -> String {
        format!("<#{}>", self.base().id)
    }

    /// Delete the channel, or close it for DMs.
    async fn delete(&self, reason: Option<&str>) -> Result<()> {
        self.state()
            .http()
            .delete_channel(self.base().id, reason)
            .await?;
        Ok(())
    }
}

/// Channels that live in a guild.
#[async_trait]
pub trait GuildChannel: ChannelEntity {
    fn guild_fields(&self) -> &GuildFields;

    fn guild_id(&self) -> Option<Id<GuildMarker>> {
        self.guild_fields().guild_id.value().copied()
    }

    fn parent_id(&self) -> Option<Id<ChannelMarker>> {
        self.guild_fields().parent_id.value().copied()
    }

    /// Permissions of the invoking user, only present on channels resolved
    /// inside an interaction.
    fn permissions(&self) -> Option<Permissions> {
        self.guild_fields().permissions.value().copied()
    }

    /// Create or replace one permission overwrite.
    async fn set_permission(
        &self,
        overwrite: &PermissionOverwrite,
        reason: Option<&str>,
    ) -> Result<()> {
        self.state()
            .http()
            .edit_channel_permissions(self.base().id, overwrite, reason)
            .await?;
        Ok(())
    }

    async fn delete_permission(
        &self,
        overwrite_id: Id<GenericMarker>,
        reason: Option<&str>,
    ) -> Result<()> {
        self.state()
            .http()
            .delete_channel_permission(self.base().id, overwrite_id, reason)
            .await?;
        Ok(())
    }
}

/// Channels that hold messages.
#[async_trait]
pub trait Messageable: ChannelEntity {
    fn messageable_fields(&self) -> &MessageableFields;

    async fn send(&self, message: &CreateMessage) -> Result<Message> {
        Ok(self
            .state()
            .http()
            .create_message(self.base().id, message)
            .await?)
    }

    /// Delete 2 to 100 messages no older than two weeks in one call.
    async fn bulk_delete(
        &self,
        message_ids: &[Id<MessageMarker>],
        reason: Option<&str>,
    ) -> Result<()> {
        self.state()
            .http()
            .bulk_delete_messages(self.base().id, message_ids, reason)
            .await?;
        Ok(())
    }

    async fn pinned_messages(&self) -> Result<Vec<Message>> {
        Ok(self
            .state()
            .http()
            .get_pinned_messages(self.base().id)
            .await?)
    }

    async fn pin(&self, message_id: Id<MessageMarker>, reason: Option<&str>) -> Result<()> {
        self.state()
            .http()
            .pin_message(self.base().id, message_id, reason)
            .await?;
        Ok(())
    }

    async fn unpin(&self, message_id: Id<MessageMarker>, reason: Option<&str>) -> Result<()> {
        self.state()
            .http()
            .unpin_message(self.base().id, message_id, reason)
            .await?;
        Ok(())
    }
}

/// Voice and stage channels.
pub trait AudioChannel: GuildChannel {
    fn audio_fields(&self) -> &AudioFields;

    fn bitrate(&self) -> Option<u32> {
        self.audio_fields().bitrate.value().copied()
    }

    fn user_limit(&self) -> Option<u32> {
        self.audio_fields().user_limit.value().copied()
    }
}

/// A channel of any kind.
#[derive(Clone, Debug)]
pub enum Channel {
    Text(TextChannel),
    Dm(DmChannel),
    Voice(VoiceChannel),
    GroupDm(GroupDmChannel),
    Category(CategoryChannel),
    Announcement(AnnouncementChannel),
    AnnouncementThread(ThreadChannel),
    /// Public (11) and private (12) threads.
    Thread(ThreadChannel),
    Stage(VoiceChannel),
    Directory(DirectoryChannel),
    Forum(ForumChannel),
    /// A kind this crate doesn't model.
    Base(BaseChannel),
}

impl Channel {
    fn entity(&self) -> &dyn ChannelEntity {
        match self {
            Self::Text(channel) => channel,
            Self::Dm(channel) => channel,
            Self::Voice(channel) | Self::Stage(channel) => channel,
            Self::GroupDm(channel) => channel,
            Self::Category(channel) => channel,
            Self::Announcement(channel) => channel,
            Self::AnnouncementThread(channel) | Self::Thread(channel) => channel,
            Self::Directory(channel) => channel,
            Self::Forum(channel) => channel,
            Self::Base(channel) => channel,
        }
    }

    pub fn base(&self) -> &ChannelBase {
        self.entity().base()
    }

    pub fn id(&self) -> Id<ChannelMarker> {
        self.base().id
    }

    pub fn kind(&self) -> ChannelType {
        self.base().kind
    }

    pub fn to_payload(&self) -> Result<Value> {
        match self {
            Self::Text(channel) => channel.to_payload(),
            Self::Dm(channel) => channel.to_payload(),
            Self::Voice(channel) | Self::Stage(channel) => channel.to_payload(),
            Self::GroupDm(channel) => channel.to_payload(),
            Self::Category(channel) => channel.to_payload(),
            Self::Announcement(channel) => channel.to_payload(),
            Self::AnnouncementThread(channel) | Self::Thread(channel) => channel.to_payload(),
            Self::Directory(channel) => channel.to_payload(),
            Self::Forum(channel) => channel.to_payload(),
            Self::Base(channel) => channel.to_payload(),
        }
    }

    pub async fn delete(&self, reason: Option<&str>) -> Result<()> {
        self.entity().delete(reason).await
    }

    pub fn as_guild(&self) -> Option<&dyn GuildChannel> {
        match self {
            Self::Text(channel) => Some(channel),
            Self::Voice(channel) | Self::Stage(channel) => Some(channel),
            Self::Category(channel) => Some(channel),
            Self::Announcement(channel) => Some(channel),
            Self::AnnouncementThread(channel) | Self::Thread(channel) => Some(channel),
            Self::Directory(channel) => Some(channel),
            Self::Forum(channel) => Some(channel),
            Self::Dm(_) | Self::GroupDm(_) | Self::Base(_) => None,
        }
    }

    pub fn as_messageable(&self) -> Option<&dyn Messageable> {
        match self {
            Self::Text(channel) => Some(channel),
            Self::Dm(channel) => Some(channel),
            Self::Voice(channel) | Self::Stage(channel) => Some(channel),
            Self::GroupDm(channel) => Some(channel),
            Self::Announcement(channel) => Some(channel),
            Self::AnnouncementThread(channel) | Self::Thread(channel) => Some(channel),
            Self::Category(_) | Self::Directory(_) | Self::Forum(_) | Self::Base(_) => None,
        }
    }

    pub fn as_thread(&self) -> Option<&ThreadChannel> {
        match self {
            Self::AnnouncementThread(channel) | Self::Thread(channel) => Some(channel),
            _ => None,
        }
    }
}

/// Build the concrete channel variant for a payload.
///
/// Unknown discriminants produce [`Channel::Base`]. Fails only when the
/// payload itself is malformed, e.g. missing `id` or `type`.
pub fn identify_channel(payload: &Value, state: &State) -> Result<Channel> {
    let base = ChannelBase::deserialize(payload)?;

    Ok(match base.kind {
        ChannelType::GuildText => Channel::Text(TextChannel::from_payload(payload, state)?),
        ChannelType::Private => Channel::Dm(DmChannel::from_payload(payload, state)?),
        ChannelType::GuildVoice => Channel::Voice(VoiceChannel::from_payload(payload, state)?),
        ChannelType::Group => Channel::GroupDm(GroupDmChannel::from_payload(payload, state)?),
        ChannelType::GuildCategory => {
            Channel::Category(CategoryChannel::from_payload(payload, state)?)
        }
        ChannelType::GuildAnnouncement => {
            Channel::Announcement(AnnouncementChannel::from_payload(payload, state)?)
        }
        ChannelType::AnnouncementThread => {
            Channel::AnnouncementThread(ThreadChannel::from_payload(payload, state)?)
        }
        ChannelType::PublicThread | ChannelType::PrivateThread => {
            Channel::Thread(ThreadChannel::from_payload(payload, state)?)
        }
        ChannelType::GuildStageVoice => {
            Channel::Stage(VoiceChannel::from_payload(payload, state)?)
        }
        ChannelType::GuildDirectory => {
            Channel::Directory(DirectoryChannel::from_payload(payload, state)?)
        }
        ChannelType::GuildForum => Channel::Forum(ForumChannel::from_payload(payload, state)?),
        ChannelType::Unknown(kind) => {
            trace!(kind, id = %base.id, "unknown channel type, using the base channel");
            Channel::Base(BaseChannel::from_payload(payload, state)?)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{identify_channel, Channel, ChannelType, Messageable};
    use crate::{
        error::Error,
        http::Method,
        test_util::{state, MockTransport},
        types::{message::CreateMessage, Maybe},
    };
    use serde_json::json;

    fn payload(kind: i64) -> serde_json::Value {
        json!({ "id": "41771983423143937", "type": kind, "name": "general" })
    }

    #[test]
    fn every_code_maps_to_its_variant() {
        let transport = MockTransport::new();
        let state = state(&transport);
        let variant = |kind: i64| identify_channel(&payload(kind), &state).unwrap();

        assert!(matches!(variant(0), Channel::Text(_)));
        assert!(matches!(variant(1), Channel::Dm(_)));
        assert!(matches!(variant(2), Channel::Voice(_)));
        assert!(matches!(variant(3), Channel::GroupDm(_)));
        assert!(matches!(variant(4), Channel::Category(_)));
        assert!(matches!(variant(5), Channel::Announcement(_)));
        assert!(matches!(variant(10), Channel::AnnouncementThread(_)));
        assert!(matches!(variant(11), Channel::Thread(_)));
        assert!(matches!(variant(12), Channel::Thread(_)));
        assert!(matches!(variant(13), Channel::Stage(_)));
        assert!(matches!(variant(14), Channel::Directory(_)));
        assert!(matches!(variant(15), Channel::Forum(_)));
    }

    #[test]
    fn unknown_codes_fall_back_to_the_base_channel() {
        let transport = MockTransport::new();
        let state = state(&transport);

        for kind in [6, 7, 8, 9, 16, 255, 256, 70_000] {
            let channel = identify_channel(&payload(kind), &state).unwrap();
            assert!(matches!(channel, Channel::Base(_)));
            assert_eq!(channel.kind(), ChannelType::Unknown(kind));
            assert_eq!(channel.to_payload().unwrap()["type"], json!(kind));
        }
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn malformed_payloads_are_decode_errors() {
        let transport = MockTransport::new();
        let state = state(&transport);

        let error = identify_channel(&json!({ "type": 0 }), &state).unwrap_err();
        assert!(matches!(error, Error::Decode(_)));
    }

    #[test]
    fn payload_round_trip_keeps_nulls_and_omits_absent_keys() {
        let transport = MockTransport::new();
        let state = state(&transport);
        let original = json!({
            "id": "41771983423143937",
            "type": 0,
            "guild_id": "41771983423143938",
            "name": "general",
            "topic": null,
            "position": 6,
            "permission_overwrites": [],
            "nsfw": true,
            "last_message_id": "155117677105512449",
            "rate_limit_per_user": 2,
            "parent_id": null
        });

        let channel = identify_channel(&original, &state).unwrap();
        let Channel::Text(text) = &channel else {
            panic!("expected a text channel, got {channel:?}");
        };
        assert_eq!(text.guild().topic, Maybe::Null);
        assert!(text.messageable().last_pin_timestamp.is_missing());
        assert_eq!(channel.to_payload().unwrap(), original);
    }

    #[tokio::test]
    async fn send_posts_once_to_the_channel() {
        let transport = MockTransport::new();
        let state = state(&transport);
        let channel = identify_channel(&payload(1), &state).unwrap();
        transport.reply(json!({
            "id": "1",
            "channel_id": "41771983423143937",
            "author": { "id": "2", "username": "bot", "discriminator": "0" },
            "content": "hi",
            "timestamp": "2021-01-01T01:01:01+00:00"
        }));

        let message = channel
            .as_messageable()
            .unwrap()
            .send(&CreateMessage::new().content("hi"))
            .await
            .unwrap();
        assert_eq!(message.content, "hi");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].route.method, Method::Post);
        assert_eq!(requests[0].route.path, "channels/41771983423143937/messages");
    }

    #[test]
    fn capability_views() {
        let transport = MockTransport::new();
        let state = state(&transport);
        let category = identify_channel(&payload(4), &state).unwrap();
        assert!(category.as_guild().is_some());
        assert!(category.as_messageable().is_none());

        let dm = identify_channel(&payload(1), &state).unwrap();
        assert!(dm.as_guild().is_none());
        let _: &dyn Messageable = dm.as_messageable().unwrap();
    }
}
