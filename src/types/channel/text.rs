//! Text and announcement channels.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::Result,
    state::State,
    types::{
        channel::{
            identify_channel,
            modify::{CreateThread, EditTextChannel},
            thread::ArchivedThreads,
            Channel, ChannelBase, ChannelEntity, ChannelType, GuildChannel, GuildFields,
            Messageable, MessageableFields,
        },
        id::{
            marker::{ChannelMarker, MessageMarker, WebhookMarker},
            Id,
        },
        Maybe, Timestamp,
    },
};

channel_entity! {
    /// A guild text channel.
    TextChannel {
        guild: GuildFields,
        messageable: MessageableFields,
    }
}

impl GuildChannel for TextChannel {
    fn guild_fields(&self) -> &GuildFields {
        &self.guild
    }
}

impl Messageable for TextChannel {
    fn messageable_fields(&self) -> &MessageableFields {
        &self.messageable
    }
}

impl TextChannel {
    pub async fn edit(&self, edit: &EditTextChannel, reason: Option<&str>) -> Result<Self> {
        let response = self
            .state
            .http()
            .modify_channel(self.base.id, serde_json::to_value(edit)?, reason)
            .await?;
        Self::from_payload(&response, &self.state)
    }

    /// Start a thread, from `message` if given.
    ///
    /// Without a message the thread kind defaults to a public thread.
    pub async fn create_thread(
        &self,
        message: Option<Id<MessageMarker>>,
        thread: &CreateThread,
        reason: Option<&str>,
    ) -> Result<Channel> {
        self.start_thread(message, thread, ChannelType::PublicThread, reason)
            .await
    }

    async fn start_thread(
        &self,
        message: Option<Id<MessageMarker>>,
        thread: &CreateThread,
        default_kind: ChannelType,
        reason: Option<&str>,
    ) -> Result<Channel> {
        let http = self.state.http();
        let response = match message {
            Some(message_id) => {
                let body = serde_json::to_value(thread.for_existing_message())?;
                http.start_thread_from_message(self.base.id, message_id, body, reason)
                    .await?
            }
            None => {
                let mut thread = thread.clone();
                thread.kind = thread.kind.or(Maybe::Value(default_kind));
                http.start_thread(self.base.id, serde_json::to_value(&thread)?, reason)
                    .await?
            }
        };
        identify_channel(&response, &self.state)
    }

    pub async fn public_archived_threads(
        &self,
        before: Option<&Timestamp>,
        limit: Option<u16>,
    ) -> Result<ArchivedThreads> {
        let page = self
            .state
            .http()
            .list_public_archived_threads(self.base.id, before, limit)
            .await?;
        ArchivedThreads::from_payload(page, &self.state)
    }

    pub async fn private_archived_threads(
        &self,
        before: Option<&Timestamp>,
        limit: Option<u16>,
    ) -> Result<ArchivedThreads> {
        let page = self
            .state
            .http()
            .list_private_archived_threads(self.base.id, before, limit)
            .await?;
        ArchivedThreads::from_payload(page, &self.state)
    }

    /// Private archived threads the current user has joined.
    pub async fn joined_private_archived_threads(
        &self,
        before: Option<&Timestamp>,
        limit: Option<u16>,
    ) -> Result<ArchivedThreads> {
        let page = self
            .state
            .http()
            .list_joined_private_archived_threads(self.base.id, before, limit)
            .await?;
        ArchivedThreads::from_payload(page, &self.state)
    }
}

/// A guild announcement channel: a text channel whose messages other
/// channels can follow.
#[derive(Clone, Debug)]
pub struct AnnouncementChannel {
    text: TextChannel,
}

impl AnnouncementChannel {
    pub fn from_payload(payload: &Value, state: &State) -> Result<Self> {
        TextChannel::from_payload(payload, state).map(|text| Self { text })
    }

    pub fn to_payload(&self) -> Result<Value> {
        self.text.to_payload()
    }

    /// The text-channel view, for listings and other shared operations.
    pub fn as_text(&self) -> &TextChannel {
        &self.text
    }

    pub async fn edit(&self, edit: &EditTextChannel, reason: Option<&str>) -> Result<Self> {
        self.text.edit(edit, reason).await.map(|text| Self { text })
    }

    /// Without a message the thread kind defaults to an announcement thread.
    pub async fn create_thread(
        &self,
        message: Option<Id<MessageMarker>>,
        thread: &CreateThread,
        reason: Option<&str>,
    ) -> Result<Channel> {
        self.text
            .start_thread(message, thread, ChannelType::AnnouncementThread, reason)
            .await
    }

    /// Crosspost this channel's messages into `target` through a webhook.
    pub async fn follow(&self, target: Id<ChannelMarker>) -> Result<FollowedChannel> {
        Ok(self
            .text
            .state
            .http()
            .follow_announcement_channel(self.text.base.id, target)
            .await?)
    }
}

impl ChannelEntity for AnnouncementChannel {
    fn state(&self) -> &State {
        self.text.state()
    }

    fn base(&self) -> &ChannelBase {
        self.text.base()
    }
}

impl GuildChannel for AnnouncementChannel {
    fn guild_fields(&self) -> &GuildFields {
        &self.text.guild
    }
}

impl Messageable for AnnouncementChannel {
    fn messageable_fields(&self) -> &MessageableFields {
        &self.text.messageable
    }
}

/// The webhook created by following an announcement channel.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct FollowedChannel {
    /// The announcement channel.
    pub channel_id: Id<ChannelMarker>,
    pub webhook_id: Id<WebhookMarker>,
}
