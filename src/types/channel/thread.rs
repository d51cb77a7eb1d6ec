//! Threads and thread membership.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::Result,
    state::State,
    types::{
        channel::{
            modify::EditThread, GuildChannel, GuildFields, Messageable, MessageableFields,
            ThreadFields,
        },
        id::{
            marker::{ChannelMarker, UserMarker},
            Id,
        },
        member::MemberData,
        Maybe, Timestamp,
    },
};

channel_entity! {
    /// A public, private or announcement thread.
    ThreadChannel {
        guild: GuildFields,
        messageable: MessageableFields,
        thread: ThreadFields,
    }
}

impl GuildChannel for ThreadChannel {
    fn guild_fields(&self) -> &GuildFields {
        &self.guild
    }
}

impl Messageable for ThreadChannel {
    fn messageable_fields(&self) -> &MessageableFields {
        &self.messageable
    }
}

impl ThreadChannel {
    pub fn is_archived(&self) -> bool {
        self.thread
            .thread_metadata
            .value()
            .is_some_and(|metadata| metadata.archived)
    }

    pub async fn edit(&self, edit: &EditThread, reason: Option<&str>) -> Result<Self> {
        let response = self
            .state
            .http()
            .modify_channel(self.base.id, serde_json::to_value(edit)?, reason)
            .await?;
        Self::from_payload(&response, &self.state)
    }

    /// Add the current user to the thread.
    pub async fn join(&self) -> Result<()> {
        self.state.http().join_thread(self.base.id).await?;
        Ok(())
    }

    pub async fn leave(&self) -> Result<()> {
        self.state.http().leave_thread(self.base.id).await?;
        Ok(())
    }

    pub async fn add_member(&self, user_id: Id<UserMarker>) -> Result<()> {
        self.state
            .http()
            .add_thread_member(self.base.id, user_id)
            .await?;
        Ok(())
    }

    pub async fn remove_member(&self, user_id: Id<UserMarker>) -> Result<()> {
        self.state
            .http()
            .remove_thread_member(self.base.id, user_id)
            .await?;
        Ok(())
    }

    pub async fn member(&self, user_id: Id<UserMarker>) -> Result<ThreadMember> {
        Ok(self
            .state
            .http()
            .get_thread_member(self.base.id, user_id)
            .await?)
    }

    pub async fn members(&self) -> Result<Vec<ThreadMember>> {
        Ok(self.state.http().get_thread_members(self.base.id).await?)
    }
}

/// Thread-only state.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ThreadMetadata {
    pub archived: bool,
    /// Minutes of inactivity before the thread archives: 60, 1440, 4320
    /// or 10080.
    pub auto_archive_duration: u16,
    pub archive_timestamp: Timestamp,
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub invitable: Maybe<bool>,
    /// Only set for threads created after 2022-01-09.
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub create_timestamp: Maybe<Timestamp>,
}

/// A user's membership in a thread.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ThreadMember {
    /// Omitted on the member object inside a thread create event.
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub id: Maybe<Id<ChannelMarker>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub user_id: Maybe<Id<UserMarker>>,
    pub join_timestamp: Timestamp,
    #[serde(default)]
    pub flags: u64,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub member: Maybe<MemberData>,
}

/// One page of archived threads.
#[derive(Clone, Debug)]
pub struct ArchivedThreads {
    pub threads: Vec<ThreadChannel>,
    /// The current user's membership in each returned thread they joined.
    pub members: Vec<ThreadMember>,
    pub has_more: bool,
}

#[derive(Deserialize)]
struct RawArchivedThreads {
    threads: Vec<Value>,
    #[serde(default)]
    members: Vec<ThreadMember>,
    #[serde(default)]
    has_more: bool,
}

impl ArchivedThreads {
    pub(crate) fn from_payload(payload: Value, state: &State) -> Result<Self> {
        let raw: RawArchivedThreads = serde_json::from_value(payload)?;
        let threads = raw
            .threads
            .iter()
            .map(|thread| ThreadChannel::from_payload(thread, state))
            .collect::<Result<_>>()?;

        Ok(Self {
            threads,
            members: raw.members,
            has_more: raw.has_more,
        })
    }
}
