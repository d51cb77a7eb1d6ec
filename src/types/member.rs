//! Guild members.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::{
    error::{Error, Result},
    state::State,
    types::{
        flags::{MemberFlags, Permissions},
        id::{
            marker::{ChannelMarker, GuildMarker, RoleMarker, UserMarker},
            Id,
        },
        user::User,
        Maybe, Timestamp,
    },
};

/// Wire fields of a guild member.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MemberData {
    /// Omitted when the member is embedded in an object that already
    /// carries the user, e.g. interaction resolved data.
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub user: Maybe<User>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub nick: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub avatar: Maybe<String>,
    #[serde(default)]
    pub roles: Vec<Id<RoleMarker>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub joined_at: Maybe<Timestamp>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub premium_since: Maybe<Timestamp>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub deaf: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub mute: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub pending: Maybe<bool>,
    /// Only sent inside interactions.
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub permissions: Maybe<Permissions>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub communication_disabled_until: Maybe<Timestamp>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub flags: Maybe<MemberFlags>,
}

/// A guild member bound to a session.
///
/// The guild is optional because some payloads embed members without saying
/// which guild they belong to; operations then fail with
/// [`Error::MissingContext`].
#[derive(Clone)]
pub struct Member {
    state: State,
    guild_id: Option<Id<GuildMarker>>,
    data: MemberData,
}

impl Member {
    pub fn from_payload(
        payload: &Value,
        guild_id: Option<Id<GuildMarker>>,
        state: &State,
    ) -> Result<Self> {
        Ok(Self {
            state: state.clone(),
            guild_id,
            data: MemberData::deserialize(payload)?,
        })
    }

    /// Attach the user when the payload arrived without one.
    pub(crate) fn with_user(mut self, user: User) -> Self {
        if !self.data.user.is_value() {
            self.data.user = Maybe::Value(user);
        }
        self
    }

    pub fn to_payload(&self) -> Result<Value> {
        Ok(serde_json::to_value(&self.data)?)
    }

    pub fn data(&self) -> &MemberData {
        &self.data
    }

    pub const fn guild_id(&self) -> Option<Id<GuildMarker>> {
        self.guild_id
    }

    pub fn user(&self) -> Result<&User> {
        self.data
            .user
            .value()
            .ok_or(Error::MissingContext("member user"))
    }

    pub fn id(&self) -> Result<Id<UserMarker>> {
        self.user().map(|user| user.id)
    }

    /// Nickname, falling back to the user's display name.
    pub fn display_name(&self) -> Option<&str> {
        match self.data.nick.value() {
            Some(nick) => Some(nick.as_str()),
            None => self.data.user.value().map(User::display_name),
        }
    }

    pub fn mention(&self) -> Result<String> {
        Ok(format!("<@{}>", self.id()?))
    }

    fn guild(&self) -> Result<Id<GuildMarker>> {
        self.guild_id.ok_or(Error::MissingContext("member guild"))
    }

    /// Apply `edit` and return the member as the API now reports it.
    pub async fn edit(&self, edit: &EditMember, reason: Option<&str>) -> Result<Self> {
        let guild_id = self.guild()?;
        let response = self
            .state
            .http()
            .modify_guild_member(guild_id, self.id()?, serde_json::to_value(edit)?, reason)
            .await?;
        Self::from_payload(&response, Some(guild_id), &self.state)
    }

    pub async fn add_role(&self, role_id: Id<RoleMarker>, reason: Option<&str>) -> Result<()> {
        self.state
            .http()
            .add_guild_member_role(self.guild()?, self.id()?, role_id, reason)
            .await?;
        Ok(())
    }

    pub async fn remove_role(&self, role_id: Id<RoleMarker>, reason: Option<&str>) -> Result<()> {
        self.state
            .http()
            .remove_guild_member_role(self.guild()?, self.id()?, role_id, reason)
            .await?;
        Ok(())
    }

    pub async fn kick(&self, reason: Option<&str>) -> Result<()> {
        self.state
            .http()
            .remove_guild_member(self.guild()?, self.id()?, reason)
            .await?;
        Ok(())
    }
}

impl Debug for Member {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Member")
            .field("guild_id", &self.guild_id)
            .field("data", &self.data)
            .finish()
    }
}

/// Body of a member edit. Unset fields are left alone; `Null` clears.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EditMember {
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub nick: Maybe<String>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub roles: Maybe<Vec<Id<RoleMarker>>>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub mute: Maybe<bool>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub deaf: Maybe<bool>,
    /// Voice channel to move the member to, `Null` to disconnect.
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub channel_id: Maybe<Id<ChannelMarker>>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub communication_disabled_until: Maybe<Timestamp>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    pub flags: Maybe<MemberFlags>,
}
