//! Interactions and the responses we send back.

use async_lock::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_repr::Serialize_repr;
use std::{
    collections::HashMap,
    fmt::{Debug, Formatter, Result as FmtResult},
};

use crate::{
    commands::{CommandChoice, CommandType, OptionType},
    error::{Error, PayloadIntegrityError, Result},
    state::State,
    types::{
        flags::Permissions,
        id::{
            marker::{
                ApplicationMarker, ChannelMarker, CommandMarker, GenericMarker, GuildMarker,
                InteractionMarker,
            },
            Id,
        },
        member::Member,
        message::{AllowedMentions, CreateMessage, Message},
        user::User,
        Maybe,
    },
};

/// Why Discord sent an interaction.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u8", into = "u8")]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    MessageComponent,
    ApplicationCommandAutocomplete,
    ModalSubmit,
    Unknown(u8),
}

impl From<u8> for InteractionType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            4 => Self::ApplicationCommandAutocomplete,
            5 => Self::ModalSubmit,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<InteractionType> for u8 {
    fn from(value: InteractionType) -> Self {
        match value {
            InteractionType::Ping => 1,
            InteractionType::ApplicationCommand => 2,
            InteractionType::MessageComponent => 3,
            InteractionType::ApplicationCommandAutocomplete => 4,
            InteractionType::ModalSubmit => 5,
            InteractionType::Unknown(unknown) => unknown,
        }
    }
}

/// The wire fields of an interaction.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct InteractionPayload {
    pub id: Id<InteractionMarker>,
    pub application_id: Id<ApplicationMarker>,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub data: Maybe<InteractionData>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub guild_id: Maybe<Id<GuildMarker>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub channel_id: Maybe<Id<ChannelMarker>>,
    /// Sent for interactions in guilds.
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub member: Maybe<Value>,
    /// Sent for interactions in DMs.
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub user: Maybe<User>,
    pub token: String,
    pub version: u8,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub message: Maybe<Message>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub app_permissions: Maybe<Permissions>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub locale: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub guild_locale: Maybe<String>,
}

/// Command data of an application command or autocomplete interaction.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct InteractionData {
    pub id: Id<CommandMarker>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CommandType,
    #[serde(default)]
    pub resolved: ResolvedData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InteractionOption>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub guild_id: Maybe<Id<GuildMarker>>,
    /// User or message a context-menu command targets.
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub target_id: Maybe<Id<GenericMarker>>,
}

/// Full objects for every ID the options reference, keyed by ID.
///
/// Kept as raw JSON: building entities needs the session state, so it
/// happens at binding time.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ResolvedData {
    #[serde(default)]
    pub users: HashMap<String, Value>,
    #[serde(default)]
    pub members: HashMap<String, Value>,
    #[serde(default)]
    pub roles: HashMap<String, Value>,
    #[serde(default)]
    pub channels: HashMap<String, Value>,
    #[serde(default)]
    pub messages: HashMap<String, Value>,
    #[serde(default)]
    pub attachments: HashMap<String, Value>,
}

impl ResolvedData {
    /// Look up `id` in the map named `map`.
    pub(crate) fn lookup<'a>(
        map: &'a HashMap<String, Value>,
        name: &'static str,
        id: &str,
    ) -> Result<&'a Value, PayloadIntegrityError> {
        map.get(id).ok_or_else(|| PayloadIntegrityError::Unresolved {
            map: name,
            id: id.to_owned(),
        })
    }
}

/// One node of the option tree a user filled in.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct InteractionOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OptionType,
    /// Leaf value; IDs arrive as strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Children of sub-commands and groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InteractionOption>,
    /// Set on the option being typed into during autocomplete.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub focused: bool,
}

/// An interaction bound to a session, able to respond once.
pub struct Interaction {
    state: State,
    payload: InteractionPayload,
    member: Option<Member>,
    responded: Mutex<bool>,
}

impl Interaction {
    pub fn from_payload(payload: &Value, state: &State) -> Result<Self> {
        let payload = InteractionPayload::deserialize(payload)?;
        let member = match payload.member.value() {
            Some(member) => {
                let guild_id = payload.guild_id.value().copied();
                Some(Member::from_payload(member, guild_id, state)?)
            }
            None => None,
        };

        Ok(Self {
            state: state.clone(),
            payload,
            member,
            responded: Mutex::new(false),
        })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn payload(&self) -> &InteractionPayload {
        &self.payload
    }

    pub fn id(&self) -> Id<InteractionMarker> {
        self.payload.id
    }

    pub fn kind(&self) -> InteractionType {
        self.payload.kind
    }

    pub fn token(&self) -> &str {
        &self.payload.token
    }

    pub fn guild_id(&self) -> Option<Id<GuildMarker>> {
        self.payload.guild_id.value().copied()
    }

    pub fn channel_id(&self) -> Option<Id<ChannelMarker>> {
        self.payload.channel_id.value().copied()
    }

    /// The invoking member, for interactions in guilds.
    pub fn member(&self) -> Option<&Member> {
        self.member.as_ref()
    }

    /// The invoking user, wherever the interaction happened.
    pub fn user(&self) -> Option<&User> {
        match &self.member {
            Some(member) => member.data().user.value(),
            None => self.payload.user.value(),
        }
    }

    /// Command data.
    ///
    /// # Errors
    ///
    /// Fails if the interaction carries none, which only happens for pings.
    pub fn data(&self) -> Result<&InteractionData, PayloadIntegrityError> {
        self.payload
            .data
            .value()
            .ok_or(PayloadIntegrityError::MissingData)
    }

    pub async fn has_responded(&self) -> bool {
        *self.responded.lock().await
    }

    /// Send the initial response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyResponded`] if an initial response was already
    /// sent. The lock is held across the request so concurrent calls can't
    /// both get through.
    pub async fn respond_with(&self, response: &InteractionResponse) -> Result<()> {
        let mut responded = self.responded.lock().await;
        if *responded {
            return Err(Error::AlreadyResponded);
        }

        self.state
            .http()
            .create_interaction_response(self.payload.id, &self.payload.token, response)
            .await?;
        *responded = true;
        Ok(())
    }

    /// Reply with a message.
    pub async fn respond(&self, data: InteractionCallbackData) -> Result<()> {
        self.respond_with(&InteractionResponse {
            kind: InteractionCallbackType::ChannelMessageWithSource,
            data: Some(data),
        })
        .await
    }

    /// Acknowledge now and reply later with [`edit_response`](Self::edit_response).
    pub async fn defer(&self, ephemeral: bool) -> Result<()> {
        let data = ephemeral.then(|| InteractionCallbackData {
            flags: Some(EPHEMERAL),
            ..InteractionCallbackData::default()
        });
        self.respond_with(&InteractionResponse {
            kind: InteractionCallbackType::DeferredChannelMessageWithSource,
            data,
        })
        .await
    }

    /// Answer an autocomplete interaction.
    pub async fn autocomplete(&self, choices: Vec<CommandChoice>) -> Result<()> {
        self.respond_with(&InteractionResponse {
            kind: InteractionCallbackType::ApplicationCommandAutocompleteResult,
            data: Some(InteractionCallbackData {
                choices: Some(choices),
                ..InteractionCallbackData::default()
            }),
        })
        .await
    }

    /// Replace the content of the original response.
    pub async fn edit_response(&self, message: &CreateMessage) -> Result<Message> {
        Ok(self
            .state
            .http()
            .edit_original_interaction_response(
                self.payload.application_id,
                &self.payload.token,
                message,
            )
            .await?)
    }
}

impl Debug for Interaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Interaction")
            .field("id", &self.payload.id)
            .field("kind", &self.payload.kind)
            .field("data", &self.payload.data)
            .field("guild_id", &self.payload.guild_id)
            .finish()
    }
}

/// Message flag hiding a response from everyone but the invoker.
pub const EPHEMERAL: u64 = 1 << 6;

// ---------------------------------------------------------------------------
// Interaction response types
// ---------------------------------------------------------------------------

/// An interaction response sent back to Discord.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: InteractionCallbackType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionCallbackData>,
}

/// The type of callback for an interaction response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr)]
#[repr(u8)]
pub enum InteractionCallbackType {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
    DeferredUpdateMessage = 6,
    UpdateMessage = 7,
    ApplicationCommandAutocompleteResult = 8,
    Modal = 9,
}

// Allow deserializing as well (useful in tests / echo scenarios).
impl<'de> Deserialize<'de> for InteractionCallbackType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = u8::deserialize(deserializer)?;
        match v {
            1 => Ok(Self::Pong),
            4 => Ok(Self::ChannelMessageWithSource),
            5 => Ok(Self::DeferredChannelMessageWithSource),
            6 => Ok(Self::DeferredUpdateMessage),
            7 => Ok(Self::UpdateMessage),
            8 => Ok(Self::ApplicationCommandAutocompleteResult),
            9 => Ok(Self::Modal),
            _ => Err(serde::de::Error::custom(format!(
                "unknown InteractionCallbackType: {}",
                v
            ))),
        }
    }
}

/// Data payload for an interaction callback.
///
/// Supports `Default` for construction with struct update syntax
/// (`..Default::default()`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionCallbackData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<AllowedMentions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    /// For autocomplete responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<CommandChoice>>,
    /// For modal responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
}

impl InteractionCallbackData {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn ephemeral(mut self) -> Self {
        self.flags = Some(self.flags.unwrap_or(0) | EPHEMERAL);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Interaction, InteractionCallbackData, InteractionCallbackType, InteractionType};
    use crate::{
        commands::CommandChoice,
        error::Error,
        test_util::{interaction_payload, state, MockTransport},
    };
    use crate::state::State;
    use serde_json::json;

    fn ping(state: &State) -> Interaction {
        let payload = interaction_payload(json!({ "id": "3", "name": "ping", "type": 1 }));
        Interaction::from_payload(&payload, state).unwrap()
    }

    #[test]
    fn interaction_callback_type_roundtrip() {
        let ty = InteractionCallbackType::ChannelMessageWithSource;
        let json = serde_json::to_string(&ty).unwrap();
        assert_eq!(json, "4");
        let parsed: InteractionCallbackType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ty);
    }

    #[test]
    fn guild_interactions_bind_the_member() {
        let transport = MockTransport::new();
        let state = state(&transport);
        let interaction = ping(&state);

        assert_eq!(interaction.kind(), InteractionType::ApplicationCommand);
        let member = interaction.member().unwrap();
        assert_eq!(member.guild_id(), interaction.guild_id());
        assert_eq!(interaction.user().unwrap().username, "invoker");
        assert_eq!(interaction.data().unwrap().name, "ping");
    }

    #[tokio::test]
    async fn responding_twice_is_rejected() {
        let transport = MockTransport::new();
        let state = state(&transport);
        let interaction = ping(&state);

        interaction
            .respond(InteractionCallbackData::content("pong").ephemeral())
            .await
            .unwrap();
        let error = interaction.defer(false).await.unwrap_err();
        assert!(matches!(error, Error::AlreadyResponded));
        assert!(interaction.has_responded().await);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].body,
            Some(json!({ "type": 4, "data": { "content": "pong", "flags": 64 } }))
        );
    }

    #[tokio::test]
    async fn autocomplete_sends_choices() {
        let transport = MockTransport::new();
        let state = state(&transport);
        let interaction = ping(&state);

        interaction
            .autocomplete(vec![CommandChoice::new("Red")])
            .await
            .unwrap();

        assert_eq!(
            transport.requests()[0].body,
            Some(json!({
                "type": 8,
                "data": { "choices": [{ "name": "Red", "value": "Red" }] }
            }))
        );
    }
}
