//! Typed gateway events.
//!
//! The gateway connection is owned by the embedding application. It hands
//! each raw [`GatewayPayload`] to [`Event::from_payload`], and the rest of
//! the bot pattern-matches on strongly-typed data instead of
//! `(op, t, serde_json::Value)` tuples.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::{
    error::Result,
    state::State,
    types::{
        channel::{identify_channel, Channel},
        interaction::Interaction,
    },
};

/// The envelope every gateway message arrives in.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GatewayPayload {
    pub op: u8,
    pub d: Option<Value>,
    pub s: Option<u64>,
    pub t: Option<String>,
}

/// Gateway opcode of dispatch events.
pub const DISPATCH: u8 = 0;

/// A parsed event coming off the gateway.
#[derive(Clone, Debug)]
pub enum Event {
    /// A command, autocomplete request, or component interaction.
    InteractionCreate(Arc<Interaction>),
    ChannelCreate(Channel),
    ChannelUpdate(Channel),
    ChannelDelete(Channel),
    ThreadCreate(Channel),
    ThreadUpdate(Channel),
    /// Carries only the thread's id, type, guild and parent.
    ThreadDelete(Channel),
    /// Anything without a typed variant, or that failed to parse.
    Unknown {
        event_name: Option<String>,
        op: u8,
        data: Option<Value>,
    },
}

impl Event {
    /// Convert a raw payload into a typed event.
    ///
    /// This never fails: unrecognised events and payloads that don't parse
    /// become [`Event::Unknown`], the latter with a warning.
    pub fn from_payload(payload: GatewayPayload, state: &State) -> Self {
        let parsed = match (payload.op, payload.t.as_deref(), payload.d.as_ref()) {
            (DISPATCH, Some(name), Some(data)) => Self::parse_dispatch(name, data, state),
            _ => None,
        };

        match parsed {
            Some(Ok(event)) => event,
            Some(Err(error)) => {
                warn!(event = ?payload.t, %error, "failed to parse gateway event");
                Self::unknown(payload)
            }
            None => Self::unknown(payload),
        }
    }

    /// `None` for dispatch events without a typed variant.
    fn parse_dispatch(name: &str, data: &Value, state: &State) -> Option<Result<Self>> {
        Some(match name {
            "INTERACTION_CREATE" => Interaction::from_payload(data, state)
                .map(|interaction| Self::InteractionCreate(Arc::new(interaction))),
            "CHANNEL_CREATE" => channel(data, state, Self::ChannelCreate),
            "CHANNEL_UPDATE" => channel(data, state, Self::ChannelUpdate),
            "CHANNEL_DELETE" => channel(data, state, Self::ChannelDelete),
            "THREAD_CREATE" => channel(data, state, Self::ThreadCreate),
            "THREAD_UPDATE" => channel(data, state, Self::ThreadUpdate),
            "THREAD_DELETE" => channel(data, state, Self::ThreadDelete),
            _ => return None,
        })
    }

    fn unknown(payload: GatewayPayload) -> Self {
        Self::Unknown {
            event_name: payload.t,
            op: payload.op,
            data: payload.d,
        }
    }

    /// The dispatch name this event was parsed from.
    pub fn name(&self) -> Option<&str> {
        Some(match self {
            Self::InteractionCreate(_) => "INTERACTION_CREATE",
            Self::ChannelCreate(_) => "CHANNEL_CREATE",
            Self::ChannelUpdate(_) => "CHANNEL_UPDATE",
            Self::ChannelDelete(_) => "CHANNEL_DELETE",
            Self::ThreadCreate(_) => "THREAD_CREATE",
            Self::ThreadUpdate(_) => "THREAD_UPDATE",
            Self::ThreadDelete(_) => "THREAD_DELETE",
            Self::Unknown { event_name, .. } => return event_name.as_deref(),
        })
    }
}

fn channel(data: &Value, state: &State, wrap: fn(Channel) -> Event) -> Result<Event> {
    identify_channel(data, state).map(wrap)
}

#[cfg(test)]
mod tests {
    use super::{Event, GatewayPayload};
    use crate::{
        test_util::{interaction_payload, state, MockTransport},
        types::channel::Channel,
    };
    use serde_json::{json, Value};

    fn dispatch(name: &str, data: Value) -> GatewayPayload {
        GatewayPayload {
            op: 0,
            d: Some(data),
            s: Some(1),
            t: Some(name.to_owned()),
        }
    }

    #[test]
    fn gateway_payload_deserialize() {
        let json = r#"{"op":0,"d":{},"s":1,"t":"CHANNEL_CREATE"}"#;
        let payload: GatewayPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.op, 0);
        assert_eq!(payload.s, Some(1));
        assert_eq!(payload.t.as_deref(), Some("CHANNEL_CREATE"));
    }

    #[test]
    fn channel_events_are_discriminated() {
        let transport = MockTransport::new();
        let state = state(&transport);

        let event = Event::from_payload(
            dispatch(
                "THREAD_CREATE",
                json!({ "id": "5", "type": 11, "guild_id": "100", "parent_id": "6" }),
            ),
            &state,
        );
        assert!(matches!(event, Event::ThreadCreate(Channel::Thread(_))));
        assert_eq!(event.name(), Some("THREAD_CREATE"));

        let event = Event::from_payload(
            dispatch("CHANNEL_DELETE", json!({ "id": "5", "type": 4, "name": "Archive" })),
            &state,
        );
        assert!(matches!(event, Event::ChannelDelete(Channel::Category(_))));
    }

    #[test]
    fn interactions_are_bound_to_the_state() {
        let transport = MockTransport::new();
        let state = state(&transport);

        let event = Event::from_payload(
            dispatch(
                "INTERACTION_CREATE",
                interaction_payload(json!({ "id": "3", "name": "ping", "type": 1 })),
            ),
            &state,
        );
        let Event::InteractionCreate(interaction) = event else {
            panic!("expected an interaction");
        };
        assert_eq!(interaction.data().unwrap().name, "ping");
    }

    #[test]
    fn bad_payloads_become_unknown() {
        let transport = MockTransport::new();
        let state = state(&transport);

        let event = Event::from_payload(dispatch("CHANNEL_UPDATE", json!({ "type": 0 })), &state);
        assert!(matches!(
            event,
            Event::Unknown { ref event_name, op: 0, data: Some(_) }
                if event_name.as_deref() == Some("CHANNEL_UPDATE")
        ));

        let event = Event::from_payload(dispatch("TYPING_START", json!({})), &state);
        assert_eq!(event.name(), Some("TYPING_START"));

        let heartbeat_ack = GatewayPayload {
            op: 11,
            d: None,
            s: None,
            t: None,
        };
        let event = Event::from_payload(heartbeat_ack, &state);
        assert!(matches!(event, Event::Unknown { op: 11, .. }));
    }
}
