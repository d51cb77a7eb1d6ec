//! Fixtures shared by the unit tests: an in-memory transport and canned
//! interaction payloads.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, Once},
};

use crate::{
    config::Config,
    http::{HttpClient, HttpError, Method, Request, Transport},
    state::State,
    types::{id::Id, user::User},
};

pub const APPLICATION_ID: u64 = 900;

#[derive(Default)]
struct Inner {
    requests: Vec<Request>,
    replies: VecDeque<Value>,
    commands: Vec<Value>,
    next_id: u64,
}

/// Records every request. Application command routes are served from an
/// in-memory registry; everything else answers with the next queued reply,
/// or `null` once the queue is empty.
#[derive(Default)]
pub struct MockTransport {
    inner: Mutex<Inner>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    /// Queue the body of the next non-command response.
    pub fn reply(&self, body: Value) {
        self.lock().replies.push_back(body);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    /// Register a remote command directly, returning its id.
    pub fn seed_command(&self, guild_id: Option<u64>, name: &str, kind: u8) -> u64 {
        let mut inner = self.lock();
        let mut command = json!({ "name": name, "type": kind });
        if let Some(guild_id) = guild_id {
            command["guild_id"] = json!(guild_id.to_string());
        }
        insert_command(&mut inner, command)
    }

    /// Every registered command, global and guild.
    pub fn commands(&self) -> Vec<Value> {
        self.lock().commands.clone()
    }
}

fn insert_command(inner: &mut Inner, mut command: Value) -> u64 {
    inner.next_id += 1;
    let id = 5000 + inner.next_id;
    command["id"] = json!(id.to_string());
    command["application_id"] = json!(APPLICATION_ID.to_string());
    if command.get("type").is_none() {
        command["type"] = json!(1);
    }
    inner.commands.push(command);
    id
}

/// `(guild_id, command_id)` parsed from a command route path.
fn command_path(path: &str) -> (Option<String>, Option<String>) {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match segments.as_slice() {
        ["applications", _, "commands"] => (None, None),
        ["applications", _, "commands", id] => (None, Some((*id).to_owned())),
        ["applications", _, "guilds", guild, "commands"] => (Some((*guild).to_owned()), None),
        ["applications", _, "guilds", guild, "commands", id] => {
            (Some((*guild).to_owned()), Some((*id).to_owned()))
        }
        _ => (None, None),
    }
}

fn in_registry(command: &Value, guild_id: Option<&str>) -> bool {
    match guild_id {
        Some(guild_id) => command["guild_id"].as_str() == Some(guild_id),
        None => command.get("guild_id").is_none(),
    }
}

fn serve_command(inner: &mut Inner, request: &Request) -> Value {
    let (guild_id, command_id) = command_path(&request.route.path);
    let guild_id = guild_id.as_deref();
    let position = inner.commands.iter().position(|command| {
        in_registry(command, guild_id) && command["id"].as_str() == command_id.as_deref()
    });

    match request.route.method {
        Method::Get => Value::Array(
            inner
                .commands
                .iter()
                .filter(|command| in_registry(command, guild_id))
                .cloned()
                .collect(),
        ),
        Method::Post => {
            let mut command = request.body.clone().unwrap_or_else(|| json!({}));
            if let Some(guild_id) = guild_id {
                command["guild_id"] = json!(guild_id);
            }
            insert_command(inner, command);
            inner.commands.last().cloned().unwrap_or(Value::Null)
        }
        Method::Patch => match (position, request.body.clone()) {
            (Some(index), Some(Value::Object(patch))) => {
                let command = &mut inner.commands[index];
                if let Some(fields) = command.as_object_mut() {
                    fields.extend(patch);
                }
                command.clone()
            }
            _ => Value::Null,
        },
        Method::Delete => {
            if let Some(index) = position {
                inner.commands.remove(index);
            }
            Value::Null
        }
        Method::Put => Value::Null,
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, request: Request) -> Result<Value, HttpError> {
        let mut inner = self.lock();
        inner.requests.push(request.clone());

        if request.route.template.starts_with("applications/{application_id}/")
            && request.route.template.contains("commands")
        {
            return Ok(serve_command(&mut inner, &request));
        }
        Ok(inner.replies.pop_front().unwrap_or(Value::Null))
    }
}

pub fn state(transport: &Arc<MockTransport>) -> State {
    state_with_config(transport, Config::default())
}

pub fn state_with_config(transport: &Arc<MockTransport>, config: Config) -> State {
    init_tracing();
    let user: User = serde_json::from_value(json!({
        "id": "1",
        "username": "bot",
        "discriminator": "0",
        "bot": true,
    }))
    .unwrap();
    let transport: Arc<dyn Transport> = Arc::clone(transport) as Arc<dyn Transport>;
    State::new(
        HttpClient::new(transport),
        user,
        Id::new(APPLICATION_ID),
        config,
    )
}

/// Route `tracing` output through the test harness; `RUST_LOG` filters it.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// An application command interaction from guild `100`, channel `200`,
/// invoked by member `10`.
pub fn interaction_payload(data: Value) -> Value {
    json!({
        "id": "700",
        "application_id": APPLICATION_ID.to_string(),
        "type": 2,
        "data": data,
        "guild_id": "100",
        "channel_id": "200",
        "member": {
            "user": { "id": "10", "username": "invoker", "discriminator": "0" },
            "roles": [],
        },
        "token": "token",
        "version": 1,
    })
}

/// The same interaction sent from a DM, carrying a user instead of a member.
pub fn dm_interaction_payload(data: Value) -> Value {
    json!({
        "id": "700",
        "application_id": APPLICATION_ID.to_string(),
        "type": 2,
        "data": data,
        "channel_id": "200",
        "user": { "id": "10", "username": "invoker", "discriminator": "0" },
        "token": "token",
        "version": 1,
    })
}

pub fn autocomplete_payload(data: Value) -> Value {
    let mut payload = interaction_payload(data);
    payload["type"] = json!(4);
    payload
}
