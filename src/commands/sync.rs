//! Reconciling declared commands with what Discord has registered.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    commands::command::{ApplicationCommand, CommandType},
    error::Result,
    http::{HttpClient, HttpError},
    state::State,
    types::{
        id::{
            marker::{ApplicationMarker, CommandMarker, GuildMarker},
            Id,
        },
        Maybe,
    },
};

/// A command as Discord reports it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RegisteredCommand {
    pub id: Id<CommandMarker>,
    pub application_id: Id<ApplicationMarker>,
    pub name: String,
    #[serde(rename = "type", default = "chat_input")]
    pub kind: CommandType,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub guild_id: Maybe<Id<GuildMarker>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub description: Maybe<String>,
}

const fn chat_input() -> CommandType {
    CommandType::ChatInput
}

/// Which command list a command lives in.
#[derive(Clone, Copy, Debug)]
enum Registry {
    Global,
    Guild(Id<GuildMarker>),
}

impl Registry {
    async fn list(
        self,
        http: &HttpClient,
        app: Id<ApplicationMarker>,
    ) -> Result<Vec<RegisteredCommand>, HttpError> {
        match self {
            Self::Global => http.get_global_commands(app).await,
            Self::Guild(guild_id) => http.get_guild_commands(app, guild_id).await,
        }
    }

    async fn create(
        self,
        http: &HttpClient,
        app: Id<ApplicationMarker>,
        body: Value,
    ) -> Result<RegisteredCommand, HttpError> {
        match self {
            Self::Global => http.create_global_command(app, body).await,
            Self::Guild(guild_id) => http.create_guild_command(app, guild_id, body).await,
        }
    }

    async fn edit(
        self,
        http: &HttpClient,
        app: Id<ApplicationMarker>,
        id: Id<CommandMarker>,
        body: Value,
    ) -> Result<RegisteredCommand, HttpError> {
        match self {
            Self::Global => http.edit_global_command(app, id, body).await,
            Self::Guild(guild_id) => http.edit_guild_command(app, guild_id, id, body).await,
        }
    }

    async fn delete(
        self,
        http: &HttpClient,
        app: Id<ApplicationMarker>,
        id: Id<CommandMarker>,
    ) -> Result<(), HttpError> {
        match self {
            Self::Global => http.delete_global_command(app, id).await,
            Self::Guild(guild_id) => http.delete_guild_command(app, guild_id, id).await,
        }
    }
}

/// Create, update, or adopt the remote copy of `command`.
///
/// Remote commands are matched by name and type. With
/// [`Config::update_commands`] on, the first match is overwritten and any
/// further matches are deleted; with it off, the first match is adopted as
/// is. A command is created only when nothing matched, so repeated calls
/// converge on one remote command per name and type.
///
/// For guild commands, remote commands whose name was never declared are
/// deleted as well.
///
/// [`Config::update_commands`]: crate::config::Config::update_commands
pub(crate) async fn instantiate(command: &mut ApplicationCommand, state: &State) -> Result<()> {
    let http = state.http();
    let app = state.application_id();
    let update = state.config().update_commands;
    let registry = match command.guild_id {
        Some(guild_id) => Registry::Guild(guild_id),
        None => Registry::Global,
    };
    let body = command.to_payload(&state.config().default_description)?;

    let mut found = None;
    for remote in registry.list(http, app).await? {
        if matches!(registry, Registry::Guild(_)) && !state.is_declared(&remote.name) {
            info!(name = %remote.name, id = %remote.id, "deleting undeclared guild command");
            registry.delete(http, app, remote.id).await?;
            continue;
        }
        if remote.name != command.name || remote.kind != command.kind {
            continue;
        }

        if found.is_some() {
            if update {
                info!(name = %remote.name, id = %remote.id, "deleting duplicate command");
                registry.delete(http, app, remote.id).await?;
            }
            continue;
        }

        if update {
            info!(name = %command.name, id = %remote.id, ?registry, "updating command");
            registry.edit(http, app, remote.id, body.clone()).await?;
        } else {
            debug!(name = %command.name, id = %remote.id, "command already registered");
        }
        found = Some(remote.id);
    }

    let id = match found {
        Some(id) => id,
        None => {
            let created = registry.create(http, app, body).await?;
            info!(name = %command.name, id = %created.id, ?registry, "created command");
            created.id
        }
    };

    command.id = Some(id);
    command.created = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::instantiate;
    use crate::{
        commands::{
            command::ApplicationCommand,
            option::CommandOption,
            signature::{Param, ParamType},
        },
        config::Config,
        http::Method,
        test_util::{state, state_with_config, MockTransport},
        types::id::Id,
    };

    fn echo() -> ApplicationCommand {
        ApplicationCommand::chat_input("echo")
            .guild(Id::new(100))
            .params([Param::new("text", ParamType::String).option(CommandOption::new())])
            .unwrap()
    }

    fn count(transport: &MockTransport, method: Method) -> usize {
        transport
            .requests()
            .iter()
            .filter(|request| request.route.method == method)
            .count()
    }

    #[tokio::test]
    async fn instantiating_twice_keeps_one_remote_command() {
        let transport = MockTransport::new();
        let state = state(&transport);
        state.declare("echo");

        let mut command = echo();
        instantiate(&mut command, &state).await.unwrap();
        let first_id = command.id().unwrap();
        instantiate(&mut command, &state).await.unwrap();

        let remote = transport.commands();
        assert_eq!(remote.len(), 1);
        assert_eq!(remote[0]["name"], "echo");
        assert_eq!(command.id(), Some(first_id));
        assert!(command.is_created());
        assert_eq!(count(&transport, Method::Post), 1);
        assert_eq!(count(&transport, Method::Patch), 1);
    }

    #[tokio::test]
    async fn disabled_updates_adopt_the_existing_command() {
        let transport = MockTransport::new();
        let state = state_with_config(
            &transport,
            Config {
                update_commands: false,
                ..Config::default()
            },
        );
        state.declare("echo");
        let existing = transport.seed_command(Some(100), "echo", 1);

        let mut command = echo();
        instantiate(&mut command, &state).await.unwrap();
        instantiate(&mut command, &state).await.unwrap();

        assert_eq!(transport.commands().len(), 1);
        assert_eq!(command.id(), Some(Id::new(existing)));
        assert_eq!(count(&transport, Method::Post), 0);
        assert_eq!(count(&transport, Method::Patch), 0);
    }

    #[tokio::test]
    async fn guild_sync_removes_undeclared_and_duplicate_commands() {
        let transport = MockTransport::new();
        let state = state(&transport);
        state.declare("echo");
        transport.seed_command(Some(100), "stale", 1);
        let kept = transport.seed_command(Some(100), "echo", 1);
        transport.seed_command(Some(100), "echo", 1);
        transport.seed_command(Some(100), "echo", 2);

        let mut command = echo();
        instantiate(&mut command, &state).await.unwrap();

        let mut remaining: Vec<(String, u64)> = transport
            .commands()
            .iter()
            .map(|command| {
                (
                    command["name"].as_str().unwrap().to_owned(),
                    command["type"].as_u64().unwrap(),
                )
            })
            .collect();
        remaining.sort();
        assert_eq!(
            remaining,
            [("echo".to_owned(), 1), ("echo".to_owned(), 2)]
        );
        assert_eq!(command.id(), Some(Id::new(kept)));
    }

    #[tokio::test]
    async fn global_sync_leaves_other_commands_alone() {
        let transport = MockTransport::new();
        let state = state(&transport);
        state.declare("ping");
        transport.seed_command(None, "someone-elses", 1);

        let mut command = ApplicationCommand::chat_input("ping").description("Pong!");
        instantiate(&mut command, &state).await.unwrap();

        assert_eq!(transport.commands().len(), 2);
        let created = transport
            .requests()
            .into_iter()
            .find(|request| request.route.method == Method::Post)
            .unwrap();
        assert_eq!(created.route.template, "applications/{application_id}/commands");
        assert_eq!(created.body.unwrap()["description"], "Pong!");
    }
}
