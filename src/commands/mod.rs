//! Declaring application commands and dispatching interactions to them.
//!
//! Commands are declared once at startup with [`ApplicationCommand`]
//! builders, collected in a [`Commands`] registry, synchronized with Discord
//! through [`Commands::instantiate_all`], and then fed every interaction the
//! gateway delivers through [`Commands::dispatch`].

mod autocomplete;
mod callback;
mod command;
mod option;
mod process;
mod signature;
mod sync;

pub use self::{
    autocomplete::{filter_choices, MAX_CHOICES},
    callback::{Argument, Arguments, Callback, Completer, Completion, Invocation},
    command::{ApplicationCommand, CommandType},
    option::{ChoiceValue, CommandChoice, CommandOption, Localizations, OptionType, MAX_DEPTH},
    signature::{Param, ParamType},
    sync::RegisteredCommand,
};

use std::sync::Arc;
use tracing::{debug, trace};

use crate::{
    error::{DeclarationError, Result},
    events::Event,
    state::State,
    types::interaction::{Interaction, InteractionType},
};

/// Every command the application declares.
#[derive(Debug)]
pub struct Commands {
    state: State,
    commands: Vec<ApplicationCommand>,
}

impl Commands {
    pub fn new(state: State) -> Self {
        Self {
            state,
            commands: Vec::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Declare a command.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::Duplicate`] if a command of the same name
    /// and type is already declared.
    pub fn add(
        &mut self,
        command: ApplicationCommand,
    ) -> Result<&mut ApplicationCommand, DeclarationError> {
        if self.get(&command.name, command.kind).is_some() {
            return Err(DeclarationError::Duplicate { name: command.name });
        }

        self.state.declare(&command.name);
        debug!(name = %command.name, kind = ?command.kind, "declared command");
        self.commands.push(command);
        let index = self.commands.len() - 1;
        Ok(&mut self.commands[index])
    }

    pub fn get(&self, name: &str, kind: CommandType) -> Option<&ApplicationCommand> {
        self.commands
            .iter()
            .find(|command| command.name == name && command.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApplicationCommand> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Register every declared command with Discord.
    pub async fn instantiate_all(&mut self) -> Result<()> {
        for command in &mut self.commands {
            sync::instantiate(command, &self.state).await?;
        }
        Ok(())
    }

    /// Route an interaction to the command it names.
    ///
    /// Returns whether a command handled it. Interactions that aren't
    /// commands or autocomplete requests, and commands declared elsewhere,
    /// are ignored.
    pub async fn dispatch(&self, interaction: Arc<Interaction>) -> Result<bool> {
        let kind = interaction.kind();
        if !matches!(
            kind,
            InteractionType::ApplicationCommand | InteractionType::ApplicationCommandAutocomplete
        ) {
            trace!(?kind, "ignoring non-command interaction");
            return Ok(false);
        }

        let data = interaction.data()?;
        let Some(command) = self.get(&data.name, data.kind) else {
            trace!(name = %data.name, "no command declared for interaction");
            return Ok(false);
        };

        if kind == InteractionType::ApplicationCommandAutocomplete {
            autocomplete::autocomplete(command, interaction).await?;
        } else {
            process::invoke_command(command, interaction).await?;
        }
        Ok(true)
    }

    /// Dispatch the interaction carried by a gateway event, if any.
    pub async fn dispatch_event(&self, event: &Event) -> Result<bool> {
        match event {
            Event::InteractionCreate(interaction) => self.dispatch(Arc::clone(interaction)).await,
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApplicationCommand, CommandOption, CommandType, Commands, Param, ParamType};
    use crate::{
        error::DeclarationError,
        events::{Event, GatewayPayload},
        test_util::{autocomplete_payload, interaction_payload, state, MockTransport},
        types::interaction::Interaction,
    };
    use serde_json::json;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn counting(name: &str, calls: &Arc<AtomicUsize>) -> ApplicationCommand {
        let calls = Arc::clone(calls);
        ApplicationCommand::chat_input(name).callback(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            futures_lite::future::ready(Ok(()))
        })
    }

    #[test]
    fn duplicate_declarations_are_rejected() {
        let transport = MockTransport::new();
        let state = state(&transport);
        let mut commands = Commands::new(state.clone());

        commands.add(ApplicationCommand::chat_input("ping")).unwrap();
        commands.add(ApplicationCommand::user("ping")).unwrap();
        let error = commands
            .add(ApplicationCommand::chat_input("ping"))
            .unwrap_err();

        assert!(matches!(error, DeclarationError::Duplicate { name } if name == "ping"));
        assert_eq!(commands.len(), 2);
        assert!(state.is_declared("ping"));
        assert!(commands.get("ping", CommandType::User).is_some());
    }

    #[tokio::test]
    async fn dispatch_routes_by_name_and_type() {
        let transport = MockTransport::new();
        let state = state(&transport);
        let ping = Arc::new(AtomicUsize::new(0));
        let pong = Arc::new(AtomicUsize::new(0));

        let mut commands = Commands::new(state.clone());
        commands.add(counting("ping", &ping)).unwrap();
        commands.add(counting("pong", &pong)).unwrap();

        let interaction = Interaction::from_payload(
            &interaction_payload(json!({ "id": "1", "name": "pong", "type": 1 })),
            &state,
        )
        .unwrap();
        assert!(commands.dispatch(Arc::new(interaction)).await.unwrap());

        let unknown = Interaction::from_payload(
            &interaction_payload(json!({ "id": "1", "name": "other", "type": 1 })),
            &state,
        )
        .unwrap();
        assert!(!commands.dispatch(Arc::new(unknown)).await.unwrap());

        assert_eq!(ping.load(Ordering::SeqCst), 0);
        assert_eq!(pong.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn autocomplete_interactions_do_not_invoke_callbacks() {
        let transport = MockTransport::new();
        let state = state(&transport);
        let calls = Arc::new(AtomicUsize::new(0));

        let mut commands = Commands::new(state.clone());
        let command = counting("pick", &calls)
            .params([Param::new("fruit", ParamType::String).option(
                CommandOption::new()
                    .choices([super::CommandChoice::new("Apple")])
                    .autocomplete(true),
            )])
            .unwrap();
        commands.add(command).unwrap();

        let interaction = Interaction::from_payload(
            &autocomplete_payload(json!({
                "id": "1",
                "name": "pick",
                "type": 1,
                "options": [{ "name": "fruit", "type": 3, "value": "ap", "focused": true }],
            })),
            &state,
        )
        .unwrap();
        assert!(commands.dispatch(Arc::new(interaction)).await.unwrap());

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            transport.requests()[0].body.as_ref().unwrap()["type"],
            json!(8)
        );
    }

    #[tokio::test]
    async fn gateway_events_reach_their_command() {
        let transport = MockTransport::new();
        let state = state(&transport);
        let calls = Arc::new(AtomicUsize::new(0));

        let mut commands = Commands::new(state.clone());
        commands.add(counting("ping", &calls)).unwrap();

        let payload = GatewayPayload {
            op: 0,
            d: Some(interaction_payload(json!({ "id": "1", "name": "ping", "type": 1 }))),
            s: Some(4),
            t: Some("INTERACTION_CREATE".to_owned()),
        };
        let event = Event::from_payload(payload, &state);
        assert!(commands.dispatch_event(&event).await.unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn instantiate_all_registers_every_command() {
        let transport = MockTransport::new();
        let state = state(&transport);

        let mut commands = Commands::new(state);
        commands.add(ApplicationCommand::chat_input("ping")).unwrap();
        commands
            .add(ApplicationCommand::message("Quote").params([Param::new(
                "message",
                ParamType::Message,
            )]).unwrap())
            .unwrap();
        commands.instantiate_all().await.unwrap();

        assert_eq!(transport.commands().len(), 2);
        assert!(commands.iter().all(ApplicationCommand::is_created));
    }
}
