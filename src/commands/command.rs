//! Application command declarations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    future::Future,
};

use crate::{
    commands::{
        callback::{boxed_callback, Callback, Invocation},
        option::{attach, CommandOption, Localizations},
        signature::{resolve_options, Param, ParamType},
    },
    error::{DeclarationError, Result},
    types::{
        flags::Permissions,
        id::{
            marker::{CommandMarker, GuildMarker},
            Id,
        },
        Maybe,
    },
};

/// Where a command shows up in the client.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u8", into = "u8")]
pub enum CommandType {
    /// A slash command.
    ChatInput,
    /// An entry in a user's context menu.
    User,
    /// An entry in a message's context menu.
    Message,
    Unknown(u8),
}

impl From<u8> for CommandType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::ChatInput,
            2 => Self::User,
            3 => Self::Message,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<CommandType> for u8 {
    fn from(value: CommandType) -> Self {
        match value {
            CommandType::ChatInput => 1,
            CommandType::User => 2,
            CommandType::Message => 3,
            CommandType::Unknown(unknown) => unknown,
        }
    }
}

/// A command this application declares.
///
/// # Examples
///
/// ```ignore
/// let echo = ApplicationCommand::chat_input("echo")
///     .description("Repeat after me")
///     .params([
///         Param::interaction(),
///         Param::new("text", ParamType::String).option(CommandOption::new().required(true)),
///     ])?
///     .callback(|invocation| async move {
///         let text = invocation.arguments.string("text").unwrap_or_default().to_owned();
///         invocation.interaction.respond(InteractionCallbackData::content(text)).await
///     });
/// ```
#[derive(Clone)]
pub struct ApplicationCommand {
    pub(crate) name: String,
    pub(crate) kind: CommandType,
    description: Option<String>,
    name_localizations: Maybe<Localizations>,
    description_localizations: Maybe<Localizations>,
    pub(crate) guild_id: Option<Id<GuildMarker>>,
    dm_permission: Option<bool>,
    nsfw: Option<bool>,
    default_member_permissions: Maybe<Permissions>,
    pub(crate) params: Vec<Param>,
    pub(crate) options: Vec<CommandOption>,
    pub(crate) subs: Vec<CommandOption>,
    pub(crate) callback: Option<Callback>,
    pub(crate) id: Option<Id<CommandMarker>>,
    pub(crate) created: bool,
}

impl ApplicationCommand {
    fn new(name: impl Into<String>, kind: CommandType) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            name_localizations: Maybe::Missing,
            description_localizations: Maybe::Missing,
            guild_id: None,
            dm_permission: None,
            nsfw: None,
            default_member_permissions: Maybe::Missing,
            params: Vec::new(),
            options: Vec::new(),
            subs: Vec::new(),
            callback: None,
            id: None,
            created: false,
        }
    }

    /// A slash command.
    pub fn chat_input(name: impl Into<String>) -> Self {
        Self::new(name, CommandType::ChatInput)
    }

    /// A user context menu command.
    pub fn user(name: impl Into<String>) -> Self {
        Self::new(name, CommandType::User)
    }

    /// A message context menu command.
    pub fn message(name: impl Into<String>) -> Self {
        Self::new(name, CommandType::Message)
    }

    /// Only sent for chat input commands.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name_localizations(mut self, localizations: Maybe<Localizations>) -> Self {
        self.name_localizations = localizations;
        self
    }

    pub fn description_localizations(mut self, localizations: Maybe<Localizations>) -> Self {
        self.description_localizations = localizations;
        self
    }

    /// Register in one guild instead of globally.
    pub fn guild(mut self, guild_id: Id<GuildMarker>) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    pub fn dm_permission(mut self, allowed: bool) -> Self {
        self.dm_permission = Some(allowed);
        self
    }

    pub fn nsfw(mut self, nsfw: bool) -> Self {
        self.nsfw = Some(nsfw);
        self
    }

    /// `Maybe::Null` resets to the platform default.
    pub fn default_member_permissions(mut self, permissions: Maybe<Permissions>) -> Self {
        self.default_member_permissions = permissions;
        self
    }

    /// Declare the callback's parameters.
    ///
    /// For chat input commands, every parameter besides the interaction and
    /// receiver becomes an option. User commands take exactly one user or
    /// member. Message commands take up to two parameters, at least one
    /// being the message or the requesting user.
    ///
    /// # Errors
    ///
    /// Returns the [`DeclarationError`] describing the first bad parameter.
    pub fn params(
        mut self,
        params: impl IntoIterator<Item = Param>,
    ) -> Result<Self, DeclarationError> {
        let params: Vec<Param> = params.into_iter().collect();
        match self.kind {
            CommandType::ChatInput => {
                self.options = resolve_options(&self.name, params.iter().cloned())?;
            }
            CommandType::User => self.check_user_params(&params)?,
            CommandType::Message => self.check_message_params(&params)?,
            CommandType::Unknown(_) => {}
        }
        self.params = params;
        Ok(self)
    }

    pub fn callback<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn(Invocation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.callback = Some(boxed_callback(callback));
        self
    }

    /// Attach a sub-command.
    ///
    /// The first attachment drops the command's own options; its callback
    /// stays as a hook run before any sub-command outside a group.
    ///
    /// # Errors
    ///
    /// Fails on context menu commands, on a second sub-command of the same
    /// name, and on nesting deeper than a group.
    pub fn command(&mut self, sub: CommandOption) -> Result<&mut CommandOption, DeclarationError> {
        if self.kind != CommandType::ChatInput {
            return Err(DeclarationError::NotChatInput {
                command: self.name.clone(),
            });
        }
        let index = attach(&mut self.options, &mut self.subs, sub, 1)?;
        Ok(&mut self.subs[index])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> CommandType {
        self.kind
    }

    pub const fn guild_id(&self) -> Option<Id<GuildMarker>> {
        self.guild_id
    }

    /// The remote id, once synchronized.
    pub const fn id(&self) -> Option<Id<CommandMarker>> {
        self.id
    }

    /// Whether the command has been created or updated remotely.
    pub const fn is_created(&self) -> bool {
        self.created
    }

    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    pub fn sub_commands(&self) -> &[CommandOption] {
        &self.subs
    }

    pub fn option(&self, name: &str) -> Option<&CommandOption> {
        self.options.iter().find(|option| option.label() == name)
    }

    pub fn sub_command(&self, name: &str) -> Option<&CommandOption> {
        self.subs.iter().find(|sub| sub.label() == name)
    }

    /// The body sent when creating or updating the command.
    pub fn to_payload(&self, default_description: &str) -> serde_json::Result<Value> {
        let chat_input = self.kind == CommandType::ChatInput;
        let nested = if self.subs.is_empty() {
            &self.options
        } else {
            &self.subs
        };

        let payload = CommandPayload {
            name: &self.name,
            kind: self.kind,
            description: chat_input
                .then(|| self.description.as_deref().unwrap_or(default_description)),
            name_localizations: self.name_localizations.as_ref(),
            description_localizations: self.description_localizations.as_ref(),
            dm_permission: self.dm_permission,
            nsfw: self.nsfw,
            default_member_permissions: self.default_member_permissions.as_ref(),
            options: nested
                .iter()
                .map(|option| option.to_payload(default_description))
                .collect::<serde_json::Result<_>>()?,
        };
        serde_json::to_value(payload)
    }

    fn check_user_params(&self, params: &[Param]) -> Result<(), DeclarationError> {
        let targets: Vec<&Param> = params.iter().filter(|param| !param.ty.is_context()).collect();
        if targets.len() != 1 {
            return Err(DeclarationError::UserCommandArity {
                command: self.name.clone(),
                found: targets.len(),
            });
        }
        if !targets[0].ty.is_user() {
            return Err(self.incorrect_type(targets[0]));
        }
        Ok(())
    }

    fn check_message_params(&self, params: &[Param]) -> Result<(), DeclarationError> {
        let declared: Vec<&Param> = params.iter().filter(|param| !param.ty.is_context()).collect();
        if declared.len() > 2 {
            return Err(DeclarationError::MessageCommandArity {
                command: self.name.clone(),
                found: declared.len(),
            });
        }

        for param in &declared {
            if param.ty != ParamType::Message && !param.ty.is_user() {
                return Err(self.incorrect_type(param));
            }
        }

        if declared.is_empty() {
            return Err(DeclarationError::NoTarget {
                command: self.name.clone(),
            });
        }
        Ok(())
    }

    fn incorrect_type(&self, param: &Param) -> DeclarationError {
        DeclarationError::IncorrectType {
            command: self.name.clone(),
            param: param.name.clone(),
            ty: param.ty,
            kind: self.kind,
        }
    }
}

impl Debug for ApplicationCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ApplicationCommand")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("guild_id", &self.guild_id)
            .field("id", &self.id)
            .field("created", &self.created)
            .field("options", &self.options)
            .field("subs", &self.subs)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct CommandPayload<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: CommandType,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    name_localizations: Maybe<&'a Localizations>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    description_localizations: Maybe<&'a Localizations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dm_permission: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nsfw: Option<bool>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    default_member_permissions: Maybe<&'a Permissions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    options: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::{ApplicationCommand, CommandType};
    use crate::{
        commands::{
            option::{CommandOption, OptionType},
            signature::{Param, ParamType},
        },
        error::DeclarationError,
        types::{flags::Permissions, Maybe},
    };
    use serde_json::json;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn command_type_is_a_bare_integer() {
        assert_tokens(&CommandType::Message, &[Token::U8(3)]);
    }

    #[test]
    fn chat_input_payload() {
        let command = ApplicationCommand::chat_input("echo")
            .description("Repeat after me")
            .nsfw(false)
            .default_member_permissions(Maybe::Value(Permissions::SEND_MESSAGES))
            .params([
                Param::interaction(),
                Param::new("text", ParamType::String)
                    .option(CommandOption::new().description("What to say").required(true)),
            ])
            .unwrap();

        assert_eq!(
            command.to_payload("No description provided").unwrap(),
            json!({
                "name": "echo",
                "type": 1,
                "description": "Repeat after me",
                "nsfw": false,
                "default_member_permissions": "2048",
                "options": [{
                    "type": 3,
                    "name": "text",
                    "description": "What to say",
                    "required": true,
                }],
            })
        );
    }

    #[test]
    fn context_menu_commands_have_no_description() {
        let command = ApplicationCommand::user("Inspect")
            .description("ignored")
            .params([Param::interaction(), Param::new("target", ParamType::Member)])
            .unwrap();
        assert_eq!(
            command.to_payload("unused").unwrap(),
            json!({ "name": "Inspect", "type": 2 })
        );
    }

    #[test]
    fn user_commands_take_exactly_one_user() {
        let error = ApplicationCommand::user("Inspect")
            .params([Param::interaction()])
            .unwrap_err();
        assert!(matches!(
            error,
            DeclarationError::UserCommandArity { found: 0, .. }
        ));

        let error = ApplicationCommand::user("Inspect")
            .params([Param::new("target", ParamType::Role)])
            .unwrap_err();
        assert!(matches!(
            error,
            DeclarationError::IncorrectType {
                ty: ParamType::Role,
                kind: CommandType::User,
                ..
            }
        ));
    }

    #[test]
    fn message_commands_need_a_target() {
        let error = ApplicationCommand::message("Quote")
            .params([Param::interaction()])
            .unwrap_err();
        assert!(matches!(error, DeclarationError::NoTarget { .. }));

        let error = ApplicationCommand::message("Quote")
            .params([
                Param::new("message", ParamType::Message),
                Param::new("author", ParamType::User),
                Param::new("extra", ParamType::User),
            ])
            .unwrap_err();
        assert!(matches!(
            error,
            DeclarationError::MessageCommandArity { found: 3, .. }
        ));

        let error = ApplicationCommand::message("Quote")
            .params([Param::new("text", ParamType::String)])
            .unwrap_err();
        assert!(matches!(error, DeclarationError::IncorrectType { .. }));

        ApplicationCommand::message("Quote")
            .params([
                Param::receiver(),
                Param::new("message", ParamType::Message),
                Param::new("requester", ParamType::UserOrMember),
            ])
            .unwrap();
    }

    #[test]
    fn message_commands_accept_interaction_message_and_requester() {
        let command = ApplicationCommand::message("Quote")
            .params([
                Param::receiver(),
                Param::interaction(),
                Param::new("message", ParamType::Message),
                Param::new("requester", ParamType::Member),
            ])
            .unwrap();
        assert_eq!(command.params.len(), 4);

        let error = ApplicationCommand::message("Quote")
            .params([Param::interaction(), Param::interaction()])
            .unwrap_err();
        assert!(matches!(error, DeclarationError::NoTarget { .. }));
    }

    #[test]
    fn sub_commands_replace_options() {
        let mut command = ApplicationCommand::chat_input("config")
            .params([Param::new("flag", ParamType::Boolean).option(CommandOption::new())])
            .unwrap();
        assert!(command.option("flag").is_some());

        let group = command.command(CommandOption::sub_command("logging")).unwrap();
        group
            .command(CommandOption::sub_command("enable"))
            .unwrap();

        assert!(command.options().is_empty());
        let payload = command.to_payload("d").unwrap();
        assert_eq!(payload["options"][0]["type"], json!(2));
        assert_eq!(payload["options"][0]["options"][0]["name"], json!("enable"));
        assert_eq!(
            command.sub_command("logging").unwrap().option_type(),
            Some(OptionType::SubCommandGroup)
        );
    }

    #[test]
    fn nesting_is_capped_at_two_levels() {
        let mut command = ApplicationCommand::chat_input("a");
        let group = command.command(CommandOption::sub_command("b")).unwrap();
        let leaf = group.command(CommandOption::sub_command("c")).unwrap();
        assert!(matches!(
            leaf.command(CommandOption::sub_command("d")),
            Err(DeclarationError::TooDeep { .. })
        ));

        let mut prebuilt = CommandOption::sub_command("x");
        prebuilt.command(CommandOption::sub_command("y")).unwrap();
        let group = command.command(CommandOption::sub_command("e")).unwrap();
        assert!(matches!(
            group.command(prebuilt.clone()),
            Err(DeclarationError::TooDeep { name }) if name == "y"
        ));
        assert!(command.command(prebuilt).is_ok());
    }

    #[test]
    fn context_menu_commands_hold_no_sub_commands() {
        let mut command = ApplicationCommand::message("Quote");
        assert!(matches!(
            command.command(CommandOption::sub_command("x")),
            Err(DeclarationError::NotChatInput { .. })
        ));
    }
}
