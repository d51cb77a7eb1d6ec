//! Decoding interaction option trees into callback arguments.

use serde::Deserialize;
use serde_json::Value;
use std::{future::Future, pin::Pin, sync::Arc};
use tracing::trace;

use crate::{
    commands::{
        callback::{Argument, Arguments, Callback, Invocation},
        command::{ApplicationCommand, CommandType},
        option::{CommandOption, OptionType},
        signature::ParamType,
    },
    error::{Error, PayloadIntegrityError, Result},
    types::{
        attachment::Attachment,
        channel::identify_channel,
        interaction::{Interaction, InteractionData, InteractionOption, ResolvedData},
        member::Member,
        message::Message,
        role::Role,
        user::User,
    },
};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The declarations visible at one level of the option tree.
#[derive(Clone, Copy)]
pub(crate) struct Scope<'a> {
    name: &'a str,
    options: &'a [CommandOption],
    subs: &'a [CommandOption],
    hook: Option<&'a Callback>,
}

impl<'a> Scope<'a> {
    pub(crate) fn command(command: &'a ApplicationCommand) -> Self {
        Self {
            name: &command.name,
            options: &command.options,
            subs: &command.subs,
            hook: command.callback.as_ref(),
        }
    }

    pub(crate) fn option(option: &'a CommandOption) -> Self {
        Self {
            name: option.label(),
            options: option.options(),
            subs: option.sub_commands(),
            hook: option.hook(),
        }
    }

    pub(crate) fn declared(&self, name: &str) -> Result<&'a CommandOption, PayloadIntegrityError> {
        self.options
            .iter()
            .find(|option| option.label() == name)
            .ok_or_else(|| PayloadIntegrityError::UndeclaredOption {
                scope: self.name.to_owned(),
                name: name.to_owned(),
            })
    }

    pub(crate) fn sub_command(
        &self,
        name: &str,
    ) -> Result<&'a CommandOption, PayloadIntegrityError> {
        self.subs
            .iter()
            .find(|sub| sub.label() == name)
            .ok_or_else(|| PayloadIntegrityError::UndeclaredSubCommand {
                scope: self.name.to_owned(),
                name: name.to_owned(),
            })
    }
}

/// Run `command` for an application command interaction.
pub(crate) async fn invoke_command(
    command: &ApplicationCommand,
    interaction: Arc<Interaction>,
) -> Result<()> {
    let data = interaction.data()?;

    match command.kind {
        CommandType::ChatInput => {
            let arguments =
                process_options(Scope::command(command), &interaction, &data.options, false)
                    .await?;
            if command.subs.is_empty() {
                call(command.callback.as_ref(), &interaction, arguments).await?;
            }
        }
        CommandType::User => {
            let arguments = bind_user_target(command, &interaction, data)?;
            call(command.callback.as_ref(), &interaction, arguments).await?;
        }
        CommandType::Message => {
            let arguments = bind_message_target(command, &interaction, data)?;
            call(command.callback.as_ref(), &interaction, arguments).await?;
        }
        CommandType::Unknown(kind) => {
            trace!(command = %command.name, kind, "not invoking command of unknown type");
        }
    }

    Ok(())
}

/// Walk `nodes`, binding leaves and invoking sub-command callbacks.
///
/// Returns the arguments bound at this level. Sub-command and group nodes
/// are dispatched here rather than returned.
pub(crate) fn process_options<'a>(
    scope: Scope<'a>,
    interaction: &'a Arc<Interaction>,
    nodes: &'a [InteractionOption],
    grouped: bool,
) -> BoxFuture<'a, Result<Arguments>> {
    Box::pin(async move {
        let data = interaction.data()?;
        let mut arguments = Arguments::default();

        for node in nodes {
            match node.kind {
                OptionType::SubCommand => {
                    let sub = scope.sub_command(&node.name)?;
                    let bound =
                        process_options(Scope::option(sub), interaction, &node.options, false)
                            .await?;
                    if !grouped {
                        call(scope.hook, interaction, Arguments::default()).await?;
                    }
                    call(sub.hook(), interaction, bound).await?;
                }
                OptionType::SubCommandGroup => {
                    let group = scope.sub_command(&node.name)?;
                    call(group.hook(), interaction, Arguments::default()).await?;
                    process_options(Scope::option(group), interaction, &node.options, true)
                        .await?;
                }
                _ => {
                    let option = scope.declared(&node.name)?;
                    if option.option_type() != Some(node.kind) {
                        return Err(PayloadIntegrityError::TypeMismatch {
                            name: node.name.clone(),
                            declared: option.option_type(),
                            found: node.kind,
                        }
                        .into());
                    }
                    let param = option.parameter().unwrap_or(node.name.as_str());
                    if arguments.contains(param) {
                        return Err(PayloadIntegrityError::DuplicateOption {
                            name: node.name.clone(),
                        }
                        .into());
                    }
                    let value = bind_leaf(node, interaction, data)?;
                    arguments.insert(param, value);
                }
            }
        }

        Ok(arguments)
    })
}

async fn call(
    callback: Option<&Callback>,
    interaction: &Arc<Interaction>,
    arguments: Arguments,
) -> Result<()> {
    match callback {
        Some(callback) => {
            callback(Invocation {
                interaction: Arc::clone(interaction),
                arguments,
            })
            .await
        }
        None => Ok(()),
    }
}

/// Decode one leaf node.
fn bind_leaf(
    node: &InteractionOption,
    interaction: &Interaction,
    data: &InteractionData,
) -> Result<Argument> {
    let resolved = &data.resolved;

    Ok(match node.kind {
        OptionType::String => Argument::String(expect(node, "a string", Value::as_str)?.to_owned()),
        OptionType::Integer => Argument::Integer(expect(node, "an integer", Value::as_i64)?),
        OptionType::Boolean => Argument::Boolean(expect(node, "a boolean", Value::as_bool)?),
        OptionType::Number => Argument::Number(expect(node, "a number", Value::as_f64)?),
        OptionType::User => bind_user(snowflake(node)?, interaction, resolved)?,
        OptionType::Channel => {
            let payload = ResolvedData::lookup(&resolved.channels, "channels", snowflake(node)?)?;
            Argument::Channel(identify_channel(payload, interaction.state())?)
        }
        OptionType::Role => Argument::Role(bind_role(snowflake(node)?, resolved)?),
        OptionType::Mentionable => {
            let id = snowflake(node)?;
            if resolved.roles.is_empty() {
                bind_user(id, interaction, resolved)?
            } else {
                Argument::Role(bind_role(id, resolved)?)
            }
        }
        OptionType::Attachment => {
            let payload =
                ResolvedData::lookup(&resolved.attachments, "attachments", snowflake(node)?)?;
            Argument::Attachment(Attachment::deserialize(payload)?)
        }
        OptionType::SubCommand | OptionType::SubCommandGroup | OptionType::Unknown(_) => {
            return Err(PayloadIntegrityError::UnsupportedOptionType {
                name: node.name.clone(),
                kind: node.kind.into(),
            }
            .into())
        }
    })
}

fn expect<'a, T>(
    node: &'a InteractionOption,
    expected: &'static str,
    extract: impl FnOnce(&'a Value) -> Option<T>,
) -> Result<T, PayloadIntegrityError> {
    let value = node.value.as_ref();
    value
        .and_then(extract)
        .ok_or_else(|| PayloadIntegrityError::InvalidValue {
            name: node.name.clone(),
            expected,
            found: value.cloned().unwrap_or(Value::Null),
        })
}

/// Entity options carry the ID of their resolved entry as a string.
fn snowflake(node: &InteractionOption) -> Result<&str, PayloadIntegrityError> {
    expect(node, "an id string", Value::as_str)
}

/// A member when the interaction happened in a guild, otherwise a user.
fn bind_user(id: &str, interaction: &Interaction, resolved: &ResolvedData) -> Result<Argument> {
    let user = User::deserialize(ResolvedData::lookup(&resolved.users, "users", id)?)?;

    match interaction.guild_id() {
        Some(guild_id) => {
            let payload = ResolvedData::lookup(&resolved.members, "members", id)?;
            let member = Member::from_payload(payload, Some(guild_id), interaction.state())?;
            Ok(Argument::Member(member.with_user(user)))
        }
        None => Ok(Argument::User(user)),
    }
}

fn bind_role(id: &str, resolved: &ResolvedData) -> Result<Role> {
    let payload = ResolvedData::lookup(&resolved.roles, "roles", id)?;
    Ok(Role::deserialize(payload)?)
}

fn target_id(data: &InteractionData) -> Result<String, PayloadIntegrityError> {
    data.target_id
        .value()
        .map(ToString::to_string)
        .ok_or_else(|| PayloadIntegrityError::InvalidValue {
            name: data.name.clone(),
            expected: "a target id",
            found: Value::Null,
        })
}

/// The member or user a context menu command was used on.
fn bind_user_target(
    command: &ApplicationCommand,
    interaction: &Interaction,
    data: &InteractionData,
) -> Result<Arguments> {
    let mut arguments = Arguments::default();
    let Some(param) = command.params.iter().find(|param| !param.ty.is_context()) else {
        return Ok(arguments);
    };

    let target = target_id(data)?;
    arguments.insert(param.name(), bind_user(&target, interaction, &data.resolved)?);
    Ok(arguments)
}

/// The message a context menu command was used on, and who used it.
fn bind_message_target(
    command: &ApplicationCommand,
    interaction: &Interaction,
    data: &InteractionData,
) -> Result<Arguments> {
    let mut arguments = Arguments::default();

    for param in &command.params {
        if param.ty == ParamType::Message {
            let target = target_id(data)?;
            let payload = ResolvedData::lookup(&data.resolved.messages, "messages", &target)?;
            arguments.insert(param.name(), Argument::Message(Message::deserialize(payload)?));
        } else if param.ty.is_user() {
            arguments.insert(param.name(), requester(interaction)?);
        }
    }

    Ok(arguments)
}

fn requester(interaction: &Interaction) -> Result<Argument> {
    if let Some(member) = interaction.member() {
        return Ok(Argument::Member(member.clone()));
    }
    interaction
        .user()
        .cloned()
        .map(Argument::User)
        .ok_or(Error::MissingContext("requesting user"))
}
