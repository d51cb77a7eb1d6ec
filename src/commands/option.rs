//! Option declarations and their wire form.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::{
    collections::HashMap,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    future::Future,
};

use crate::{
    commands::{
        callback::{boxed_callback, boxed_completer, Callback, Completer, Completion, Invocation},
        signature::{resolve_options, Param},
    },
    error::{DeclarationError, Result},
    types::{channel::ChannelType, Maybe},
};

/// Locale → translated string.
pub type Localizations = HashMap<String, String>;

/// Sub-commands may nest a command → group → sub-command, no deeper.
pub const MAX_DEPTH: u8 = 2;

/// Wire type of an option.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u8", into = "u8")]
pub enum OptionType {
    SubCommand,
    SubCommandGroup,
    String,
    Integer,
    Boolean,
    User,
    Channel,
    Role,
    Mentionable,
    Number,
    Attachment,
    Unknown(u8),
}

impl OptionType {
    pub const fn is_sub_command(self) -> bool {
        matches!(self, Self::SubCommand | Self::SubCommandGroup)
    }
}

impl From<u8> for OptionType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::SubCommand,
            2 => Self::SubCommandGroup,
            3 => Self::String,
            4 => Self::Integer,
            5 => Self::Boolean,
            6 => Self::User,
            7 => Self::Channel,
            8 => Self::Role,
            9 => Self::Mentionable,
            10 => Self::Number,
            11 => Self::Attachment,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<OptionType> for u8 {
    fn from(value: OptionType) -> Self {
        match value {
            OptionType::SubCommand => 1,
            OptionType::SubCommandGroup => 2,
            OptionType::String => 3,
            OptionType::Integer => 4,
            OptionType::Boolean => 5,
            OptionType::User => 6,
            OptionType::Channel => 7,
            OptionType::Role => 8,
            OptionType::Mentionable => 9,
            OptionType::Number => 10,
            OptionType::Attachment => 11,
            OptionType::Unknown(unknown) => unknown,
        }
    }
}

/// The value of a choice.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    String(String),
    Integer(i64),
    Number(f64),
}

impl Display for ChoiceValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::String(value) => f.write_str(value),
            Self::Integer(value) => Display::fmt(value, f),
            Self::Number(value) => Display::fmt(value, f),
        }
    }
}

impl From<&str> for ChoiceValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ChoiceValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ChoiceValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ChoiceValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A predetermined value the user can pick.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CommandChoice {
    pub name: String,
    pub value: ChoiceValue,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub name_localizations: Maybe<Localizations>,
}

impl CommandChoice {
    /// A choice whose value is its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            value: ChoiceValue::String(name.clone()),
            name,
            name_localizations: Maybe::Missing,
        }
    }

    pub fn value(mut self, value: impl Into<ChoiceValue>) -> Self {
        self.value = value.into();
        self
    }

    pub fn name_localizations(mut self, localizations: Maybe<Localizations>) -> Self {
        self.name_localizations = localizations;
        self
    }
}

/// A declared option, sub-command, or sub-command group.
///
/// Leaf options are attached to a callback parameter through
/// [`Param::option`]; their wire type comes from the parameter's type unless
/// set with [`kind`](Self::kind). Sub-commands are built with
/// [`sub_command`](Self::sub_command) and attached with
/// [`command`](Self::command).
#[derive(Clone, Default)]
pub struct CommandOption {
    kind: Option<OptionType>,
    name: Option<String>,
    description: Option<String>,
    name_localizations: Maybe<Localizations>,
    description_localizations: Maybe<Localizations>,
    required: bool,
    choices: Vec<CommandChoice>,
    channel_types: Vec<ChannelType>,
    min_value: Option<f64>,
    max_value: Option<f64>,
    min_length: Option<u16>,
    max_length: Option<u16>,
    autocomplete: bool,
    completer: Option<Completer>,
    /// Parameter the decoded value is bound to.
    param: Option<String>,
    level: u8,
    callback: Option<Callback>,
    options: Vec<CommandOption>,
    subs: Vec<CommandOption>,
}

impl CommandOption {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sub-command, attachable to a chat input command or a group.
    pub fn sub_command(name: impl Into<String>) -> Self {
        Self {
            kind: Some(OptionType::SubCommand),
            name: Some(name.into()),
            level: 1,
            ..Self::default()
        }
    }

    /// Override the wire type instead of deriving it from the parameter.
    pub fn kind(mut self, kind: OptionType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Defaults to the parameter name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

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

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn choice(mut self, choice: CommandChoice) -> Self {
        self.choices.push(choice);
        self
    }

    pub fn choices(mut self, choices: impl IntoIterator<Item = CommandChoice>) -> Self {
        self.choices.extend(choices);
        self
    }

    pub fn channel_types(mut self, types: impl IntoIterator<Item = ChannelType>) -> Self {
        self.channel_types.extend(types);
        self
    }

    pub fn min_value(mut self, value: f64) -> Self {
        self.min_value = Some(value);
        self
    }

    pub fn max_value(mut self, value: f64) -> Self {
        self.max_value = Some(value);
        self
    }

    pub fn min_length(mut self, length: u16) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn max_length(mut self, length: u16) -> Self {
        self.max_length = Some(length);
        self
    }

    /// Suggest from the declared choices as the user types.
    ///
    /// The choices are then sent through autocomplete responses only, never
    /// with the declaration.
    pub fn autocomplete(mut self, autocomplete: bool) -> Self {
        self.autocomplete = autocomplete;
        self
    }

    /// Replace the default substring completer. Enables autocomplete.
    pub fn completer<F, Fut>(mut self, completer: F) -> Self
    where
        F: Fn(Completion) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<CommandChoice>>> + Send + 'static,
    {
        self.autocomplete = true;
        self.completer = Some(boxed_completer(completer));
        self
    }

    /// Declare the parameters of a sub-command.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::NotSubCommand`] on anything but a
    /// sub-command, and whatever [`Param`] resolution fails with.
    pub fn params(
        mut self,
        params: impl IntoIterator<Item = Param>,
    ) -> Result<Self, DeclarationError> {
        if self.kind != Some(OptionType::SubCommand) {
            return Err(DeclarationError::NotSubCommand {
                name: self.label().to_owned(),
            });
        }
        self.options = resolve_options(self.label(), params)?;
        Ok(self)
    }

    /// Called with the decoded arguments when this sub-command is invoked,
    /// or with none when this is a group one of whose sub-commands is.
    pub fn callback<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn(Invocation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.callback = Some(boxed_callback(callback));
        self
    }

    /// Attach a sub-command, turning this sub-command into a group.
    ///
    /// The first attachment drops any parameters declared on this option.
    ///
    /// # Errors
    ///
    /// Fails if either side isn't a sub-command, if the nesting would be
    /// three levels deep, or if a sub-command of the same name exists.
    pub fn command(&mut self, sub: CommandOption) -> Result<&mut CommandOption, DeclarationError> {
        if !self.is_sub_command() {
            return Err(DeclarationError::NotSubCommand {
                name: self.label().to_owned(),
            });
        }
        if self.level >= MAX_DEPTH {
            return Err(DeclarationError::TooDeep {
                name: sub.label().to_owned(),
            });
        }

        let index = attach(&mut self.options, &mut self.subs, sub, self.level + 1)?;
        self.kind = Some(OptionType::SubCommandGroup);
        Ok(&mut self.subs[index])
    }

    pub fn option_type(&self) -> Option<OptionType> {
        self.kind
    }

    pub fn declared_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name of the parameter this option binds to.
    pub fn parameter(&self) -> Option<&str> {
        self.param.as_deref()
    }

    /// 1 for sub-commands of a command, 2 for sub-commands of a group, 0 for
    /// leaf options.
    pub const fn level(&self) -> u8 {
        self.level
    }

    pub fn declared_choices(&self) -> &[CommandChoice] {
        &self.choices
    }

    pub const fn is_autocomplete(&self) -> bool {
        self.autocomplete
    }

    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    pub fn sub_commands(&self) -> &[CommandOption] {
        &self.subs
    }

    pub(crate) fn is_sub_command(&self) -> bool {
        self.kind.is_some_and(OptionType::is_sub_command)
    }

    pub(crate) fn label(&self) -> &str {
        self.name.as_deref().or(self.param.as_deref()).unwrap_or("")
    }

    pub(crate) fn hook(&self) -> Option<&Callback> {
        self.callback.as_ref()
    }

    pub(crate) fn custom_completer(&self) -> Option<&Completer> {
        self.completer.as_ref()
    }

    /// Bind a leaf option to its parameter, filling in the name and type.
    pub(crate) fn bind(&mut self, param: &str, kind: OptionType) {
        self.param = Some(param.to_owned());
        if self.name.is_none() {
            self.name = Some(param.to_owned());
        }
        if self.kind.is_none() {
            self.kind = Some(kind);
        }
    }

    fn set_level(&mut self, level: u8) -> Result<(), DeclarationError> {
        if level > MAX_DEPTH {
            return Err(DeclarationError::TooDeep {
                name: self.label().to_owned(),
            });
        }
        self.level = level;
        for sub in &mut self.subs {
            sub.set_level(level + 1)?;
        }
        Ok(())
    }

    pub(crate) fn to_payload(&self, default_description: &str) -> serde_json::Result<Value> {
        let nested = if self.subs.is_empty() {
            &self.options
        } else {
            &self.subs
        };
        let choices: &[CommandChoice] = if self.autocomplete { &[] } else { &self.choices };

        let payload = OptionPayload {
            kind: self.kind.unwrap_or(OptionType::String),
            name: self.label(),
            description: self.description.as_deref().unwrap_or(default_description),
            name_localizations: self.name_localizations.as_ref(),
            description_localizations: self.description_localizations.as_ref(),
            required: self.required,
            choices,
            channel_types: &self.channel_types,
            min_value: self.min_value.map(number),
            max_value: self.max_value.map(number),
            min_length: self.min_length,
            max_length: self.max_length,
            autocomplete: self.autocomplete,
            options: nested
                .iter()
                .map(|option| option.to_payload(default_description))
                .collect::<serde_json::Result<_>>()?,
        };
        serde_json::to_value(payload)
    }
}

impl Debug for CommandOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CommandOption")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("param", &self.param)
            .field("level", &self.level)
            .field("required", &self.required)
            .field("autocomplete", &self.autocomplete)
            .field("options", &self.options)
            .field("subs", &self.subs)
            .finish_non_exhaustive()
    }
}

/// Attach `sub` under a scope at `level`, replacing the flat option list on
/// the first attachment. Returns the index of `sub` in `subs`.
pub(crate) fn attach(
    options: &mut Vec<CommandOption>,
    subs: &mut Vec<CommandOption>,
    mut sub: CommandOption,
    level: u8,
) -> Result<usize, DeclarationError> {
    if !sub.is_sub_command() {
        return Err(DeclarationError::NotSubCommand {
            name: sub.label().to_owned(),
        });
    }
    if subs.iter().any(|existing| existing.label() == sub.label()) {
        return Err(DeclarationError::Duplicate {
            name: sub.label().to_owned(),
        });
    }
    sub.set_level(level)?;

    if subs.is_empty() {
        options.clear();
    }
    subs.push(sub);
    Ok(subs.len() - 1)
}

/// Integral bounds go out as integers so integer options accept them.
fn number(value: f64) -> Value {
    const EXACT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() < EXACT {
        Value::from(value as i64)
    } else {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

#[derive(Serialize)]
struct OptionPayload<'a> {
    #[serde(rename = "type")]
    kind: OptionType,
    name: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    name_localizations: Maybe<&'a Localizations>,
    #[serde(skip_serializing_if = "Maybe::is_missing")]
    description_localizations: Maybe<&'a Localizations>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    required: bool,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    choices: &'a [CommandChoice],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    channel_types: &'a [ChannelType],
    #[serde(skip_serializing_if = "Option::is_none")]
    min_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_length: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<u16>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    autocomplete: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    options: Vec<Value>,
}
