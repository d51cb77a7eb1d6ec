//! Callback parameter lists.
//!
//! A callback's parameters are declared as an ordered list of [`Param`]s.
//! Each one names the argument the decoder binds, says what type it expects,
//! and (for chat input commands) carries the option it is filled from.

use crate::{
    commands::option::{CommandOption, OptionType},
    error::DeclarationError,
};

/// The declared type of a callback parameter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ParamType {
    /// A `self`-style receiver. Skipped.
    Receiver,
    /// The interaction being handled. Skipped; always passed.
    Interaction,
    String,
    Integer,
    Boolean,
    Number,
    User,
    Member,
    /// A user in DMs, a member in guilds.
    UserOrMember,
    Channel,
    Role,
    Attachment,
    /// A user, member, or role.
    Mentionable,
    Message,
}

impl ParamType {
    /// Wire type of the option a parameter of this type is filled from.
    pub const fn option_type(self) -> Option<OptionType> {
        Some(match self {
            Self::String => OptionType::String,
            Self::Integer => OptionType::Integer,
            Self::Boolean => OptionType::Boolean,
            Self::Number => OptionType::Number,
            Self::User | Self::Member | Self::UserOrMember => OptionType::User,
            Self::Channel => OptionType::Channel,
            Self::Role => OptionType::Role,
            Self::Mentionable => OptionType::Mentionable,
            Self::Attachment => OptionType::Attachment,
            Self::Receiver | Self::Interaction | Self::Message => return None,
        })
    }

    /// Parameters the caller never declares an option for.
    pub const fn is_context(self) -> bool {
        matches!(self, Self::Receiver | Self::Interaction)
    }

    pub(crate) const fn is_user(self) -> bool {
        matches!(self, Self::User | Self::Member | Self::UserOrMember)
    }
}

/// One declared callback parameter.
#[derive(Clone, Debug)]
pub struct Param {
    pub(crate) name: String,
    pub(crate) ty: ParamType,
    pub(crate) option: Option<CommandOption>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            option: None,
        }
    }

    /// The interaction parameter every callback starts with.
    pub fn interaction() -> Self {
        Self::new("interaction", ParamType::Interaction)
    }

    pub fn receiver() -> Self {
        Self::new("self", ParamType::Receiver)
    }

    /// Fill this parameter from `option`.
    pub fn option(mut self, option: CommandOption) -> Self {
        self.option = Some(option);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn ty(&self) -> ParamType {
        self.ty
    }
}

/// Turn the parameters of a chat input scope into its option list.
///
/// Context parameters are skipped. Every other parameter must carry an
/// option; its wire type comes from the parameter type unless the option set
/// one explicitly.
pub(crate) fn resolve_options(
    scope: &str,
    params: impl IntoIterator<Item = Param>,
) -> Result<Vec<CommandOption>, DeclarationError> {
    let mut options: Vec<CommandOption> = Vec::new();

    for param in params {
        if param.ty.is_context() {
            continue;
        }

        let Some(mut option) = param.option else {
            return Err(DeclarationError::MissingOption {
                command: scope.to_owned(),
                param: param.name,
            });
        };

        let kind = match (option.option_type(), param.ty.option_type()) {
            (Some(explicit), _) => explicit,
            (None, Some(derived)) => derived,
            (None, None) => {
                return Err(DeclarationError::UnsupportedType {
                    command: scope.to_owned(),
                    param: param.name,
                    ty: param.ty,
                })
            }
        };
        option.bind(&param.name, kind);

        if options.iter().any(|existing| existing.label() == option.label()) {
            return Err(DeclarationError::Duplicate {
                name: option.label().to_owned(),
            });
        }
        options.push(option);
    }

    Ok(options)
}
