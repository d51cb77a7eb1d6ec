//! What command callbacks receive.

use futures_lite::future::Boxed;
use std::{
    collections::HashMap,
    fmt::{Debug, Formatter, Result as FmtResult},
    future::Future,
    sync::Arc,
};

use crate::{
    commands::option::CommandChoice,
    error::Result,
    types::{
        attachment::Attachment, channel::Channel, interaction::Interaction, member::Member,
        message::Message, role::Role, user::User,
    },
};

/// A command or sub-command handler.
pub type Callback = Arc<dyn Fn(Invocation) -> Boxed<Result<()>> + Send + Sync>;

/// An autocomplete handler, returning the choices to offer.
pub type Completer = Arc<dyn Fn(Completion) -> Boxed<Result<Vec<CommandChoice>>> + Send + Sync>;

pub(crate) fn boxed_callback<F, Fut>(f: F) -> Callback
where
    F: Fn(Invocation) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    Arc::new(move |invocation| -> Boxed<Result<()>> { Box::pin(f(invocation)) })
}

pub(crate) fn boxed_completer<F, Fut>(f: F) -> Completer
where
    F: Fn(Completion) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<CommandChoice>>> + Send + 'static,
{
    Arc::new(move |completion| -> Boxed<Result<Vec<CommandChoice>>> {
        Box::pin(f(completion))
    })
}

/// One call of a callback: the interaction and the arguments decoded from it.
///
/// Hooks on commands and groups that own sub-commands are called with empty
/// arguments.
#[derive(Debug)]
pub struct Invocation {
    pub interaction: Arc<Interaction>,
    pub arguments: Arguments,
}

/// A request for autocomplete suggestions.
#[derive(Debug)]
pub struct Completion {
    pub interaction: Arc<Interaction>,
    /// Name of the focused option.
    pub option: String,
    /// The static choices declared on the option.
    pub choices: Vec<CommandChoice>,
    /// What the user has typed so far.
    pub value: String,
}

/// A decoded option value.
pub enum Argument {
    String(String),
    Integer(i64),
    Boolean(bool),
    Number(f64),
    User(User),
    Member(Member),
    Channel(Channel),
    Role(Role),
    Attachment(Attachment),
    Message(Message),
}

impl Debug for Argument {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::String(value) => f.debug_tuple("String").field(value).finish(),
            Self::Integer(value) => f.debug_tuple("Integer").field(value).finish(),
            Self::Boolean(value) => f.debug_tuple("Boolean").field(value).finish(),
            Self::Number(value) => f.debug_tuple("Number").field(value).finish(),
            Self::User(user) => f.debug_tuple("User").field(&user.id).finish(),
            Self::Member(member) => f.debug_tuple("Member").field(member).finish(),
            Self::Channel(channel) => f.debug_tuple("Channel").field(channel).finish(),
            Self::Role(role) => f.debug_tuple("Role").field(&role.id).finish(),
            Self::Attachment(attachment) => {
                f.debug_tuple("Attachment").field(&attachment.id).finish()
            }
            Self::Message(message) => f.debug_tuple("Message").field(&message.id).finish(),
        }
    }
}

/// Arguments keyed by declared parameter name.
#[derive(Debug, Default)]
pub struct Arguments {
    values: HashMap<String, Argument>,
}

impl Arguments {
    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Argument) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.values.get(name)
    }

    /// Take ownership of an argument.
    pub fn remove(&mut self, name: &str) -> Option<Argument> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Argument::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            Argument::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            Argument::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// A number option. Integers widen.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Argument::Number(value) => Some(*value),
            Argument::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// The user behind a user or member argument.
    pub fn user(&self, name: &str) -> Option<&User> {
        match self.get(name)? {
            Argument::User(user) => Some(user),
            Argument::Member(member) => member.user().ok(),
            _ => None,
        }
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        match self.get(name)? {
            Argument::Member(member) => Some(member),
            _ => None,
        }
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        match self.get(name)? {
            Argument::Channel(channel) => Some(channel),
            _ => None,
        }
    }

    pub fn role(&self, name: &str) -> Option<&Role> {
        match self.get(name)? {
            Argument::Role(role) => Some(role),
            _ => None,
        }
    }

    pub fn attachment(&self, name: &str) -> Option<&Attachment> {
        match self.get(name)? {
            Argument::Attachment(attachment) => Some(attachment),
            _ => None,
        }
    }

    pub fn message(&self, name: &str) -> Option<&Message> {
        match self.get(name)? {
            Argument::Message(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Argument, Arguments};

    #[test]
    fn typed_getters_check_the_variant() {
        let mut arguments = Arguments::default();
        arguments.insert("count", Argument::Integer(3));
        arguments.insert("text", Argument::String("hi".to_owned()));

        assert_eq!(arguments.integer("count"), Some(3));
        assert_eq!(arguments.number("count"), Some(3.0));
        assert_eq!(arguments.string("count"), None);
        assert_eq!(arguments.string("text"), Some("hi"));
        assert_eq!(arguments.boolean("missing"), None);
        assert_eq!(arguments.len(), 2);
    }
}
