//! Error taxonomy.
//!
//! Each failure class has its own type so callers can match on what went
//! wrong; [`Error`] is the sum the async entity and command operations
//! return.

use thiserror::Error;

use crate::{
    commands::{CommandType, OptionType, ParamType},
    http::HttpError,
};

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A [`Maybe`] field was read while absent from its payload.
///
/// [`Maybe`]: crate::types::Maybe
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("field was absent from the payload")]
pub struct TriStateAccessError;

/// A command or option was declared incorrectly.
///
/// Raised while commands are being declared at startup. Always fatal to the
/// command in question.
#[derive(Debug, Error)]
pub enum DeclarationError {
    #[error("parameter `{param}` on `{command}` has no option declared")]
    MissingOption { command: String, param: String },
    #[error("parameter `{param}` on `{command}` has type {ty:?}, which has no option type")]
    UnsupportedType {
        command: String,
        param: String,
        ty: ParamType,
    },
    #[error("parameter `{param}` on `{command}` has type {ty:?}, which {kind:?} commands don't accept")]
    IncorrectType {
        command: String,
        param: String,
        ty: ParamType,
        kind: CommandType,
    },
    #[error("sub-commands cannot be three levels deep (`{name}`)")]
    TooDeep { name: String },
    #[error("sub-commands can only be attached to chat input commands, not `{command}`")]
    NotChatInput { command: String },
    #[error("option `{name}` is not a sub-command and cannot hold sub-commands")]
    NotSubCommand { name: String },
    #[error("user command `{command}` must take exactly one user or member, found {found} parameters")]
    UserCommandArity { command: String, found: usize },
    #[error("message command `{command}` takes at most two parameters, found {found}")]
    MessageCommandArity { command: String, found: usize },
    #[error("message command `{command}` has no message or user parameter")]
    NoTarget { command: String },
    #[error("`{name}` is declared twice")]
    Duplicate { name: String },
}

/// An interaction payload disagrees with itself or with our declarations.
///
/// The platform guarantees resolved data for every referenced ID, so any of
/// these means client and platform are out of sync.
#[derive(Debug, Error)]
pub enum PayloadIntegrityError {
    #[error("interaction carries no command data")]
    MissingData,
    #[error("no resolved {map} entry for id {id}")]
    Unresolved { map: &'static str, id: String },
    #[error("option `{name}` is not declared on `{scope}`")]
    UndeclaredOption { scope: String, name: String },
    #[error("sub-command `{name}` is not declared on `{scope}`")]
    UndeclaredSubCommand { scope: String, name: String },
    #[error("option `{name}` expected {expected}, got {found}")]
    InvalidValue {
        name: String,
        expected: &'static str,
        found: serde_json::Value,
    },
    #[error("option `{name}` is declared as {declared:?} but arrived as {found:?}")]
    TypeMismatch {
        name: String,
        declared: Option<OptionType>,
        found: OptionType,
    },
    #[error("option `{name}` appears more than once")]
    DuplicateOption { name: String },
    #[error("option `{name}` has unsupported wire type {kind}")]
    UnsupportedOptionType { name: String, kind: u8 },
    #[error("autocomplete interaction has no focused option")]
    NoFocusedOption,
}

/// Everything an entity or command operation can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Declaration(#[from] DeclarationError),
    #[error(transparent)]
    PayloadIntegrity(#[from] PayloadIntegrityError),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    TriStateAccess(#[from] TriStateAccessError),
    #[error("failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0} is not available on this entity")]
    MissingContext(&'static str),
    #[error("this interaction has already been responded to")]
    AlreadyResponded,
    #[error("command callback failed: {0}")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap an application error raised inside a command callback.
    pub fn callback(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Callback(source.into())
    }
}
