//! A Discord bot framework built around application commands.
//!
//! The crate deals in typed entities rather than raw JSON: every channel,
//! member, message and interaction is bound to a shared [`State`] and can
//! call the API through it. Commands are declared with builders, registered
//! with Discord by [`Commands::instantiate_all`], and receive their options
//! already converted to entities when [`Commands::dispatch`] routes an
//! interaction to them.
//!
//! The gateway connection and the HTTP client's network layer are left to
//! the embedding application: hand gateway payloads to
//! [`Event::from_payload`] and implement [`Transport`] for whatever HTTP
//! stack you use.
//!
//! ```no_run
//! use cordial::{
//!     commands::{ApplicationCommand, CommandOption, Commands, Param, ParamType},
//!     state::State,
//!     types::interaction::InteractionCallbackData,
//! };
//!
//! # fn declare(state: State) -> cordial::error::Result<()> {
//! let mut commands = Commands::new(state);
//! commands.add(
//!     ApplicationCommand::chat_input("echo")
//!         .description("Repeat after me")
//!         .params([Param::new("text", ParamType::String)
//!             .option(CommandOption::new().description("What to say"))])?
//!         .callback(|invocation| async move {
//!             let text = invocation.arguments.string("text").unwrap_or_default().to_owned();
//!             invocation
//!                 .interaction
//!                 .respond(InteractionCallbackData::content(text))
//!                 .await
//!         }),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! [`State`]: state::State
//! [`Commands::instantiate_all`]: commands::Commands::instantiate_all
//! [`Commands::dispatch`]: commands::Commands::dispatch
//! [`Event::from_payload`]: events::Event::from_payload
//! [`Transport`]: http::Transport

pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod state;
pub mod types;

#[cfg(test)]
mod test_util;
