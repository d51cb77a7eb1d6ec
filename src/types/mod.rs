//! Discord API entities.
//!
//! Plain data (users, roles, attachments) is deserialized straight into
//! serde structs. Entities that can act on the API (channels, members,
//! messages, interactions) also keep a clone of the session [`State`] and
//! expose async methods that go through its
//! [`HttpClient`](crate::http::HttpClient).
//!
//! [`State`]: crate::state::State

pub mod attachment;
pub mod channel;
pub mod flags;
pub mod id;
pub mod interaction;
pub mod member;
pub mod message;
pub mod missing;
pub mod role;
pub mod role_connection;
pub mod user;
pub mod util;

pub use self::{missing::Maybe, util::Timestamp};
