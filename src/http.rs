//! Typed router over a pluggable HTTP transport.
//!
//! All outbound calls go through [`HttpClient`] so that routing, logging and
//! error handling live in one place. Moving bytes over the network (auth
//! headers, TLS, rate-limit buckets, retries) belongs to the [`Transport`]
//! the embedding application supplies; this module only knows which method
//! and URL template each endpoint uses and what body it carries.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    sync::Arc,
};
use thiserror::Error;
use tracing::debug;

use crate::{
    commands::RegisteredCommand,
    types::{
        channel::{FollowedChannel, PermissionOverwrite, ThreadMember},
        id::{
            marker::{
                ApplicationMarker, ChannelMarker, CommandMarker, GenericMarker, GuildMarker,
                InteractionMarker, MessageMarker, RoleMarker, UserMarker,
            },
            Id,
        },
        interaction::InteractionResponse,
        message::{CreateMessage, Message},
        role_connection::ApplicationRoleConnectionMetadata,
        Timestamp,
    },
};

/// Base URL every [`Route`] path is relative to.
pub const BASE_URL: &str = "https://discord.com/api/v10";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum HttpError {
    /// Non-success status from Discord.
    #[error("Discord API error {status} on {route}: {body}")]
    Api {
        status: u16,
        body: String,
        route: String,
    },
    /// Transport / network error.
    #[error("HTTP transport error: {0}")]
    Transport(String),
    /// Serialisation error.
    #[error("Serialisation error: {0}")]
    Serde(String),
}

// ---------------------------------------------------------------------------
// Routes and requests
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// One endpoint: its method, URL template and the concrete path.
///
/// The template (e.g. `channels/{channel_id}/messages`) is what transports
/// should bucket rate limits by; the path is what gets requested.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Route {
    pub method: Method,
    pub template: &'static str,
    pub path: String,
}

impl Route {
    pub fn new(method: Method, template: &'static str, path: impl Into<String>) -> Self {
        Self {
            method,
            template,
            path: path.into(),
        }
    }

    /// Rate-limit key, `METHOD /template`.
    pub fn key(&self) -> String {
        format!("{} /{}", self.method, self.template)
    }

    /// Absolute URL of this route.
    pub fn url(&self) -> String {
        format!("{}/{}", BASE_URL, self.path.trim_start_matches('/'))
    }
}

/// A fully-described request handed to the [`Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub route: Route,
    pub body: Option<Value>,
    pub query: Vec<(&'static str, String)>,
    /// Audit log reason, sent as `X-Audit-Log-Reason`.
    pub reason: Option<String>,
}

impl Request {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            body: None,
            query: Vec::new(),
            reason: None,
        }
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub fn reason(mut self, reason: Option<&str>) -> Self {
        self.reason = reason.map(str::to_owned);
        self
    }
}

/// Executes requests against the API.
///
/// Implementations return the decoded JSON body, or [`Value::Null`] for
/// `204 No Content`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, request: Request) -> Result<Value, HttpError>;
}

// ---------------------------------------------------------------------------
// HttpClient
// ---------------------------------------------------------------------------

/// The typed router. Cheap to clone (the transport is behind `Arc`).
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
}

impl HttpClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send a request, returning the raw JSON body.
    pub async fn request(&self, request: Request) -> Result<Value, HttpError> {
        debug!(
            route = %request.route.key(),
            path = %request.route.path,
            has_body = request.body.is_some(),
            "sending request"
        );
        self.transport.request(request).await
    }

    /// Like [`request`](Self::request) but deserialises the response body.
    pub async fn request_json<T: DeserializeOwned>(&self, request: Request) -> Result<T, HttpError> {
        let route = request.route.key();
        let value = self.request(request).await?;
        serde_json::from_value(value).map_err(|e| HttpError::Serde(format!("{e} on {route}")))
    }

    async fn request_empty(&self, request: Request) -> Result<(), HttpError> {
        self.request(request).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Channels
    // ------------------------------------------------------------------

    pub async fn get_channel(&self, channel_id: Id<ChannelMarker>) -> Result<Value, HttpError> {
        let route = Route::new(
            Method::Get,
            "channels/{channel_id}",
            format!("channels/{channel_id}"),
        );
        self.request(Request::new(route)).await
    }

    /// `PATCH` a channel; `body` is a serialized modify payload.
    pub async fn modify_channel(
        &self,
        channel_id: Id<ChannelMarker>,
        body: Value,
        reason: Option<&str>,
    ) -> Result<Value, HttpError> {
        let route = Route::new(
            Method::Patch,
            "channels/{channel_id}",
            format!("channels/{channel_id}"),
        );
        self.request(Request::new(route).body(body).reason(reason))
            .await
    }

    pub async fn delete_channel(
        &self,
        channel_id: Id<ChannelMarker>,
        reason: Option<&str>,
    ) -> Result<Value, HttpError> {
        let route = Route::new(
            Method::Delete,
            "channels/{channel_id}",
            format!("channels/{channel_id}"),
        );
        self.request(Request::new(route).reason(reason)).await
    }

    pub async fn edit_channel_permissions(
        &self,
        channel_id: Id<ChannelMarker>,
        overwrite: &PermissionOverwrite,
        reason: Option<&str>,
    ) -> Result<(), HttpError> {
        let route = Route::new(
            Method::Put,
            "channels/{channel_id}/permissions/{overwrite_id}",
            format!("channels/{channel_id}/permissions/{}", overwrite.id),
        );
        let body = json!({
            "allow": overwrite.allow,
            "deny": overwrite.deny,
            "type": overwrite.kind,
        });
        self.request_empty(Request::new(route).body(body).reason(reason))
            .await
    }

    pub async fn delete_channel_permission(
        &self,
        channel_id: Id<ChannelMarker>,
        overwrite_id: Id<GenericMarker>,
        reason: Option<&str>,
    ) -> Result<(), HttpError> {
        let route = Route::new(
            Method::Delete,
            "channels/{channel_id}/permissions/{overwrite_id}",
            format!("channels/{channel_id}/permissions/{overwrite_id}"),
        );
        self.request_empty(Request::new(route).reason(reason)).await
    }

    pub async fn follow_announcement_channel(
        &self,
        channel_id: Id<ChannelMarker>,
        webhook_channel_id: Id<ChannelMarker>,
    ) -> Result<FollowedChannel, HttpError> {
        let route = Route::new(
            Method::Post,
            "channels/{channel_id}/followers",
            format!("channels/{channel_id}/followers"),
        );
        let body = json!({ "webhook_channel_id": webhook_channel_id });
        self.request_json(Request::new(route).body(body)).await
    }

    // ------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------

    pub async fn create_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message: &CreateMessage,
    ) -> Result<Message, HttpError> {
        let route = Route::new(
            Method::Post,
            "channels/{channel_id}/messages",
            format!("channels/{channel_id}/messages"),
        );
        let body = serde_json::to_value(message).map_err(|e| HttpError::Serde(e.to_string()))?;
        self.request_json(Request::new(route).body(body)).await
    }

    pub async fn bulk_delete_messages(
        &self,
        channel_id: Id<ChannelMarker>,
        message_ids: &[Id<MessageMarker>],
        reason: Option<&str>,
    ) -> Result<(), HttpError> {
        let route = Route::new(
            Method::Post,
            "channels/{channel_id}/messages/bulk-delete",
            format!("channels/{channel_id}/messages/bulk-delete"),
        );
        let body = json!({ "messages": message_ids });
        self.request_empty(Request::new(route).body(body).reason(reason))
            .await
    }

    pub async fn get_pinned_messages(
        &self,
        channel_id: Id<ChannelMarker>,
    ) -> Result<Vec<Message>, HttpError> {
        let route = Route::new(
            Method::Get,
            "channels/{channel_id}/pins",
            format!("channels/{channel_id}/pins"),
        );
        self.request_json(Request::new(route)).await
    }

    pub async fn pin_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        reason: Option<&str>,
    ) -> Result<(), HttpError> {
        let route = Route::new(
            Method::Put,
            "channels/{channel_id}/pins/{message_id}",
            format!("channels/{channel_id}/pins/{message_id}"),
        );
        self.request_empty(Request::new(route).reason(reason)).await
    }

    pub async fn unpin_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        reason: Option<&str>,
    ) -> Result<(), HttpError> {
        let route = Route::new(
            Method::Delete,
            "channels/{channel_id}/pins/{message_id}",
            format!("channels/{channel_id}/pins/{message_id}"),
        );
        self.request_empty(Request::new(route).reason(reason)).await
    }

    // ------------------------------------------------------------------
    // Threads
    // ------------------------------------------------------------------

    pub async fn start_thread_from_message(
        &self,
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
        body: Value,
        reason: Option<&str>,
    ) -> Result<Value, HttpError> {
        let route = Route::new(
            Method::Post,
            "channels/{channel_id}/messages/{message_id}/threads",
            format!("channels/{channel_id}/messages/{message_id}/threads"),
        );
        self.request(Request::new(route).body(body).reason(reason))
            .await
    }

    /// Start a thread without a starter message. In forum channels the body
    /// must carry the opening `message`.
    pub async fn start_thread(
        &self,
        channel_id: Id<ChannelMarker>,
        body: Value,
        reason: Option<&str>,
    ) -> Result<Value, HttpError> {
        let route = Route::new(
            Method::Post,
            "channels/{channel_id}/threads",
            format!("channels/{channel_id}/threads"),
        );
        self.request(Request::new(route).body(body).reason(reason))
            .await
    }

    /// List archived threads. `template` selects public, private or joined
    /// private listings.
    async fn archived_threads(
        &self,
        template: &'static str,
        path: String,
        before: Option<&Timestamp>,
        limit: Option<u16>,
    ) -> Result<Value, HttpError> {
        let mut request = Request::new(Route::new(Method::Get, template, path));
        if let Some(before) = before {
            request = request.query("before", before);
        }
        if let Some(limit) = limit {
            request = request.query("limit", limit);
        }
        self.request(request).await
    }

    pub async fn list_public_archived_threads(
        &self,
        channel_id: Id<ChannelMarker>,
        before: Option<&Timestamp>,
        limit: Option<u16>,
    ) -> Result<Value, HttpError> {
        self.archived_threads(
            "channels/{channel_id}/threads/archived/public",
            format!("channels/{channel_id}/threads/archived/public"),
            before,
            limit,
        )
        .await
    }

    pub async fn list_private_archived_threads(
        &self,
        channel_id: Id<ChannelMarker>,
        before: Option<&Timestamp>,
        limit: Option<u16>,
    ) -> Result<Value, HttpError> {
        self.archived_threads(
            "channels/{channel_id}/threads/archived/private",
            format!("channels/{channel_id}/threads/archived/private"),
            before,
            limit,
        )
        .await
    }

    pub async fn list_joined_private_archived_threads(
        &self,
        channel_id: Id<ChannelMarker>,
        before: Option<&Timestamp>,
        limit: Option<u16>,
    ) -> Result<Value, HttpError> {
        self.archived_threads(
            "channels/{channel_id}/users/@me/threads/archived/private",
            format!("channels/{channel_id}/users/@me/threads/archived/private"),
            before,
            limit,
        )
        .await
    }

    pub async fn join_thread(&self, channel_id: Id<ChannelMarker>) -> Result<(), HttpError> {
        let route = Route::new(
            Method::Put,
            "channels/{channel_id}/thread-members/@me",
            format!("channels/{channel_id}/thread-members/@me"),
        );
        self.request_empty(Request::new(route)).await
    }

    pub async fn leave_thread(&self, channel_id: Id<ChannelMarker>) -> Result<(), HttpError> {
        let route = Route::new(
            Method::Delete,
            "channels/{channel_id}/thread-members/@me",
            format!("channels/{channel_id}/thread-members/@me"),
        );
        self.request_empty(Request::new(route)).await
    }

    pub async fn add_thread_member(
        &self,
        channel_id: Id<ChannelMarker>,
        user_id: Id<UserMarker>,
    ) -> Result<(), HttpError> {
        let route = Route::new(
            Method::Put,
            "channels/{channel_id}/thread-members/{user_id}",
            format!("channels/{channel_id}/thread-members/{user_id}"),
        );
        self.request_empty(Request::new(route)).await
    }

    pub async fn remove_thread_member(
        &self,
        channel_id: Id<ChannelMarker>,
        user_id: Id<UserMarker>,
    ) -> Result<(), HttpError> {
        let route = Route::new(
            Method::Delete,
            "channels/{channel_id}/thread-members/{user_id}",
            format!("channels/{channel_id}/thread-members/{user_id}"),
        );
        self.request_empty(Request::new(route)).await
    }

    pub async fn get_thread_member(
        &self,
        channel_id: Id<ChannelMarker>,
        user_id: Id<UserMarker>,
    ) -> Result<ThreadMember, HttpError> {
        let route = Route::new(
            Method::Get,
            "channels/{channel_id}/thread-members/{user_id}",
            format!("channels/{channel_id}/thread-members/{user_id}"),
        );
        self.request_json(Request::new(route)).await
    }

    pub async fn get_thread_members(
        &self,
        channel_id: Id<ChannelMarker>,
    ) -> Result<Vec<ThreadMember>, HttpError> {
        let route = Route::new(
            Method::Get,
            "channels/{channel_id}/thread-members",
            format!("channels/{channel_id}/thread-members"),
        );
        self.request_json(Request::new(route)).await
    }

    // ------------------------------------------------------------------
    // Guild members
    // ------------------------------------------------------------------

    pub async fn modify_guild_member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        body: Value,
        reason: Option<&str>,
    ) -> Result<Value, HttpError> {
        let route = Route::new(
            Method::Patch,
            "guilds/{guild_id}/members/{user_id}",
            format!("guilds/{guild_id}/members/{user_id}"),
        );
        self.request(Request::new(route).body(body).reason(reason))
            .await
    }

    pub async fn add_guild_member_role(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
        reason: Option<&str>,
    ) -> Result<(), HttpError> {
        let route = Route::new(
            Method::Put,
            "guilds/{guild_id}/members/{user_id}/roles/{role_id}",
            format!("guilds/{guild_id}/members/{user_id}/roles/{role_id}"),
        );
        self.request_empty(Request::new(route).reason(reason)).await
    }

    pub async fn remove_guild_member_role(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
        reason: Option<&str>,
    ) -> Result<(), HttpError> {
        let route = Route::new(
            Method::Delete,
            "guilds/{guild_id}/members/{user_id}/roles/{role_id}",
            format!("guilds/{guild_id}/members/{user_id}/roles/{role_id}"),
        );
        self.request_empty(Request::new(route).reason(reason)).await
    }

    pub async fn remove_guild_member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: Option<&str>,
    ) -> Result<(), HttpError> {
        let route = Route::new(
            Method::Delete,
            "guilds/{guild_id}/members/{user_id}",
            format!("guilds/{guild_id}/members/{user_id}"),
        );
        self.request_empty(Request::new(route).reason(reason)).await
    }

    // ------------------------------------------------------------------
    // Application commands
    // ------------------------------------------------------------------

    pub async fn get_global_commands(
        &self,
        application_id: Id<ApplicationMarker>,
    ) -> Result<Vec<RegisteredCommand>, HttpError> {
        let route = Route::new(
            Method::Get,
            "applications/{application_id}/commands",
            format!("applications/{application_id}/commands"),
        );
        self.request_json(Request::new(route)).await
    }

    pub async fn create_global_command(
        &self,
        application_id: Id<ApplicationMarker>,
        body: Value,
    ) -> Result<RegisteredCommand, HttpError> {
        let route = Route::new(
            Method::Post,
            "applications/{application_id}/commands",
            format!("applications/{application_id}/commands"),
        );
        self.request_json(Request::new(route).body(body)).await
    }

    pub async fn edit_global_command(
        &self,
        application_id: Id<ApplicationMarker>,
        command_id: Id<CommandMarker>,
        body: Value,
    ) -> Result<RegisteredCommand, HttpError> {
        let route = Route::new(
            Method::Patch,
            "applications/{application_id}/commands/{command_id}",
            format!("applications/{application_id}/commands/{command_id}"),
        );
        self.request_json(Request::new(route).body(body)).await
    }

    pub async fn delete_global_command(
        &self,
        application_id: Id<ApplicationMarker>,
        command_id: Id<CommandMarker>,
    ) -> Result<(), HttpError> {
        let route = Route::new(
            Method::Delete,
            "applications/{application_id}/commands/{command_id}",
            format!("applications/{application_id}/commands/{command_id}"),
        );
        self.request_empty(Request::new(route)).await
    }

    pub async fn get_guild_commands(
        &self,
        application_id: Id<ApplicationMarker>,
        guild_id: Id<GuildMarker>,
    ) -> Result<Vec<RegisteredCommand>, HttpError> {
        let route = Route::new(
            Method::Get,
            "applications/{application_id}/guilds/{guild_id}/commands",
            format!("applications/{application_id}/guilds/{guild_id}/commands"),
        );
        self.request_json(Request::new(route)).await
    }

    pub async fn create_guild_command(
        &self,
        application_id: Id<ApplicationMarker>,
        guild_id: Id<GuildMarker>,
        body: Value,
    ) -> Result<RegisteredCommand, HttpError> {
        let route = Route::new(
            Method::Post,
            "applications/{application_id}/guilds/{guild_id}/commands",
            format!("applications/{application_id}/guilds/{guild_id}/commands"),
        );
        self.request_json(Request::new(route).body(body)).await
    }

    pub async fn edit_guild_command(
        &self,
        application_id: Id<ApplicationMarker>,
        guild_id: Id<GuildMarker>,
        command_id: Id<CommandMarker>,
        body: Value,
    ) -> Result<RegisteredCommand, HttpError> {
        let route = Route::new(
            Method::Patch,
            "applications/{application_id}/guilds/{guild_id}/commands/{command_id}",
            format!("applications/{application_id}/guilds/{guild_id}/commands/{command_id}"),
        );
        self.request_json(Request::new(route).body(body)).await
    }

    pub async fn delete_guild_command(
        &self,
        application_id: Id<ApplicationMarker>,
        guild_id: Id<GuildMarker>,
        command_id: Id<CommandMarker>,
    ) -> Result<(), HttpError> {
        let route = Route::new(
            Method::Delete,
            "applications/{application_id}/guilds/{guild_id}/commands/{command_id}",
            format!("applications/{application_id}/guilds/{guild_id}/commands/{command_id}"),
        );
        self.request_empty(Request::new(route)).await
    }

    // ------------------------------------------------------------------
    // Interactions
    // ------------------------------------------------------------------

    /// Respond to an interaction (initial response).
    pub async fn create_interaction_response(
        &self,
        interaction_id: Id<InteractionMarker>,
        interaction_token: &str,
        response: &InteractionResponse,
    ) -> Result<(), HttpError> {
        let route = Route::new(
            Method::Post,
            "interactions/{interaction_id}/{interaction_token}/callback",
            format!("interactions/{interaction_id}/{interaction_token}/callback"),
        );
        let body = serde_json::to_value(response).map_err(|e| HttpError::Serde(e.to_string()))?;
        // Discord returns 204 No Content on success.
        self.request_empty(Request::new(route).body(body)).await
    }

    /// Edit the original interaction response (deferred or follow-up).
    pub async fn edit_original_interaction_response(
        &self,
        application_id: Id<ApplicationMarker>,
        interaction_token: &str,
        message: &CreateMessage,
    ) -> Result<Message, HttpError> {
        let route = Route::new(
            Method::Patch,
            "webhooks/{application_id}/{interaction_token}/messages/@original",
            format!("webhooks/{application_id}/{interaction_token}/messages/@original"),
        );
        let body = serde_json::to_value(message).map_err(|e| HttpError::Serde(e.to_string()))?;
        self.request_json(Request::new(route).body(body)).await
    }

    // ------------------------------------------------------------------
    // Role connections
    // ------------------------------------------------------------------

    pub async fn get_role_connection_metadata(
        &self,
        application_id: Id<ApplicationMarker>,
    ) -> Result<Vec<ApplicationRoleConnectionMetadata>, HttpError> {
        let route = Route::new(
            Method::Get,
            "applications/{application_id}/role-connections/metadata",
            format!("applications/{application_id}/role-connections/metadata"),
        );
        self.request_json(Request::new(route)).await
    }

    pub async fn update_role_connection_metadata(
        &self,
        application_id: Id<ApplicationMarker>,
        records: &[ApplicationRoleConnectionMetadata],
    ) -> Result<Vec<ApplicationRoleConnectionMetadata>, HttpError> {
        let route = Route::new(
            Method::Put,
            "applications/{application_id}/role-connections/metadata",
            format!("applications/{application_id}/role-connections/metadata"),
        );
        let body = serde_json::to_value(records).map_err(|e| HttpError::Serde(e.to_string()))?;
        self.request_json(Request::new(route).body(body)).await
    }
}

impl Debug for HttpClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("HttpClient")
            .field("transport", &"<dyn Transport>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpError, Method, Route};
    use crate::{
        test_util::{state, MockTransport},
        types::id::Id,
    };
    use serde_json::json;

    #[test]
    fn route_key_uses_the_template() {
        let route = Route::new(
            Method::Post,
            "channels/{channel_id}/messages",
            "channels/42/messages",
        );
        assert_eq!(route.key(), "POST /channels/{channel_id}/messages");
        assert_eq!(
            route.url(),
            "https://discord.com/api/v10/channels/42/messages"
        );
    }

    #[tokio::test]
    async fn archived_threads_carry_query_parameters() {
        let transport = MockTransport::new();
        let state = state(&transport);
        transport.reply(json!({ "threads": [], "members": [], "has_more": false }));

        state
            .http()
            .list_public_archived_threads(Id::new(7), None, Some(50))
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].route.method, Method::Get);
        assert_eq!(requests[0].route.path, "channels/7/threads/archived/public");
        assert_eq!(requests[0].query, vec![("limit", "50".to_owned())]);
    }

    #[tokio::test]
    async fn malformed_bodies_become_serde_errors() {
        let transport = MockTransport::new();
        let state = state(&transport);
        transport.reply(json!({ "not": "a list" }));

        let error = state
            .http()
            .get_pinned_messages(Id::new(1))
            .await
            .unwrap_err();
        assert!(matches!(error, HttpError::Serde(_)));
    }
}
