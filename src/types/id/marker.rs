//! Markers for the resource types an [`Id`] can point at.
//!
//! Markers perform no logical action. They exist so that a role ID can't be
//! passed where a user ID is required: `Id<RoleMarker>` and `Id<UserMarker>`
//! are distinct types even though both are 64-bit integers on the wire.
//!
//! [`Id`]: super::Id

// DEVELOPMENT: markers are never constructed, only named in type position.

/// Marker for application IDs.
///
/// The authenticated bot user shares its ID with its application, see
/// [`State::application_id`].
///
/// [`State::application_id`]: crate::state::State::application_id
#[derive(Debug)]
#[non_exhaustive]
pub struct ApplicationMarker;

/// Marker for attachment IDs.
///
/// [`Attachment`] uses this ID marker.
///
/// [`Attachment`]: crate::types::attachment::Attachment
#[derive(Debug)]
#[non_exhaustive]
pub struct AttachmentMarker;

/// Marker for channel IDs.
///
/// Types such as [`ChannelBase`] or [`Message`] use this ID marker.
///
/// [`ChannelBase`]: crate::types::channel::ChannelBase
/// [`Message`]: crate::types::message::Message
#[derive(Debug)]
#[non_exhaustive]
pub struct ChannelMarker;

/// Marker for application command IDs.
///
/// [`ApplicationCommand`] and [`InteractionData`] use this ID marker.
///
/// [`ApplicationCommand`]: crate::commands::ApplicationCommand
/// [`InteractionData`]: crate::types::interaction::InteractionData
#[derive(Debug)]
#[non_exhaustive]
pub struct CommandMarker;

/// Marker for emoji IDs.
///
/// [`ForumTag`] and [`DefaultReaction`] use this ID marker.
///
/// [`ForumTag`]: crate::types::channel::ForumTag
/// [`DefaultReaction`]: crate::types::channel::DefaultReaction
#[derive(Debug)]
#[non_exhaustive]
pub struct EmojiMarker;

/// Marker for IDs whose resource type depends on context.
///
/// A permission overwrite targets either a role or a member, and a
/// context-menu target is either a user or a message.
#[derive(Debug)]
#[non_exhaustive]
pub struct GenericMarker;

/// Marker for guild IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct GuildMarker;

/// Marker for integration IDs.
///
/// [`RoleTags`] uses this ID marker.
///
/// [`RoleTags`]: crate::types::role::RoleTags
#[derive(Debug)]
#[non_exhaustive]
pub struct IntegrationMarker;

/// Marker for interaction IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct InteractionMarker;

/// Marker for message IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct MessageMarker;

/// Marker for role IDs.
///
/// Types such as [`Member`] or [`Role`] use this ID marker.
///
/// [`Member`]: crate::types::member::Member
/// [`Role`]: crate::types::role::Role
#[derive(Debug)]
#[non_exhaustive]
pub struct RoleMarker;

/// Marker for sticker IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct StickerMarker;

/// Marker for forum tag IDs.
///
/// [`ForumTag`] uses this ID marker.
///
/// [`ForumTag`]: crate::types::channel::ForumTag
#[derive(Debug)]
#[non_exhaustive]
pub struct TagMarker;

/// Marker for user IDs.
///
/// Types such as [`User`] or [`ThreadMember`] use this ID marker.
///
/// [`User`]: crate::types::user::User
/// [`ThreadMember`]: crate::types::channel::ThreadMember
#[derive(Debug)]
#[non_exhaustive]
pub struct UserMarker;

/// Marker for webhook IDs.
///
/// [`FollowedChannel`] uses this ID marker.
///
/// [`FollowedChannel`]: crate::types::channel::FollowedChannel
#[derive(Debug)]
#[non_exhaustive]
pub struct WebhookMarker;
