//! Forum channels and their tags.

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    types::{
        channel::{
            identify_channel,
            modify::{CreateThread, EditForum},
            Channel, ForumFields, GuildChannel, GuildFields,
        },
        id::{
            marker::{EmojiMarker, TagMarker},
            Id,
        },
        Maybe,
    },
};

channel_entity! {
    /// A forum: a channel that only holds threads ("posts").
    ForumChannel {
        guild: GuildFields,
        forum: ForumFields,
    }
}

impl GuildChannel for ForumChannel {
    fn guild_fields(&self) -> &GuildFields {
        &self.guild
    }
}

impl ForumChannel {
    pub fn tag(&self, name: &str) -> Option<&ForumTag> {
        self.forum
            .available_tags
            .value()?
            .iter()
            .find(|tag| tag.name == name)
    }

    pub async fn edit(&self, edit: &EditForum, reason: Option<&str>) -> Result<Self> {
        let response = self
            .state
            .http()
            .modify_channel(self.base.id, serde_json::to_value(edit)?, reason)
            .await?;
        Self::from_payload(&response, &self.state)
    }

    /// Open a post. `post.message` must be set; it becomes the first message.
    pub async fn create_post(&self, post: &CreateThread, reason: Option<&str>) -> Result<Channel> {
        let response = self
            .state
            .http()
            .start_thread(self.base.id, serde_json::to_value(post)?, reason)
            .await?;
        identify_channel(&response, &self.state)
    }
}

/// A tag that can be applied to forum posts.
///
/// Tags created locally have no ID; the ID is omitted from the payload so
/// Discord assigns one.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ForumTag {
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub id: Maybe<Id<TagMarker>>,
    pub name: String,
    /// Only members with `MANAGE_THREADS` can apply moderated tags.
    #[serde(default)]
    pub moderated: bool,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub emoji_id: Maybe<Id<EmojiMarker>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub emoji_name: Maybe<String>,
}

impl ForumTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Maybe::Missing,
            name: name.into(),
            moderated: false,
            emoji_id: Maybe::Missing,
            emoji_name: Maybe::Missing,
        }
    }
}

/// Emoji shown on the add-reaction button of new posts. Exactly one of the
/// two fields is set.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct DefaultReaction {
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub emoji_id: Maybe<Id<EmojiMarker>>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub emoji_name: Maybe<String>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u8", into = "u8")]
pub enum ForumSortOrder {
    LatestActivity,
    CreationDate,
    Unknown(u8),
}

impl From<u8> for ForumSortOrder {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::LatestActivity,
            1 => Self::CreationDate,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<ForumSortOrder> for u8 {
    fn from(value: ForumSortOrder) -> Self {
        match value {
            ForumSortOrder::LatestActivity => 0,
            ForumSortOrder::CreationDate => 1,
            ForumSortOrder::Unknown(unknown) => unknown,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "u8", into = "u8")]
pub enum ForumLayout {
    NotSet,
    ListView,
    GalleryView,
    Unknown(u8),
}

impl From<u8> for ForumLayout {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::NotSet,
            1 => Self::ListView,
            2 => Self::GalleryView,
            unknown => Self::Unknown(unknown),
        }
    }
}

impl From<ForumLayout> for u8 {
    fn from(value: ForumLayout) -> Self {
        match value {
            ForumLayout::NotSet => 0,
            ForumLayout::ListView => 1,
            ForumLayout::GalleryView => 2,
            ForumLayout::Unknown(unknown) => unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ForumChannel, ForumTag};
    use crate::{
        test_util::{state, MockTransport},
        types::{
            channel::{modify::EditForum, ForumSortOrder},
            id::Id,
            Maybe,
        },
    };
    use serde_json::json;

    fn forum() -> serde_json::Value {
        json!({
            "id": "9",
            "type": 15,
            "name": "help",
            "guild_id": "1",
            "default_sort_order": null,
            "available_tags": [
                { "id": "100", "name": "solved", "moderated": true, "emoji_id": null, "emoji_name": "✅" }
            ]
        })
    }

    #[test]
    fn new_tags_omit_their_id() {
        let value = serde_json::to_value(ForumTag::new("bug")).unwrap();
        assert_eq!(value, json!({ "name": "bug", "moderated": false }));
    }

    #[test]
    fn finds_tags_by_name() {
        let transport = MockTransport::new();
        let forum = ForumChannel::from_payload(&forum(), &state(&transport)).unwrap();
        assert_eq!(forum.tag("solved").unwrap().id, Maybe::Value(Id::new(100)));
        assert!(forum.tag("open").is_none());
        assert_eq!(forum.forum().default_sort_order, Maybe::Null);
    }

    #[tokio::test]
    async fn edit_sends_only_the_set_fields() {
        let transport = MockTransport::new();
        let channel = ForumChannel::from_payload(&forum(), &state(&transport)).unwrap();
        let mut updated = forum();
        updated["default_sort_order"] = json!(1);
        transport.reply(updated);

        let edit = EditForum {
            default_sort_order: Maybe::Value(ForumSortOrder::CreationDate),
            topic: Maybe::Null,
            ..EditForum::default()
        };
        let forum = channel.edit(&edit, None).await.unwrap();
        assert_eq!(
            forum.forum().default_sort_order,
            Maybe::Value(ForumSortOrder::CreationDate)
        );

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].body,
            Some(json!({ "default_sort_order": 1, "topic": null }))
        );
    }
}
