//! Direct messages.

use crate::{
    error::Result,
    types::{
        channel::{modify::EditGroupDm, Messageable, MessageableFields, PrivateFields},
        user::User,
    },
};

channel_entity! {
    /// A one-to-one direct message channel.
    DmChannel {
        messageable: MessageableFields,
        private: PrivateFields,
    }
}

impl Messageable for DmChannel {
    fn messageable_fields(&self) -> &MessageableFields {
        &self.messageable
    }
}

impl DmChannel {
    /// The other side of the conversation.
    pub fn recipient(&self) -> Option<&User> {
        self.private.recipients.value()?.first()
    }
}

channel_entity! {
    /// A direct message channel with several recipients.
    GroupDmChannel {
        messageable: MessageableFields,
        private: PrivateFields,
    }
}

impl Messageable for GroupDmChannel {
    fn messageable_fields(&self) -> &MessageableFields {
        &self.messageable
    }
}

impl GroupDmChannel {
    pub fn recipients(&self) -> &[User] {
        self.private
            .recipients
            .value()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub async fn edit(&self, edit: &EditGroupDm) -> Result<Self> {
        let response = self
            .state
            .http()
            .modify_channel(self.base.id, serde_json::to_value(edit)?, None)
            .await?;
        Self::from_payload(&response, &self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::{DmChannel, GroupDmChannel};
    use crate::{
        test_util::{state, MockTransport},
        types::{
            channel::{modify::EditGroupDm, ChannelEntity},
            Maybe,
        },
    };
    use serde_json::json;

    #[test]
    fn dm_recipient() {
        let transport = MockTransport::new();
        let dm = DmChannel::from_payload(
            &json!({
                "id": "1",
                "type": 1,
                "last_message_id": "3",
                "recipients": [{ "id": "2", "username": "friend", "discriminator": "0" }]
            }),
            &state(&transport),
        )
        .unwrap();
        assert_eq!(dm.recipient().unwrap().username, "friend");
    }

    #[tokio::test]
    async fn group_rename() {
        let transport = MockTransport::new();
        let state = state(&transport);
        let group = GroupDmChannel::from_payload(
            &json!({ "id": "1", "type": 3, "name": "old", "icon": null }),
            &state,
        )
        .unwrap();
        assert!(group.recipients().is_empty());
        transport.reply(json!({ "id": "1", "type": 3, "name": "new", "icon": null }));

        let edit = EditGroupDm {
            name: Maybe::Value("new".to_owned()),
            ..EditGroupDm::default()
        };
        let group = group.edit(&edit).await.unwrap();
        assert_eq!(group.base().name, Maybe::Value("new".to_owned()));
        assert_eq!(transport.requests()[0].body, Some(json!({ "name": "new" })));
    }
}
