use crate::{
    error::Result,
    types::channel::{modify::EditCategory, GuildChannel, GuildFields},
};

channel_entity! {
    /// A category that groups up to 50 channels.
    CategoryChannel {
        guild: GuildFields,
    }
}

impl GuildChannel for CategoryChannel {
    fn guild_fields(&self) -> &GuildFields {
        &self.guild
    }
}

impl CategoryChannel {
    pub async fn edit(&self, edit: &EditCategory, reason: Option<&str>) -> Result<Self> {
        let response = self
            .state
            .http()
            .modify_channel(self.base.id, serde_json::to_value(edit)?, reason)
            .await?;
        Self::from_payload(&response, &self.state)
    }
}

channel_entity! {
    /// The channel in a hub containing the listed servers.
    DirectoryChannel {
        guild: GuildFields,
    }
}

impl GuildChannel for DirectoryChannel {
    fn guild_fields(&self) -> &GuildFields {
        &self.guild
    }
}

channel_entity! {
    /// A channel of a kind this crate doesn't model. Only the base fields
    /// are kept.
    BaseChannel {}
}
