use crate::{
    error::Result,
    types::channel::{
        modify::EditAudioChannel, AudioChannel, AudioFields, GuildChannel, GuildFields,
        Messageable, MessageableFields,
    },
};

channel_entity! {
    /// A voice or stage channel. Both carry a text chat.
    VoiceChannel {
        guild: GuildFields,
        messageable: MessageableFields,
        audio: AudioFields,
    }
}

impl GuildChannel for VoiceChannel {
    fn guild_fields(&self) -> &GuildFields {
        &self.guild
    }
}

impl Messageable for VoiceChannel {
    fn messageable_fields(&self) -> &MessageableFields {
        &self.messageable
    }
}

impl AudioChannel for VoiceChannel {
    fn audio_fields(&self) -> &AudioFields {
        &self.audio
    }
}

impl VoiceChannel {
    pub async fn edit(&self, edit: &EditAudioChannel, reason: Option<&str>) -> Result<Self> {
        let response = self
            .state
            .http()
            .modify_channel(self.base.id, serde_json::to_value(edit)?, reason)
            .await?;
        Self::from_payload(&response, &self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::VoiceChannel;
    use crate::{
        http::Method,
        test_util::{state, MockTransport},
        types::{
            channel::{modify::EditAudioChannel, AudioChannel, VideoQualityMode},
            Maybe,
        },
    };
    use serde_json::json;

    #[tokio::test]
    async fn edit_rebuilds_from_the_response() {
        let transport = MockTransport::new();
        let state = state(&transport);
        let channel = VoiceChannel::from_payload(
            &json!({
                "id": "155101607195836416",
                "type": 2,
                "guild_id": "41771983423143937",
                "name": "ROCKET CHEESE",
                "rtc_region": null,
                "bitrate": 64000,
                "user_limit": 0
            }),
            &state,
        )
        .unwrap();
        assert_eq!(channel.audio().rtc_region, Maybe::Null);
        transport.reply(json!({
            "id": "155101607195836416",
            "type": 2,
            "guild_id": "41771983423143937",
            "name": "ROCKET CHEESE",
            "rtc_region": null,
            "bitrate": 96000,
            "user_limit": 0,
            "video_quality_mode": 2
        }));

        let edit = EditAudioChannel {
            bitrate: Maybe::Value(96000),
            video_quality_mode: Maybe::Value(VideoQualityMode::Full),
            ..EditAudioChannel::default()
        };
        let channel = channel.edit(&edit, None).await.unwrap();
        assert_eq!(channel.bitrate(), Some(96000));
        assert_eq!(
            channel.audio().video_quality_mode,
            Maybe::Value(VideoQualityMode::Full)
        );

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].route.method, Method::Patch);
        assert_eq!(
            requests[0].body,
            Some(json!({ "bitrate": 96000, "video_quality_mode": 2 }))
        );
    }
}
