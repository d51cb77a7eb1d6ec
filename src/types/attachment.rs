use serde::{Deserialize, Serialize};

use crate::types::{
    id::{marker::AttachmentMarker, Id},
    Maybe,
};

/// A file attached to a message or passed as a command option.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Attachment {
    pub id: Id<AttachmentMarker>,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub description: Maybe<String>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub content_type: Maybe<String>,
    /// Size in bytes.
    pub size: u64,
    pub url: String,
    pub proxy_url: String,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub height: Maybe<u32>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub width: Maybe<u32>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub ephemeral: Maybe<bool>,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub duration_secs: Maybe<f64>,
}

impl Attachment {
    pub fn is_image(&self) -> bool {
        self.content_type
            .value()
            .is_some_and(|kind| kind.starts_with("image/"))
    }
}
