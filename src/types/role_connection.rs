//! Application role-connection metadata.
//!
//! An application describes the numeric, date and boolean facts it can
//! report about a user; guilds then gate linked roles on comparisons
//! against those facts.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::collections::HashMap;

use crate::{
    error::Result,
    state::State,
    types::Maybe,
};

/// How a guild's configured value is compared with the user's value.
#[derive(Clone, Copy, Debug, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum RoleConnectionMetadataType {
    IntegerLessThanOrEqual = 1,
    IntegerGreaterThanOrEqual = 2,
    IntegerEqual = 3,
    IntegerNotEqual = 4,
    DatetimeLessThanOrEqual = 5,
    DatetimeGreaterThanOrEqual = 6,
    BooleanEqual = 7,
    BooleanNotEqual = 8,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ApplicationRoleConnectionMetadata {
    #[serde(rename = "type")]
    pub kind: RoleConnectionMetadataType,
    /// Dictionary key, `a-z`, `0-9` or `_`, at most 50 characters.
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub name_localizations: Maybe<HashMap<String, String>>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Maybe::is_missing")]
    pub description_localizations: Maybe<HashMap<String, String>>,
}

impl ApplicationRoleConnectionMetadata {
    pub fn new(
        kind: RoleConnectionMetadataType,
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            key: key.into(),
            name: name.into(),
            name_localizations: Maybe::Missing,
            description: description.into(),
            description_localizations: Maybe::Missing,
        }
    }

    /// Fetch the records registered for the session's application.
    pub async fn fetch(state: &State) -> Result<Vec<Self>> {
        Ok(state
            .http()
            .get_role_connection_metadata(state.application_id())
            .await?)
    }

    /// Replace the application's records with `records`.
    pub async fn update(state: &State, records: &[Self]) -> Result<Vec<Self>> {
        Ok(state
            .http()
            .update_role_connection_metadata(state.application_id(), records)
            .await?)
    }
}
