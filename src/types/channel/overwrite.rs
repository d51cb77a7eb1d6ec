use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::types::{
    flags::Permissions,
    id::{marker::GenericMarker, Id},
};

/// Grants and denials of permissions for one role or member in a channel.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct PermissionOverwrite {
    /// Role or user ID, depending on `kind`.
    pub id: Id<GenericMarker>,
    #[serde(rename = "type")]
    pub kind: OverwriteType,
    pub allow: Permissions,
    pub deny: Permissions,
}

#[derive(Clone, Copy, Debug, Deserialize_repr, Eq, Hash, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum OverwriteType {
    Role = 0,
    Member = 1,
}

#[cfg(test)]
mod tests {
    use super::{OverwriteType, PermissionOverwrite};
    use crate::types::{flags::Permissions, id::Id};
    use serde_json::json;

    #[test]
    fn overwrite_wire_format() {
        let overwrite = PermissionOverwrite {
            id: Id::new(12),
            kind: OverwriteType::Member,
            allow: Permissions::SEND_MESSAGES,
            deny: Permissions::empty(),
        };
        let value = serde_json::to_value(&overwrite).unwrap();
        assert_eq!(
            value,
            json!({ "id": "12", "type": 1, "allow": "2048", "deny": "0" })
        );
        assert_eq!(serde_json::from_value::<PermissionOverwrite>(value).unwrap(), overwrite);
    }
}
