//! Utilities for parsing and representing data from Discord's API.

pub mod datetime;

pub use self::datetime::{Timestamp, TimestampParseError, TimestampParseErrorType};

use serde_json::{Map, Value};

/// Merge the JSON objects in `parts` into one object.
///
/// Entities are stored as several serde structs (a base plus capability
/// blocks); writing them back out means flattening those into a single
/// payload. Non-object parts are ignored.
pub(crate) fn merge_objects(parts: impl IntoIterator<Item = Value>) -> Value {
    let mut merged = Map::new();
    for part in parts {
        if let Value::Object(map) = part {
            merged.extend(map);
        }
    }
    Value::Object(merged)
}

#[cfg(test)]
mod tests {
    use super::merge_objects;
    use serde_json::json;

    #[test]
    fn merges_in_order_and_skips_non_objects() {
        let merged = merge_objects([json!({ "a": 1 }), json!(null), json!({ "b": 2, "a": 3 })]);
        assert_eq!(merged, json!({ "a": 3, "b": 2 }));
    }
}
