//! Three-state wire fields.
//!
//! Discord distinguishes between a key that is absent from a payload, a key
//! that is present with `null`, and a key that carries a value. `Option<T>`
//! can only express two of those, so every optional field on our entities is
//! a [`Maybe<T>`] instead.
//!
//! Fields of this type must be declared with
//! `#[serde(default, skip_serializing_if = "Maybe::is_missing")]` so that a
//! missing key deserializes to [`Maybe::Missing`] and is never written back
//! out. Serializing a bare `Missing` is an error rather than a silent `null`.

use serde::{
    de::{Deserialize, Deserializer},
    ser::{Error as SerError, Serialize, Serializer},
};

use crate::error::TriStateAccessError;

/// A wire field that may be absent, explicitly `null`, or present.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Maybe<T> {
    /// The key was not present in the payload.
    Missing,
    /// The key was present with a `null` value.
    Null,
    /// The key was present with a value.
    Value(T),
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<T> Maybe<T> {
    /// Build from a nullable value: `None` becomes [`Maybe::Null`].
    pub fn nullable(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Value(value),
            None => Self::Null,
        }
    }

    /// Whether the key was absent.
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Whether the key was present with `null`.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether the key carried a value.
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Read the field, distinguishing `null` from a value.
    ///
    /// # Errors
    ///
    /// Returns [`TriStateAccessError`] if the field was missing from the
    /// payload. Check [`is_missing`](Self::is_missing) first when absence is
    /// expected.
    pub fn get(&self) -> Result<Option<&T>, TriStateAccessError> {
        match self {
            Self::Missing => Err(TriStateAccessError),
            Self::Null => Ok(None),
            Self::Value(value) => Ok(Some(value)),
        }
    }

    /// The value if present, collapsing missing and `null` to `None`.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Consume into an `Option`, collapsing missing and `null`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub const fn as_ref(&self) -> Maybe<&T> {
        match self {
            Self::Missing => Maybe::Missing,
            Self::Null => Maybe::Null,
            Self::Value(value) => Maybe::Value(value),
        }
    }

    /// Map the contained value, preserving missing and `null`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
        match self {
            Self::Missing => Maybe::Missing,
            Self::Null => Maybe::Null,
            Self::Value(value) => Maybe::Value(f(value)),
        }
    }

    /// Keep `self` unless it is missing, in which case use `other`.
    ///
    /// This is the update rule for partial payloads: an absent key never
    /// overwrites, an explicit `null` clears.
    pub fn or(self, other: Maybe<T>) -> Maybe<T> {
        match self {
            Self::Missing => other,
            _ => self,
        }
    }
}

impl<T> From<T> for Maybe<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> Serialize for Maybe<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Missing => Err(S::Error::custom(
                "missing field was not skipped during serialization",
            )),
            Self::Null => serializer.serialize_none(),
            Self::Value(value) => serializer.serialize_some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Maybe<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::nullable)
    }
}

#[cfg(test)]
mod tests {
    use super::Maybe;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq, Serialize)]
    struct Sample {
        #[serde(default, skip_serializing_if = "Maybe::is_missing")]
        topic: Maybe<String>,
    }

    #[test]
    fn absent_key_is_missing_and_stays_absent() {
        let sample: Sample = serde_json::from_value(json!({})).unwrap();
        assert!(sample.topic.is_missing());
        assert_eq!(serde_json::to_value(&sample).unwrap(), json!({}));
    }

    #[test]
    fn explicit_null_round_trips() {
        let sample: Sample = serde_json::from_value(json!({ "topic": null })).unwrap();
        assert!(sample.topic.is_null());
        assert_eq!(sample.topic.get().unwrap(), None);
        assert_eq!(
            serde_json::to_value(&sample).unwrap(),
            json!({ "topic": null })
        );
    }

    #[test]
    fn present_value_round_trips() {
        let sample: Sample = serde_json::from_value(json!({ "topic": "rust" })).unwrap();
        assert_eq!(sample.topic.value().map(String::as_str), Some("rust"));
        assert_eq!(
            serde_json::to_value(&sample).unwrap(),
            json!({ "topic": "rust" })
        );
    }

    #[test]
    fn get_on_missing_fails() {
        let missing: Maybe<u8> = Maybe::Missing;
        assert!(missing.get().is_err());
        assert_eq!(Maybe::Value(3).get().unwrap(), Some(&3));
    }

    #[test]
    fn missing_is_a_singleton() {
        assert_eq!(Maybe::<u8>::Missing, Maybe::default());
        assert_ne!(Maybe::<u8>::Missing, Maybe::Null);
        assert_ne!(Maybe::Missing, Maybe::Value(0));
    }

    #[test]
    fn bare_missing_never_serializes_as_null() {
        assert!(serde_json::to_value(Maybe::<u8>::Missing).is_err());
    }

    #[test]
    fn or_keeps_null_but_replaces_missing() {
        assert_eq!(Maybe::Missing.or(Maybe::Value(1)), Maybe::Value(1));
        assert_eq!(Maybe::Null.or(Maybe::Value(1)), Maybe::Null);
    }
}
