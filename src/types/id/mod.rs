//! Type-safe snowflake IDs.
//!
//! Every Discord resource is identified by a 64-bit snowflake that embeds its
//! creation time. [`Id<T>`] wraps the integer with a [`marker`] type so IDs
//! of different resources can't be mixed up. On the wire IDs are decimal
//! strings; we also accept bare integers when deserializing.

pub mod marker;

use chrono::{DateTime, Utc};
use serde::{
    de::{Deserialize, Deserializer, Error as DeError, Visitor},
    ser::{Serialize, Serializer},
};
use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
    num::ParseIntError,
    str::FromStr,
};

/// Milliseconds between the Unix epoch and the first second of 2015, the
/// platform's snowflake epoch.
pub const DISCORD_EPOCH: u64 = 1_420_070_400_000;

/// A snowflake ID for the resource type named by `T`.
pub struct Id<T> {
    value: u64,
    phantom: PhantomData<fn(T) -> T>,
}

impl<T> Id<T> {
    /// Wrap a raw snowflake.
    pub const fn new(value: u64) -> Self {
        Self {
            value,
            phantom: PhantomData,
        }
    }

    /// The raw integer value.
    pub const fn get(self) -> u64 {
        self.value
    }

    /// Reinterpret as an ID of another resource type.
    ///
    /// Useful where Discord reuses an ID across resources, e.g. a bot's user
    /// ID is also its application ID.
    pub const fn cast<New>(self) -> Id<New> {
        Id::new(self.value)
    }

    /// Unix-millisecond creation time embedded in the snowflake.
    pub const fn timestamp(self) -> u64 {
        (self.value >> 22) + DISCORD_EPOCH
    }

    /// Creation time as a UTC datetime, or the Unix epoch if chrono can't
    /// represent it.
    pub fn created_at(self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp() as i64).unwrap_or_default()
    }

    /// The smallest ID that could have been created at `datetime`.
    ///
    /// Handy as a pagination cursor (`before`/`after`).
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        let millis = u64::try_from(datetime.timestamp_millis()).unwrap_or(0);
        Self::new(millis.saturating_sub(DISCORD_EPOCH) << 22)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Id")?;
        let type_name = std::any::type_name::<T>();
        if let Some(position) = type_name.rfind("::") {
            if let Some(name) = type_name.get(position + 2..) {
                f.write_str("<")?;
                f.write_str(name)?;
                f.write_str(">")?;
            }
        }
        f.write_str("(")?;
        Debug::fmt(&self.value, f)?;
        f.write_str(")")
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.value, f)
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialEq<u64> for Id<T> {
    fn eq(&self, other: &u64) -> bool {
        self.value == *other
    }
}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.value);
    }
}

impl<T> From<u64> for Id<T> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for u64 {
    fn from(id: Id<T>) -> Self {
        id.get()
    }
}

impl<T> FromStr for Id<T> {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self::new)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor<T> {
            phantom: PhantomData<fn(T) -> T>,
        }

        impl<T> Visitor<'_> for IdVisitor<T> {
            type Value = Id<T>;

            fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str("a snowflake as a string or integer")
            }

            fn visit_u64<E: DeError>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Id::new(value))
            }

            fn visit_i64<E: DeError>(self, value: i64) -> Result<Self::Value, E> {
                u64::try_from(value)
                    .map(Id::new)
                    .map_err(|_| DeError::custom("snowflake must not be negative"))
            }

            fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
                value.parse().map(Id::new).map_err(DeError::custom)
            }
        }

        deserializer.deserialize_any(IdVisitor {
            phantom: PhantomData,
        })
    }
}
