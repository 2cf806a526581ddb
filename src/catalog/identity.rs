use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::NonZeroU64;

/// Opaque key of a membership item in the host store.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

/// Identifier of a category term in the host taxonomy.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declared registration limit of a membership item.
///
/// Hosts store the limit as loosely typed meta, so deserialization accepts any
/// JSON number, a numeric string, an empty string, `"unlimited"`, or null.
/// Anything that is not a finite positive number collapses to `Unlimited`,
/// which disables the capacity branch of the availability rule. Fractional
/// limits round up: an integer enrollment count reaches `20.5` exactly when it
/// reaches 21.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Capacity {
    #[default]
    Unlimited,
    Limited(NonZeroU64),
}

impl Capacity {
    /// Build a capacity from a signed count; zero and negatives are `Unlimited`.
    pub fn from_count(count: i64) -> Self {
        u64::try_from(count)
            .ok()
            .and_then(NonZeroU64::new)
            .map_or(Capacity::Unlimited, Capacity::Limited)
    }

    /// Build a capacity from any numeric limit; non-finite or non-positive
    /// values are `Unlimited`, limits past `u64::MAX` saturate.
    pub fn from_number(value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Capacity::Unlimited;
        }
        NonZeroU64::new(value.ceil() as u64).map_or(Capacity::Unlimited, Capacity::Limited)
    }

    /// Interpret a raw meta string as stored by the host.
    pub fn from_meta(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<i64>() {
            Ok(count) => Capacity::from_count(count),
            Err(_) => raw
                .parse::<f64>()
                .map_or(Capacity::Unlimited, Capacity::from_number),
        }
    }

    /// The usable limit, if one is declared.
    pub fn limit(self) -> Option<u64> {
        match self {
            Capacity::Unlimited => None,
            Capacity::Limited(limit) => Some(limit.get()),
        }
    }

    pub fn is_limited(self) -> bool {
        matches!(self, Capacity::Limited(_))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCapacity {
    Count(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Serialize for Capacity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Capacity::Unlimited => serializer.serialize_none(),
            Capacity::Limited(limit) => serializer.serialize_u64(limit.get()),
        }
    }
}

impl<'de> Deserialize<'de> for Capacity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawCapacity>::deserialize(deserializer)?;
        Ok(match raw {
            None => Capacity::Unlimited,
            Some(RawCapacity::Count(count)) => Capacity::from_count(count),
            Some(RawCapacity::Unsigned(count)) => {
                NonZeroU64::new(count).map_or(Capacity::Unlimited, Capacity::Limited)
            }
            Some(RawCapacity::Float(value)) => Capacity::from_number(value),
            Some(RawCapacity::Text(text)) => Capacity::from_meta(&text),
            Some(RawCapacity::Other(_)) => Capacity::Unlimited,
        })
    }
}
