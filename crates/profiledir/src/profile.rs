//! Core profile types for profiledir.

use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Name of the built-in profile used when nothing has been saved yet.
pub const DEFAULT_PROFILE_NAME: &str = "My profile";

/// Image of the built-in profile.
pub const DEFAULT_PROFILE_IMAGE: &str = "/photo/boss.jpg";

/// Bio of the built-in profile.
pub const DEFAULT_PROFILE_BIO: &str = "Lorem ipsum…";

/// Opaque profile identifier.
///
/// New profiles get the creation time in epoch milliseconds, bumped when
/// needed so that it stays unique within a list. Saved data may carry any
/// JSON scalar here; whatever was read is written back unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileId {
    /// Integer id, the shape this crate generates.
    Int(i64),
    /// Non-integer number.
    Float(f64),
    /// String id.
    Text(String),
    /// Boolean id.
    Bool(bool),
}

impl ProfileId {
    /// Wrap a raw integer identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self::Int(raw)
    }

    /// The integer value, if this is an integer id.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(raw) => Some(*raw),
            _ => None,
        }
    }

    /// Generate an identifier not used by any profile in `existing`.
    #[must_use]
    pub fn generate(existing: &[Profile]) -> Self {
        let taken: HashSet<i64> = existing
            .iter()
            .filter_map(|p| p.id.as_ref()?.as_i64())
            .collect();
        let now = Utc::now().timestamp_millis();
        let next = match taken.iter().max().map(|max| max.checked_add(1)) {
            None => now,
            Some(Some(floor)) => now.max(floor),
            // Largest id is i64::MAX: take the first free value instead.
            Some(None) => (now..=i64::MAX)
                .chain(0..now)
                .find(|candidate| !taken.contains(candidate))
                .unwrap_or(now),
        };
        Self::Int(next)
    }
}

impl PartialEq for ProfileId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ProfileId {}

impl Hash for ProfileId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Self::Int(raw) => raw.hash(state),
            Self::Float(raw) => raw.to_bits().hash(state),
            Self::Text(raw) => raw.hash(state),
            Self::Bool(raw) => raw.hash(state),
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(raw) => write!(f, "{raw}"),
            // Debug keeps the fraction so the printed form parses back to a float.
            Self::Float(raw) => write!(f, "{raw:?}"),
            Self::Text(raw) => f.write_str(raw),
            Self::Bool(raw) => write!(f, "{raw}"),
        }
    }
}

impl FromStr for ProfileId {
    type Err = Infallible;

    /// Integers first, then finite floats; anything else is a text id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(raw) = s.parse::<i64>() {
            return Ok(Self::Int(raw));
        }
        match s.parse::<f64>() {
            Ok(raw) if raw.is_finite() => Ok(Self::Float(raw)),
            _ => Ok(Self::Text(s.to_string())),
        }
    }
}

/// A profile record.
///
/// The JSON shape is `{ "name", "image", "bio", "id"? }`; records saved
/// before identifiers existed simply have no `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Identifier, absent on seed data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProfileId>,

    /// Display name.
    pub name: String,

    /// Absolute URL or root-relative path of the profile image.
    pub image: String,

    /// Free text, possibly empty.
    #[serde(default)]
    pub bio: String,
}

impl Profile {
    /// Create a profile without an identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, image: impl Into<String>, bio: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            image: image.into(),
            bio: bio.into(),
        }
    }

    /// Attach an identifier.
    #[must_use]
    pub fn with_id(mut self, id: ProfileId) -> Self {
        self.id = Some(id);
        self
    }

    /// Case-insensitive substring match on the name. An empty query matches.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// The built-in list used when storage holds nothing usable.
#[must_use]
pub fn default_profiles() -> Vec<Profile> {
    vec![Profile::new(
        DEFAULT_PROFILE_NAME,
        DEFAULT_PROFILE_IMAGE,
        DEFAULT_PROFILE_BIO,
    )]
}
