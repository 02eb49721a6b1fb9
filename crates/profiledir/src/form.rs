//! The add-profile form: draft fields and validation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Message shown when the name is blank.
pub const NAME_REQUIRED: &str = "Name is required";

/// Message shown when the image is blank.
pub const IMAGE_REQUIRED: &str = "Image URL is required";

/// Message shown when the image is neither root-relative nor a URL.
pub const IMAGE_INVALID: &str = "URL should start with / or http";

/// A form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Display name.
    Name,
    /// Image source.
    Image,
    /// Free-text bio.
    Bio,
}

impl Field {
    /// All fields, in form order.
    pub const ALL: [Field; 3] = [Field::Name, Field::Image, Field::Bio];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Image => write!(f, "image"),
            Self::Bio => write!(f, "bio"),
        }
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "image" => Ok(Self::Image),
            "bio" => Ok(Self::Bio),
            other => Err(format!("unknown form field: {other}")),
        }
    }
}

/// Per-field validation messages.
pub type FieldErrors = BTreeMap<Field, String>;

/// Draft values of the add-profile form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileForm {
    /// Draft name.
    pub name: String,
    /// Draft image source.
    pub image: String,
    /// Draft bio.
    pub bio: String,
}

impl ProfileForm {
    /// Current value of `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Image => &self.image,
            Field::Bio => &self.bio,
        }
    }

    /// Replace the value of `field`.
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Image => self.image = value,
            Field::Bio => self.bio = value,
        }
    }

    /// Check the required fields.
    ///
    /// The image prefix check runs on the raw value and is case-sensitive.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.insert(Field::Name, NAME_REQUIRED.to_string());
        }

        if self.image.trim().is_empty() {
            errors.insert(Field::Image, IMAGE_REQUIRED.to_string());
        } else if !self.image.starts_with('/') && !self.image.starts_with("http") {
            errors.insert(Field::Image, IMAGE_INVALID.to_string());
        }

        errors
    }
}
