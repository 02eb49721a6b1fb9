//! `profiledir` - a small profile directory kept in local storage
//!
//! Profiles (name, image, bio) live in one JSON slot of a `SQLite`-backed
//! key-value store. The [`App`] controller owns the list, the add-profile
//! form and the search text; [`Page`] renders the filtered view as a set of
//! [`ProfileCard`]s.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod app;
pub mod card;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod image;
pub mod logging;
pub mod page;
pub mod profile;
pub mod prompt;
pub mod storage;
pub mod store;

pub use app::{App, SubmitOutcome};
pub use card::ProfileCard;
pub use config::Config;
pub use error::{Error, Result};
pub use form::{Field, FieldErrors, ProfileForm};
pub use image::{AssetProbe, ImageEvent, ImageProbe};
pub use logging::init_logging;
pub use page::Page;
pub use profile::{default_profiles, Profile, ProfileId};
pub use prompt::{AssumeYes, Confirm, TerminalPrompt};
pub use storage::{KeyValueStore, Storage, StorageStats};
pub use store::ProfileStore;
