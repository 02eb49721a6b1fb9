//! Rendering of a single profile.

use std::fmt;

use crate::image::ImageEvent;
use crate::profile::{Profile, ProfileId};
use crate::prompt::Confirm;

/// One profile on screen, with its own image-load state.
///
/// The image is shown until a load failure is reported. A hidden image gets
/// no further load events; only a new `image` value brings it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCard {
    profile: Profile,
    image_ok: bool,
    image_settled: bool,
    deletable: bool,
}

impl ProfileCard {
    /// A card without a delete control.
    #[must_use]
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            image_ok: true,
            image_settled: false,
            deletable: false,
        }
    }

    /// Enable the delete control. It only shows for profiles with an id.
    #[must_use]
    pub fn with_delete(mut self) -> Self {
        self.deletable = true;
        self
    }

    /// The profile being shown.
    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Whether the image element is rendered.
    #[must_use]
    pub fn image_ok(&self) -> bool {
        self.image_ok
    }

    /// Whether the image is still waiting for its load outcome.
    #[must_use]
    pub fn image_pending(&self) -> bool {
        self.image_ok && !self.image_settled
    }

    /// Whether the delete control is rendered.
    #[must_use]
    pub fn shows_delete(&self) -> bool {
        self.deletable && self.profile.id.is_some()
    }

    /// Apply the outcome of fetching the image.
    pub fn on_image(&mut self, event: ImageEvent) {
        if !self.image_ok {
            return;
        }
        self.image_settled = true;
        if event == ImageEvent::Failed {
            self.image_ok = false;
        }
    }

    /// Replace the profile shown by this card.
    ///
    /// Image state starts over when the image source changes.
    pub fn update(&mut self, profile: Profile) {
        if profile.image != self.profile.image {
            self.image_ok = true;
            self.image_settled = false;
        }
        self.profile = profile;
    }

    /// Activate the delete control.
    ///
    /// Asks for confirmation naming the profile and hands the id to
    /// `on_delete` if the user agrees. Returns whether `on_delete` ran.
    pub fn delete<C, F>(&self, confirm: &mut C, on_delete: F) -> bool
    where
        C: Confirm + ?Sized,
        F: FnOnce(ProfileId),
    {
        let Some(id) = self.profile.id.as_ref().filter(|_| self.deletable) else {
            return false;
        };
        if !confirm.confirm(&format!("Delete \"{}\"?", self.profile.name)) {
            return false;
        }
        on_delete(id.clone());
        true
    }
}

impl fmt::Display for ProfileCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = &self.profile;
        match &profile.id {
            Some(id) => writeln!(f, "## {} (#{id})", profile.name)?,
            None => writeln!(f, "## {}", profile.name)?,
        }
        if self.image_ok {
            writeln!(f, "[image: {} alt=\"{}\"]", profile.image, profile.name)?;
        }
        writeln!(f, "{}", profile.bio)?;
        if self.shows_delete() {
            writeln!(f, "[Delete]")?;
        }
        Ok(())
    }
}
