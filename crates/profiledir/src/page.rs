//! The rendered surface: header, form, search and the list of cards.
//!
//! Cards are keyed by profile id, or by name for profiles without one, so
//! that a card keeps its image state across renders for as long as its
//! profile stays in the filtered view.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::app::App;
use crate::card::ProfileCard;
use crate::form::Field;
use crate::image::ImageProbe;
use crate::profile::{Profile, ProfileId};
use crate::storage::KeyValueStore;

/// Shown when a search is active and nothing matches.
pub const NO_MATCHES: &str = "No profiles match your search";

/// Shown when there is nothing to list at all.
pub const NO_PROFILES: &str = "No profiles yet. Add one to get started!";

/// Identity of a card across renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CardKey {
    /// Profiles with an id.
    Id(ProfileId),
    /// Seed profiles without an id.
    Name(String),
}

impl CardKey {
    /// The key for `profile`.
    #[must_use]
    pub fn of(profile: &Profile) -> Self {
        match &profile.id {
            Some(id) => Self::Id(id.clone()),
            None => Self::Name(profile.name.clone()),
        }
    }
}

/// `Found N profile(s)`.
#[must_use]
pub fn found_label(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("Found {count} profile{plural}")
}

/// The mounted cards of the page.
#[derive(Debug, Default)]
pub struct Page {
    cards: Vec<ProfileCard>,
}

impl Page {
    /// An empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards in display order.
    #[must_use]
    pub fn cards(&self) -> &[ProfileCard] {
        &self.cards
    }

    /// The card showing the profile with `id`, if mounted.
    #[must_use]
    pub fn card(&self, id: &ProfileId) -> Option<&ProfileCard> {
        self.cards.iter().find(|c| c.profile().id.as_ref() == Some(id))
    }

    /// Mutable access to the card showing the profile with `id`.
    pub fn card_mut(&mut self, id: &ProfileId) -> Option<&mut ProfileCard> {
        self.cards.iter_mut().find(|c| c.profile().id.as_ref() == Some(id))
    }

    /// Reconcile the cards with the controller's filtered view.
    pub fn sync<S: KeyValueStore>(&mut self, app: &App<S>) {
        let mut mounted: HashMap<CardKey, ProfileCard> = self
            .cards
            .drain(..)
            .map(|card| (CardKey::of(card.profile()), card))
            .collect();

        self.cards = app
            .filtered_profiles()
            .into_iter()
            .map(|profile| match mounted.remove(&CardKey::of(profile)) {
                Some(mut card) => {
                    card.update(profile.clone());
                    card
                }
                None => ProfileCard::new(profile.clone()).with_delete(),
            })
            .collect();
    }

    /// Deliver load outcomes to every card still waiting on its image.
    pub fn load_images<P: ImageProbe + ?Sized>(&mut self, probe: &P) {
        for card in self.cards.iter_mut().filter(|c| c.image_pending()) {
            let event = probe.probe(&card.profile().image);
            card.on_image(event);
        }
    }

    /// Sync with `app` and render the whole surface as text.
    pub fn render<S: KeyValueStore>(&mut self, app: &App<S>) -> String {
        self.sync(app);

        let mut out = String::new();
        out.push_str("# Profile App\n\n[Clear saved profiles]\n\n## Edit profile\n");

        let form = app.form();
        for (field, label) in [
            (Field::Name, "Name"),
            (Field::Image, "Image URL"),
            (Field::Bio, "Bio"),
        ] {
            let _ = writeln!(out, "{label}: {}", form.get(field));
            if let Some(message) = app.field_errors().get(&field) {
                let _ = writeln!(out, "  ! {message}");
            }
        }
        out.push_str("[Submit]\n");

        if !app.profiles().is_empty() {
            let _ = writeln!(out, "\nSearch by name: {}", app.search());
            let _ = writeln!(out, "{}", found_label(self.cards.len()));
        }

        out.push('\n');
        if self.cards.is_empty() {
            let empty = if app.search().is_empty() {
                NO_PROFILES
            } else {
                NO_MATCHES
            };
            let _ = writeln!(out, "{empty}");
        } else {
            let rendered: Vec<String> = self.cards.iter().map(ToString::to_string).collect();
            out.push_str(&rendered.join("\n"));
        }

        out
    }
}
