//! The app controller.
//!
//! Owns the profile list, the add-profile form, the search text and the
//! per-field errors. Every change to the list goes through [`App::commit`],
//! which applies the new list and then runs the persistence hook once.

use tracing::info;

use crate::form::{Field, FieldErrors, ProfileForm};
use crate::profile::{default_profiles, Profile, ProfileId};
use crate::prompt::Confirm;
use crate::storage::KeyValueStore;
use crate::store::ProfileStore;

/// Confirmation shown before clearing every saved profile.
pub const CLEAR_CONFIRMATION: &str = "Clear saved profiles? This cannot be undone.";

/// How the profile list changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A profile was appended by a form submission.
    Added(ProfileId),
    /// A profile was removed.
    Deleted(ProfileId),
    /// Everything was reset to the built-in list.
    Cleared,
}

/// Result of submitting the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A profile was added under this id.
    Added(ProfileId),
    /// Validation failed; the errors are also kept on the controller.
    Rejected(FieldErrors),
}

/// The controller for the profile directory.
#[derive(Debug)]
pub struct App<S> {
    store: ProfileStore<S>,
    profiles: Vec<Profile>,
    form: ProfileForm,
    search: String,
    field_errors: FieldErrors,
}

impl<S: KeyValueStore> App<S> {
    /// Load the saved list and start with an empty form and search.
    pub fn initialize(store: ProfileStore<S>) -> Self {
        let profiles = store.load();
        info!("Loaded {} profile(s)", profiles.len());
        Self {
            store,
            profiles,
            form: ProfileForm::default(),
            search: String::new(),
            field_errors: FieldErrors::new(),
        }
    }

    /// The full list, in insertion order.
    #[must_use]
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// The draft form.
    #[must_use]
    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    /// Errors from the last rejected submission that have not been edited away.
    #[must_use]
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// The current search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// The record store adapter.
    pub fn store(&self) -> &ProfileStore<S> {
        &self.store
    }

    /// Edit a form field. Clears that field's error, if any.
    pub fn change_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value.into());
        self.field_errors.remove(&field);
    }

    /// Validate the current form without touching any state.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        self.form.validate()
    }

    /// Submit the form.
    ///
    /// On success a new profile with trimmed fields and a fresh id is
    /// appended, the form is emptied and errors are cleared. On failure
    /// nothing but the field errors changes.
    pub fn submit(&mut self) -> SubmitOutcome {
        let errors = self.validate();
        if !errors.is_empty() {
            self.field_errors.clone_from(&errors);
            return SubmitOutcome::Rejected(errors);
        }

        let id = ProfileId::generate(&self.profiles);
        let profile = Profile::new(
            self.form.name.trim(),
            self.form.image.trim(),
            self.form.bio.trim(),
        )
        .with_id(id.clone());

        let mut next = self.profiles.clone();
        next.push(profile);
        self.commit(next, Change::Added(id.clone()));

        self.form = ProfileForm::default();
        self.field_errors.clear();
        SubmitOutcome::Added(id)
    }

    /// Delete the profile with `id` after the user confirms.
    ///
    /// Returns whether a profile was removed. Unknown ids are a no-op and
    /// do not prompt.
    pub fn delete<C: Confirm + ?Sized>(&mut self, id: &ProfileId, confirm: &mut C) -> bool {
        let Some(profile) = self.profiles.iter().find(|p| p.id.as_ref() == Some(id)) else {
            return false;
        };
        if !confirm.confirm(&format!("Delete \"{}\"?", profile.name)) {
            return false;
        }
        self.remove(id)
    }

    /// Remove the first profile with `id` without asking.
    ///
    /// This is the handler a card calls once its own confirmation passed.
    pub fn remove(&mut self, id: &ProfileId) -> bool {
        let Some(index) = self.profiles.iter().position(|p| p.id.as_ref() == Some(id)) else {
            return false;
        };
        let mut next = self.profiles.clone();
        next.remove(index);
        self.commit(next, Change::Deleted(id.clone()));
        true
    }

    /// Replace the search text.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Profiles whose name contains the search text, ignoring case.
    #[must_use]
    pub fn filtered_profiles(&self) -> Vec<&Profile> {
        self.profiles
            .iter()
            .filter(|p| p.matches(&self.search))
            .collect()
    }

    /// Forget every saved profile after the user confirms.
    ///
    /// The storage slot is removed and stays absent until the next add or
    /// delete; a reload then yields the built-in list.
    pub fn clear_all<C: Confirm + ?Sized>(&mut self, confirm: &mut C) -> bool {
        if !confirm.confirm(CLEAR_CONFIRMATION) {
            return false;
        }
        self.commit(default_profiles(), Change::Cleared);
        true
    }

    fn commit(&mut self, next: Vec<Profile>, change: Change) {
        self.profiles = next;
        info!("{:?}; {} profile(s)", change, self.profiles.len());
        match change {
            Change::Added(_) | Change::Deleted(_) => self.store.save(&self.profiles),
            Change::Cleared => self.store.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{IMAGE_INVALID, IMAGE_REQUIRED, NAME_REQUIRED};
    use crate::prompt::AssumeYes;
    use crate::storage::Storage;

    fn new_app() -> App<Storage> {
        App::initialize(ProfileStore::new(Storage::open_in_memory().unwrap()))
    }

    fn saved(app: &App<Storage>) -> Option<Vec<Profile>> {
        app.store()
            .backend()
            .get_item("profiles")
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    fn add<S: KeyValueStore>(app: &mut App<S>, name: &str, image: &str, bio: &str) -> ProfileId {
        app.change_field(Field::Name, name);
        app.change_field(Field::Image, image);
        app.change_field(Field::Bio, bio);
        match app.submit() {
            SubmitOutcome::Added(id) => id,
            SubmitOutcome::Rejected(errors) => panic!("rejected: {errors:?}"),
        }
    }

    fn names(profiles: &[&Profile]) -> Vec<String> {
        profiles.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_initialize_with_empty_storage() {
        let app = new_app();
        assert_eq!(app.profiles(), default_profiles().as_slice());
        assert_eq!(app.search(), "");
        assert_eq!(app.form(), &ProfileForm::default());
        assert!(app.field_errors().is_empty());
    }

    #[test]
    fn test_initialize_reads_saved_list() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .set_item("profiles", r#"[{"id":5,"name":"Zed","image":"/z.png","bio":""}]"#)
            .unwrap();

        let app = App::initialize(ProfileStore::new(storage));
        assert_eq!(app.profiles().len(), 1);
        assert_eq!(app.profiles()[0].id, Some(ProfileId::new(5)));
    }

    #[test]
    fn test_submit_appends_trimmed_profile() {
        let mut app = new_app();
        let before = app.profiles().len();

        let id = add(&mut app, "  Ann  ", "/ann.jpg  ", "  likes tea ");

        assert_eq!(app.profiles().len(), before + 1);
        let added = app.profiles().last().unwrap();
        assert_eq!(added.id.as_ref(), Some(&id));
        assert_eq!(added.name, "Ann");
        assert_eq!(added.image, "/ann.jpg");
        assert_eq!(added.bio, "likes tea");
        assert_eq!(app.form(), &ProfileForm::default());
    }

    #[test]
    fn test_submit_persists_new_list() {
        let mut app = new_app();
        add(&mut app, "Ann", "/ann.jpg", "");
        assert_eq!(saved(&app).as_deref(), Some(app.profiles()));
    }

    #[test]
    fn test_submit_generates_unique_ids() {
        let mut app = new_app();
        let a = add(&mut app, "Ann", "/a.jpg", "");
        let b = add(&mut app, "Ben", "/b.jpg", "");
        let c = add(&mut app, "Cy", "/c.jpg", "");
        assert!(a != b && b != c && a != c);
    }

    #[test]
    fn test_submit_rejects_empty_form() {
        let mut app = new_app();

        let outcome = app.submit();

        let SubmitOutcome::Rejected(errors) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(errors.get(&Field::Name).map(String::as_str), Some(NAME_REQUIRED));
        assert_eq!(
            errors.get(&Field::Image).map(String::as_str),
            Some(IMAGE_REQUIRED)
        );
        assert_eq!(app.field_errors(), &errors);
        assert_eq!(app.profiles(), default_profiles().as_slice());
        assert_eq!(saved(&app), None);
    }

    #[test]
    fn test_submit_rejects_bad_image_prefix() {
        let mut app = new_app();
        app.change_field(Field::Name, "Ann");
        app.change_field(Field::Image, "ftp://x/a.jpg");

        assert!(matches!(app.submit(), SubmitOutcome::Rejected(_)));
        assert_eq!(
            app.field_errors().get(&Field::Image).map(String::as_str),
            Some(IMAGE_INVALID)
        );
        assert!(!app.field_errors().contains_key(&Field::Name));
        assert_eq!(app.form().name, "Ann");
        assert_eq!(app.profiles().len(), 1);
    }

    #[test]
    fn test_editing_clears_only_that_error() {
        let mut app = new_app();
        app.submit();
        assert_eq!(app.field_errors().len(), 2);

        app.change_field(Field::Name, "A");
        assert!(!app.field_errors().contains_key(&Field::Name));
        assert!(app.field_errors().contains_key(&Field::Image));
    }

    #[test]
    fn test_validate_does_not_store_errors() {
        let app = new_app();
        assert_eq!(app.validate().len(), 2);
        assert!(app.field_errors().is_empty());
    }

    #[test]
    fn test_successful_submit_clears_errors() {
        let mut app = new_app();
        app.change_field(Field::Image, "/x.jpg");
        app.submit();
        assert_eq!(app.field_errors().len(), 1);

        app.change_field(Field::Name, "Ann");
        add(&mut app, "Ann", "/x.jpg", "");
        assert!(app.field_errors().is_empty());
    }

    #[test]
    fn test_delete_confirmed_removes_one() {
        let mut app = new_app();
        let a = add(&mut app, "Ann", "/a.jpg", "");
        let b = add(&mut app, "Ben", "/b.jpg", "");
        let c = add(&mut app, "Cy", "/c.jpg", "");

        let mut asked = Vec::new();
        let removed = app.delete(&b, &mut |message: &str| {
            asked.push(message.to_string());
            true
        });

        assert!(removed);
        assert_eq!(asked, vec!["Delete \"Ben\"?"]);
        let ids: Vec<_> = app.profiles().iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![None, Some(a), Some(c)]);
        assert_eq!(saved(&app).as_deref(), Some(app.profiles()));
    }

    #[test]
    fn test_delete_declined_is_noop() {
        let mut app = new_app();
        let a = add(&mut app, "Ann", "/a.jpg", "");
        let before = app.profiles().to_vec();

        assert!(!app.delete(&a, &mut |_: &str| false));
        assert_eq!(app.profiles(), before.as_slice());
    }

    #[test]
    fn test_delete_unknown_id_does_not_prompt() {
        let mut app = new_app();
        let mut prompted = false;

        let removed = app.delete(&ProfileId::new(404), &mut |_: &str| {
            prompted = true;
            true
        });

        assert!(!removed);
        assert!(!prompted);
        assert_eq!(saved(&app), None);
    }

    #[test]
    fn test_search_does_not_mutate() {
        let mut app = new_app();
        add(&mut app, "Bob", "/b.jpg", "");
        let before = app.profiles().to_vec();

        app.set_search("zzz");

        assert_eq!(app.search(), "zzz");
        assert_eq!(app.profiles(), before.as_slice());
        assert!(app.filtered_profiles().is_empty());
    }

    #[test]
    fn test_filtered_profiles_keeps_order() {
        let storage = Storage::open_in_memory().unwrap();
        let store = ProfileStore::new(storage);
        store.save(&[
            Profile::new("Bob", "/b.jpg", ""),
            Profile::new("Alice", "/a.jpg", ""),
            Profile::new("Bobby", "/bb.jpg", ""),
        ]);
        let mut app = App::initialize(store);

        app.set_search("bo");
        assert_eq!(names(&app.filtered_profiles()), vec!["Bob", "Bobby"]);

        app.set_search("BOB");
        assert_eq!(names(&app.filtered_profiles()), vec!["Bob", "Bobby"]);

        app.set_search("");
        assert_eq!(app.filtered_profiles().len(), 3);
    }

    #[test]
    fn test_clear_all_confirmed() {
        let mut app = new_app();
        add(&mut app, "Ann", "/a.jpg", "");
        assert!(saved(&app).is_some());

        let mut asked = String::new();
        let cleared = app.clear_all(&mut |message: &str| {
            asked = message.to_string();
            true
        });

        assert!(cleared);
        assert_eq!(asked, CLEAR_CONFIRMATION);
        assert_eq!(app.profiles(), default_profiles().as_slice());
        assert_eq!(saved(&app), None);
    }

    #[test]
    fn test_clear_all_declined() {
        let mut app = new_app();
        add(&mut app, "Ann", "/a.jpg", "");
        let before = app.profiles().to_vec();

        assert!(!app.clear_all(&mut |_: &str| false));
        assert_eq!(app.profiles(), before.as_slice());
        assert_eq!(saved(&app).as_deref(), Some(before.as_slice()));
    }

    #[test]
    fn test_remove_is_unconfirmed_delete() {
        let mut app = new_app();
        let a = add(&mut app, "Ann", "/a.jpg", "");

        assert!(app.remove(&a));
        assert!(!app.remove(&a));
        assert_eq!(app.profiles(), default_profiles().as_slice());
    }

    #[test]
    fn test_remove_takes_first_duplicate_only() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .set_item(
                "profiles",
                r#"[{"id":5,"name":"Ann","image":"/a.jpg"},{"id":5,"name":"Ann again","image":"/b.jpg"}]"#,
            )
            .unwrap();
        let mut app = App::initialize(ProfileStore::new(storage));

        assert!(app.delete(&ProfileId::new(5), &mut AssumeYes));

        assert_eq!(app.profiles().len(), 1);
        assert_eq!(app.profiles()[0].name, "Ann again");
        assert_eq!(saved(&app).as_deref(), Some(app.profiles()));
    }

    #[test]
    fn test_text_ids_survive_submit_and_delete() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .set_item(
                "profiles",
                r#"[{"id":"a1","name":"Ann","image":"/a.jpg","bio":""},{"id":2,"name":"Ben","image":"/b.jpg","bio":""}]"#,
            )
            .unwrap();
        let mut app = App::initialize(ProfileStore::new(storage));
        assert_eq!(app.profiles().len(), 2);

        add(&mut app, "Cy", "/c.jpg", "");
        assert!(app.delete(&ProfileId::Text("a1".to_string()), &mut AssumeYes));

        let names: Vec<_> = saved(&app)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Ben", "Cy"]);
    }

    #[test]
    fn test_state_survives_reload() {
        let storage = Storage::open_in_memory().unwrap();
        let mut app = App::initialize(ProfileStore::new(&storage));
        add(&mut app, "Ann", "https://example.com/a.png", "hi");
        app.clear_all(&mut AssumeYes);
        add(&mut app, "Ben", "/b.jpg", "");
        let expected = app.profiles().to_vec();
        drop(app);

        let reloaded = App::initialize(ProfileStore::new(&storage));
        assert_eq!(reloaded.profiles(), expected.as_slice());
        let names: Vec<_> = reloaded.profiles().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["My profile", "Ben"]);
    }
}
