//! Profile screen - load and update the signed-in user's profile.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use userdesk_domain::{validate_profile, ProfileField, ProfileForm, ProfileRecord, UserId};

use super::{with_deadline, ProfileDocuments, SubmitOutcome};
use crate::ports::{Notice, Notifier, StoreError};
use crate::state::{FormState, Phase};

/// What happened when the screen was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileLoad {
    /// Already activated earlier (or busy); nothing fetched.
    Skipped,
    /// A stored profile was found and copied into the form.
    Hydrated,
    /// No stored profile; the form keeps its defaults.
    Empty,
    /// The fetch failed; logged, form keeps its defaults.
    Failed,
}

/// Coordinates the profile editor for one signed-in user.
pub struct ProfileScreen {
    user_id: UserId,
    documents: ProfileDocuments,
    notifier: Arc<dyn Notifier>,
    form: FormState<ProfileForm, ProfileField>,
    activated: AtomicBool,
    request_timeout: Duration,
}

impl ProfileScreen {
    pub fn new(
        user_id: UserId,
        documents: ProfileDocuments,
        notifier: Arc<dyn Notifier>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            user_id,
            documents,
            notifier,
            form: FormState::new(),
            activated: AtomicBool::new(false),
            request_timeout,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn form(&self) -> &FormState<ProfileForm, ProfileField> {
        &self.form
    }

    /// Keystroke handler.
    pub fn set_field(&self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        self.form.edit(|form| form.set(field, value));
    }

    /// Fetch the stored profile the first time the screen is shown.
    ///
    /// Failures are logged and swallowed: an empty profile is a valid
    /// starting point and the user can still edit and submit.
    ///
    /// An activation that finds the form busy does not count; the next one
    /// still fetches.
    pub async fn activate(&self) -> ProfileLoad {
        if self.activated.load(Ordering::SeqCst) {
            return ProfileLoad::Skipped;
        }
        if self.form.begin(Phase::Loading).is_none() {
            tracing::debug!(user_id = %self.user_id, "Profile load deferred: busy");
            return ProfileLoad::Skipped;
        }
        if self.activated.swap(true, Ordering::SeqCst) {
            self.form.finish();
            return ProfileLoad::Skipped;
        }

        let fetched = with_deadline(
            self.request_timeout,
            self.documents.get(&self.user_id),
            StoreError::Timeout,
        )
        .await;

        let outcome = match fetched {
            Ok(Some(record)) => {
                tracing::debug!(user_id = %self.user_id, "Hydrating profile form");
                self.form.replace_values(ProfileForm::from(record));
                ProfileLoad::Hydrated
            }
            Ok(None) => {
                tracing::debug!(user_id = %self.user_id, "No stored profile yet");
                ProfileLoad::Empty
            }
            Err(e) => {
                tracing::warn!(user_id = %self.user_id, error = %e, "Failed to load profile");
                ProfileLoad::Failed
            }
        };

        self.form.finish();
        outcome
    }

    /// Validate and upsert the profile.
    ///
    /// The form values are left untouched whatever the outcome, so a failed
    /// update can be retried as-is.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(values) = self.form.begin(Phase::Submitting) else {
            tracing::debug!(user_id = %self.user_id, "Profile submit ignored: busy");
            return SubmitOutcome::Ignored;
        };

        let errors = validate_profile(&values);
        let invalid = !errors.is_empty();
        self.form.set_errors(errors);
        if invalid {
            self.form.finish();
            return SubmitOutcome::Invalid;
        }

        let record = ProfileRecord::from(&values);
        let saved = with_deadline(
            self.request_timeout,
            self.documents.put(&self.user_id, &record),
            StoreError::Timeout,
        )
        .await;

        let outcome = match saved {
            Ok(()) => {
                tracing::info!(user_id = %self.user_id, "Profile updated");
                self.notifier.notify(Notice::ProfileUpdated);
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                tracing::error!(user_id = %self.user_id, error = %e, "Failed to update profile");
                self.notifier.notify(Notice::ProfileUpdateFailed);
                SubmitOutcome::Failed
            }
        };

        self.form.finish();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryDocuments;
    use crate::infrastructure::recording::RecordingNotifier;
    use crate::ports::{DocumentStore, MockDocumentStore};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;
    use userdesk_domain::forms::profile::{
        FAVORITE_FOOD_REQUIRED, FIRST_NAME_REQUIRED, LAST_NAME_REQUIRED,
    };

    const TIMEOUT: Duration = Duration::from_secs(30);

    fn uid() -> UserId {
        UserId::new("uid-1").unwrap()
    }

    fn screen_with(store: impl DocumentStore + 'static) -> (ProfileScreen, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let screen = ProfileScreen::new(
            uid(),
            ProfileDocuments::new(Arc::new(store)),
            notifier.clone(),
            TIMEOUT,
        );
        (screen, notifier)
    }

    fn fill(screen: &ProfileScreen) {
        screen.set_field(ProfileField::FirstName, "Ada");
        screen.set_field(ProfileField::LastName, "Lovelace");
        screen.set_field(ProfileField::FavoriteFood, "Tamales");
    }

    /// Holds every call open until released. Reads find nothing.
    #[derive(Default)]
    struct GatedDocuments {
        gets: AtomicUsize,
        puts: AtomicUsize,
        gate: Notify,
    }

    #[async_trait]
    impl DocumentStore for GatedDocuments {
        async fn get_document(&self, _: &str, _: &UserId) -> Result<Option<Value>, StoreError> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(None)
        }

        async fn put_document(&self, _: &str, _: &UserId, _: &Value) -> Result<(), StoreError> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn empty_form_submit_reports_all_fields_without_store_call() {
        let mut store = MockDocumentStore::new();
        store.expect_put_document().times(0);
        let (screen, notifier) = screen_with(store);

        assert_eq!(screen.submit().await, SubmitOutcome::Invalid);

        let snapshot = screen.form().snapshot();
        assert_eq!(snapshot.errors.get(ProfileField::FirstName), Some(FIRST_NAME_REQUIRED));
        assert_eq!(snapshot.errors.get(ProfileField::LastName), Some(LAST_NAME_REQUIRED));
        assert_eq!(
            snapshot.errors.get(ProfileField::FavoriteFood),
            Some(FAVORITE_FOOD_REQUIRED)
        );
        assert!(!snapshot.is_loading());
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn successful_update_notifies_and_keeps_values() {
        let store = Arc::new(InMemoryDocuments::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let screen = ProfileScreen::new(
            uid(),
            ProfileDocuments::new(store.clone()),
            notifier.clone(),
            TIMEOUT,
        );
        fill(&screen);
        let before = screen.form().values();

        assert_eq!(screen.submit().await, SubmitOutcome::Succeeded);

        let snapshot = screen.form().snapshot();
        assert_eq!(snapshot.values, before);
        assert!(snapshot.errors.is_empty());
        assert!(!snapshot.is_loading());
        assert_eq!(notifier.notices(), vec![Notice::ProfileUpdated]);

        let stored = store.get_document("profiles", &uid()).await.unwrap();
        assert_eq!(stored.unwrap()["favoriteFood"], "Tamales");
    }

    #[tokio::test]
    async fn successful_update_clears_previous_errors() {
        let (screen, _) = screen_with(InMemoryDocuments::new());
        assert_eq!(screen.submit().await, SubmitOutcome::Invalid);

        fill(&screen);
        assert_eq!(screen.submit().await, SubmitOutcome::Succeeded);
        assert!(screen.form().snapshot().errors.is_empty());
    }

    #[tokio::test]
    async fn failed_update_shows_notice_and_preserves_values() {
        let mut store = MockDocumentStore::new();
        store
            .expect_put_document()
            .times(1)
            .returning(|_, _, _| Err(StoreError::network("connection reset")));
        let (screen, notifier) = screen_with(store);
        fill(&screen);
        let before = screen.form().values();

        assert_eq!(screen.submit().await, SubmitOutcome::Failed);

        assert_eq!(screen.form().values(), before);
        assert!(!screen.form().is_loading());
        assert_eq!(notifier.notices(), vec![Notice::ProfileUpdateFailed]);
    }

    #[tokio::test]
    async fn resubmitting_while_in_flight_is_a_no_op() {
        let store = Arc::new(GatedDocuments::default());
        let notifier = Arc::new(RecordingNotifier::new());
        let screen = ProfileScreen::new(
            uid(),
            ProfileDocuments::new(store.clone()),
            notifier.clone(),
            TIMEOUT,
        );
        fill(&screen);

        let (first, second) = tokio::join!(screen.submit(), async {
            while store.puts.load(Ordering::SeqCst) == 0 {
                tokio::task::yield_now().await;
            }
            assert!(screen.form().is_loading());
            let second = screen.submit().await;
            store.gate.notify_one();
            second
        });

        assert_eq!(first, SubmitOutcome::Succeeded);
        assert_eq!(second, SubmitOutcome::Ignored);
        assert_eq!(store.puts.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.notices(), vec![Notice::ProfileUpdated]);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_store_times_out_as_a_failed_update() {
        struct HungDocuments;

        #[async_trait]
        impl DocumentStore for HungDocuments {
            async fn get_document(
                &self,
                _: &str,
                _: &UserId,
            ) -> Result<Option<Value>, StoreError> {
                std::future::pending().await
            }

            async fn put_document(&self, _: &str, _: &UserId, _: &Value) -> Result<(), StoreError> {
                std::future::pending().await
            }
        }

        let (screen, notifier) = screen_with(HungDocuments);
        fill(&screen);

        assert_eq!(screen.submit().await, SubmitOutcome::Failed);
        assert_eq!(notifier.notices(), vec![Notice::ProfileUpdateFailed]);
        assert!(!screen.form().is_loading());
    }

    #[tokio::test]
    async fn activate_hydrates_from_stored_profile() {
        let mut store = MockDocumentStore::new();
        store
            .expect_get_document()
            .withf(|collection, key| {
                collection.to_string() == "profiles" && key.as_str() == "uid-1"
            })
            .times(1)
            .returning(|_, _| {
                Ok(Some(json!({
                    "firstName": "Ada",
                    "lastName": "Lovelace",
                    "favoriteFood": "Tamales"
                })))
            });
        let (screen, _) = screen_with(store);

        assert_eq!(screen.activate().await, ProfileLoad::Hydrated);

        let snapshot = screen.form().snapshot();
        assert_eq!(snapshot.values.first_name, "Ada");
        assert_eq!(snapshot.values.favorite_food, "Tamales");
        assert!(!snapshot.is_loading());
    }

    #[tokio::test]
    async fn activate_with_absent_document_keeps_defaults_silently() {
        let mut store = MockDocumentStore::new();
        store.expect_get_document().returning(|_, _| Ok(None));
        let (screen, notifier) = screen_with(store);

        assert_eq!(screen.activate().await, ProfileLoad::Empty);

        let snapshot = screen.form().snapshot();
        assert_eq!(snapshot.values, ProfileForm::default());
        assert!(snapshot.errors.is_empty());
        assert!(snapshot.general_error.is_none());
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn activate_swallows_load_failures() {
        let mut store = MockDocumentStore::new();
        store
            .expect_get_document()
            .returning(|_, _| Err(StoreError::PermissionDenied("rules".into())));
        let (screen, notifier) = screen_with(store);

        assert_eq!(screen.activate().await, ProfileLoad::Failed);

        let snapshot = screen.form().snapshot();
        assert_eq!(snapshot.values, ProfileForm::default());
        assert!(snapshot.general_error.is_none());
        assert!(!snapshot.is_loading());
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn activation_while_busy_is_retried_later() {
        let mut store = MockDocumentStore::new();
        store.expect_get_document().times(1).returning(|_, _| {
            Ok(Some(json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "favoriteFood": "Tamales"
            })))
        });
        let (screen, _) = screen_with(store);

        // A submission is still running when the screen is first shown.
        assert!(screen.form().begin(Phase::Submitting).is_some());
        assert_eq!(screen.activate().await, ProfileLoad::Skipped);
        screen.form().finish();

        assert_eq!(screen.activate().await, ProfileLoad::Hydrated);
        assert_eq!(screen.form().values().first_name, "Ada");
        assert_eq!(screen.activate().await, ProfileLoad::Skipped);
    }

    #[tokio::test]
    async fn submit_during_load_is_ignored() {
        let store = Arc::new(GatedDocuments::default());
        let notifier = Arc::new(RecordingNotifier::new());
        let screen = ProfileScreen::new(
            uid(),
            ProfileDocuments::new(store.clone()),
            notifier.clone(),
            TIMEOUT,
        );
        fill(&screen);

        let (load, submit) = tokio::join!(screen.activate(), async {
            while store.gets.load(Ordering::SeqCst) == 0 {
                tokio::task::yield_now().await;
            }
            assert_eq!(screen.form().phase(), Phase::Loading);
            let outcome = screen.submit().await;
            store.gate.notify_one();
            outcome
        });

        assert_eq!(load, ProfileLoad::Empty);
        assert_eq!(submit, SubmitOutcome::Ignored);
        assert_eq!(store.puts.load(Ordering::SeqCst), 0);
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn activate_runs_only_once() {
        let mut store = MockDocumentStore::new();
        store.expect_get_document().times(1).returning(|_, _| Ok(None));
        let (screen, _) = screen_with(store);

        assert_eq!(screen.activate().await, ProfileLoad::Empty);
        assert_eq!(screen.activate().await, ProfileLoad::Skipped);
    }
}
