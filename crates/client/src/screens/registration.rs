//! Registration screen - create an account, then go Home.

use std::sync::Arc;
use std::time::Duration;

use userdesk_domain::{validate_registration, RegistrationField, RegistrationForm, Screen};

use super::{with_deadline, SubmitOutcome};
use crate::ports::{AuthError, IdentityProvider, Navigator};
use crate::state::{FormState, Phase};

pub struct RegistrationScreen {
    identity: Arc<dyn IdentityProvider>,
    navigator: Arc<dyn Navigator>,
    form: FormState<RegistrationForm, RegistrationField>,
    request_timeout: Duration,
}

impl RegistrationScreen {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        navigator: Arc<dyn Navigator>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            identity,
            navigator,
            form: FormState::new(),
            request_timeout,
        }
    }

    pub fn form(&self) -> &FormState<RegistrationForm, RegistrationField> {
        &self.form
    }

    pub fn set_field(&self, field: RegistrationField, value: impl Into<String>) {
        let value = value.into();
        self.form.edit(|form| form.set(field, value));
    }

    /// Validate, create the account, and replace this screen with Home.
    ///
    /// On failure the provider's reason is published as the general error
    /// and the user stays on this screen.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(values) = self.form.begin(Phase::Submitting) else {
            tracing::debug!("Registration submit ignored: busy");
            return SubmitOutcome::Ignored;
        };
        self.form.set_general_error(None);

        let errors = validate_registration(&values);
        let invalid = !errors.is_empty();
        self.form.set_errors(errors);
        if invalid {
            self.form.finish();
            return SubmitOutcome::Invalid;
        }

        let created = with_deadline(
            self.request_timeout,
            self.identity.create_account(&values.email, &values.password),
            AuthError::Timeout,
        )
        .await;

        match created {
            Ok(user_id) => {
                tracing::info!(user_id = %user_id, "Account created");
                // The form is discarded once the account exists.
                self.form.reset();
                self.form.finish();
                self.navigator.replace_screen(Screen::Home);
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                tracing::warn!(error = %e, "Account creation failed");
                self.form
                    .set_general_error(Some(format!("Registration failed: {e}")));
                self.form.finish();
                SubmitOutcome::Failed
            }
        }
    }

    /// "Back to login" link.
    pub fn back_to_login(&self) {
        self.navigator.navigate_to(Screen::Login);
    }
}
