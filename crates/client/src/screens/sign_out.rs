//! Sign-out behind an explicit confirmation step.
//!
//! `request()` opens the prompt; the destructive call is only reachable
//! through `confirm()` while the prompt is open.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use userdesk_domain::Screen;

use super::with_deadline;
use crate::ports::{AuthError, IdentityProvider, Navigator, Notice, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignOutState {
    #[default]
    Idle,
    AwaitingConfirmation,
    SigningOut,
}

/// Text for the two-choice confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub title: &'static str,
    pub message: &'static str,
    pub cancel_label: &'static str,
    /// Rendered with destructive styling.
    pub confirm_label: &'static str,
}

pub const SIGN_OUT_PROMPT: ConfirmationPrompt = ConfirmationPrompt {
    title: "Confirm sign out",
    message: "Are you sure you want to sign out?",
    cancel_label: "Cancel",
    confirm_label: "Sign out",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignOutOutcome {
    /// Not awaiting confirmation; nothing happened.
    Ignored,
    SignedOut,
    Failed(AuthError),
}

pub struct SignOutFlow {
    identity: Arc<dyn IdentityProvider>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    state: watch::Sender<SignOutState>,
    request_timeout: Duration,
}

impl SignOutFlow {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        request_timeout: Duration,
    ) -> Self {
        let (state, _rx) = watch::channel(SignOutState::Idle);
        Self {
            identity,
            navigator,
            notifier,
            state,
            request_timeout,
        }
    }

    pub fn state(&self) -> SignOutState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SignOutState> {
        self.state.subscribe()
    }

    /// Open the confirmation prompt. Returns `None` while a sign-out is
    /// already running.
    pub fn request(&self) -> Option<ConfirmationPrompt> {
        let opened = self.transition(
            |state| state != SignOutState::SigningOut,
            SignOutState::AwaitingConfirmation,
        );
        opened.then_some(SIGN_OUT_PROMPT)
    }

    /// Dismiss the prompt. Returns whether a prompt was open.
    pub fn cancel(&self) -> bool {
        self.transition(
            |state| state == SignOutState::AwaitingConfirmation,
            SignOutState::Idle,
        )
    }

    /// Sign out, then replace the current screen with Login.
    pub async fn confirm(&self) -> SignOutOutcome {
        let started = self.transition(
            |state| state == SignOutState::AwaitingConfirmation,
            SignOutState::SigningOut,
        );
        if !started {
            return SignOutOutcome::Ignored;
        }

        let result = with_deadline(
            self.request_timeout,
            self.identity.sign_out(),
            AuthError::Timeout,
        )
        .await;
        self.state.send_replace(SignOutState::Idle);

        match result {
            Ok(()) => {
                tracing::info!("Signed out");
                self.navigator.replace_screen(Screen::Login);
                SignOutOutcome::SignedOut
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sign out failed");
                self.notifier.notify(Notice::SignOutFailed {
                    reason: e.to_string(),
                });
                SignOutOutcome::Failed(e)
            }
        }
    }

    fn transition(&self, allowed: impl FnOnce(SignOutState) -> bool, next: SignOutState) -> bool {
        self.state.send_if_modified(|state| {
            if !allowed(*state) {
                return false;
            }
            let from = *state;
            tracing::debug!(from = ?from, to = ?next, "Sign-out state change");
            *state = next;
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryIdentity;
    use crate::infrastructure::recording::{Navigation, RecordingNavigator, RecordingNotifier};
    use crate::ports::MockIdentityProvider;
    use userdesk_domain::UserId;

    const TIMEOUT: Duration = Duration::from_secs(30);

    struct Harness {
        flow: SignOutFlow,
        navigator: Arc<RecordingNavigator>,
        notifier: Arc<RecordingNotifier>,
    }

    fn harness(identity: Arc<dyn IdentityProvider>) -> Harness {
        let navigator = Arc::new(RecordingNavigator::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let flow = SignOutFlow::new(identity, navigator.clone(), notifier.clone(), TIMEOUT);
        Harness {
            flow,
            navigator,
            notifier,
        }
    }

    #[tokio::test]
    async fn confirm_without_request_does_nothing() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_sign_out().times(0);
        let h = harness(Arc::new(identity));

        assert_eq!(h.flow.confirm().await, SignOutOutcome::Ignored);
        assert!(h.navigator.history().is_empty());
    }

    #[tokio::test]
    async fn cancel_closes_the_prompt_without_signing_out() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_sign_out().times(0);
        let h = harness(Arc::new(identity));

        assert_eq!(h.flow.request(), Some(SIGN_OUT_PROMPT));
        assert_eq!(h.flow.state(), SignOutState::AwaitingConfirmation);
        assert!(h.flow.cancel());
        assert_eq!(h.flow.state(), SignOutState::Idle);
        assert_eq!(h.flow.confirm().await, SignOutOutcome::Ignored);
        assert!(!h.flow.cancel());
    }

    #[tokio::test]
    async fn confirmed_sign_out_replaces_screen_with_login() {
        let identity = Arc::new(InMemoryIdentity::signed_in(UserId::new("uid-1").unwrap()));
        let h = harness(identity.clone());

        h.flow.request();
        assert_eq!(h.flow.confirm().await, SignOutOutcome::SignedOut);

        assert_eq!(h.flow.state(), SignOutState::Idle);
        assert!(identity.current_user_id().is_none());
        assert_eq!(h.navigator.history(), vec![Navigation::Replace(Screen::Login)]);
        assert!(h.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn failure_shows_the_reason_and_stays() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_sign_out()
            .times(1)
            .returning(|| Err(AuthError::network("connection reset")));
        let h = harness(Arc::new(identity));

        h.flow.request();
        let outcome = h.flow.confirm().await;

        assert_eq!(
            outcome,
            SignOutOutcome::Failed(AuthError::network("connection reset"))
        );
        assert!(h.navigator.history().is_empty());
        assert_eq!(
            h.notifier.notices(),
            vec![Notice::SignOutFailed {
                reason: "network error: connection reset".into()
            }]
        );
        assert_eq!(h.flow.state(), SignOutState::Idle);
    }

    #[tokio::test]
    async fn state_changes_are_published() {
        let h = harness(Arc::new(InMemoryIdentity::new()));
        let mut rx = h.flow.subscribe();

        h.flow.request();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), SignOutState::AwaitingConfirmation);
    }
}
