//! Screen coordinators - validate, call out through ports, publish state.
//!
//! Each coordinator owns its screen's `FormState` and never lets an
//! external failure escape: failures become field errors, a general error,
//! or a notice.

mod profile;
mod profile_documents;
mod registration;
mod sign_out;

use std::future::Future;
use std::time::Duration;

pub use profile::{ProfileLoad, ProfileScreen};
pub use profile_documents::{ProfileDocuments, PROFILES_COLLECTION};
pub use registration::RegistrationScreen;
pub use sign_out::{
    ConfirmationPrompt, SignOutFlow, SignOutOutcome, SignOutState, SIGN_OUT_PROMPT,
};

/// Result of pressing a submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission (or load) was in flight; nothing happened.
    Ignored,
    /// Validation failed; errors are published and no external call was made.
    Invalid,
    Succeeded,
    /// The external call failed; the failure has been surfaced to the user.
    Failed,
}

/// Run an external call with an upper bound on its duration.
pub(crate) async fn with_deadline<T, E>(
    limit: Duration,
    call: impl Future<Output = Result<T, E>>,
    on_timeout: impl FnOnce(Duration) -> E,
) -> Result<T, E> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(on_timeout(limit)),
    }
}
