//! Firebase adapters: Auth REST API (identity) and Firestore REST API
//! (documents).
//!
//! Both clients share one `SessionSlot`: the auth client fills it on sign-up
//! and clears it on sign-out, the Firestore client reads the ID token from it.

mod auth;
mod firestore;
mod session;

use std::time::Duration;

use reqwest::Client;
use url::Url;

pub use auth::FirebaseAuthClient;
pub use firestore::FirestoreClient;
pub use session::{AuthSession, SessionSlot};

/// Default Firebase Auth base URL.
pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com";

/// Default Firestore base URL.
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com";

/// Build the HTTP client shared by the Firebase adapters.
pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("userdesk/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Append path segments to `base`, percent-encoding each one.
///
/// Returns `None` if `base` cannot carry a path (e.g. `mailto:`).
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Option<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .extend(segments);
    Some(url)
}
