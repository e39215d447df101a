//! Application composition.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::config::{Backend, ClientConfig};
use crate::infrastructure::firebase::{
    http_client, FirebaseAuthClient, FirestoreClient, SessionSlot,
};
use crate::infrastructure::memory::{InMemoryDocuments, InMemoryIdentity};
use crate::ports::{AuthError, DocumentStore, IdentityProvider, Navigator, Notifier};
use crate::screens::{ProfileDocuments, ProfileScreen, RegistrationScreen, SignOutFlow};

/// Holds the port implementations and hands out screen coordinators.
///
/// Navigation and notices belong to the host UI, so they are always passed
/// in; identity and documents come from the configured backend.
#[derive(Clone)]
pub struct App {
    identity: Arc<dyn IdentityProvider>,
    documents: Arc<dyn DocumentStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    request_timeout: Duration,
}

impl App {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        documents: Arc<dyn DocumentStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            identity,
            documents,
            navigator,
            notifier,
            request_timeout,
        }
    }

    /// Wire the backend named by `config`.
    pub fn from_config(
        config: &ClientConfig,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> anyhow::Result<Self> {
        let (identity, documents): (Arc<dyn IdentityProvider>, Arc<dyn DocumentStore>) =
            match &config.backend {
                Backend::Memory => (
                    Arc::new(InMemoryIdentity::new()),
                    Arc::new(InMemoryDocuments::new()),
                ),
                Backend::Firebase(firebase) => {
                    let client = http_client(config.request_timeout)
                        .context("Failed to build HTTP client")?;
                    let session = SessionSlot::new();
                    (
                        Arc::new(FirebaseAuthClient::new(
                            client.clone(),
                            firebase.auth_url.clone(),
                            firebase.api_key.clone(),
                            session.clone(),
                        )),
                        Arc::new(FirestoreClient::new(
                            client,
                            firebase.firestore_url.clone(),
                            firebase.project_id.clone(),
                            session,
                        )),
                    )
                }
            };

        let backend = match config.backend {
            Backend::Firebase(_) => "firebase",
            Backend::Memory => "memory",
        };
        tracing::info!(backend, timeout = ?config.request_timeout, "Client wired");

        Ok(Self::new(
            identity,
            documents,
            navigator,
            notifier,
            config.request_timeout,
        ))
    }

    /// Everything in process, with default timeouts.
    pub fn in_memory(navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>) -> Self {
        let config = ClientConfig::in_memory();
        Self::new(
            Arc::new(InMemoryIdentity::new()),
            Arc::new(InMemoryDocuments::new()),
            navigator,
            notifier,
            config.request_timeout,
        )
    }

    pub fn identity(&self) -> &Arc<dyn IdentityProvider> {
        &self.identity
    }

    pub fn registration_screen(&self) -> RegistrationScreen {
        RegistrationScreen::new(
            self.identity.clone(),
            self.navigator.clone(),
            self.request_timeout,
        )
    }

    /// Profile editor for whoever is signed in right now.
    pub fn profile_screen(&self) -> Result<ProfileScreen, AuthError> {
        let user_id = self.identity.current_user_id().ok_or(AuthError::NotSignedIn)?;
        Ok(ProfileScreen::new(
            user_id,
            ProfileDocuments::new(self.documents.clone()),
            self.notifier.clone(),
            self.request_timeout,
        ))
    }

    pub fn sign_out_flow(&self) -> SignOutFlow {
        SignOutFlow::new(
            self.identity.clone(),
            self.navigator.clone(),
            self.notifier.clone(),
            self.request_timeout,
        )
    }
}
