//! Port traits for external collaborators.
//!
//! These are the only abstractions the screens depend on. Ports exist for:
//! - Authentication (could swap Firebase Auth -> any identity provider)
//! - Document storage (could swap Firestore -> any keyed document store)
//! - Navigation and notices (implemented by the host UI)

pub mod documents;
pub mod error;
pub mod identity;
pub mod navigation;
pub mod notices;

pub use documents::DocumentStore;
pub use error::{AuthError, StoreError};
pub use identity::IdentityProvider;
pub use navigation::Navigator;
pub use notices::{Notice, Notifier};

#[cfg(any(test, feature = "testing"))]
pub use documents::MockDocumentStore;
#[cfg(any(test, feature = "testing"))]
pub use identity::MockIdentityProvider;
#[cfg(any(test, feature = "testing"))]
pub use navigation::MockNavigator;
#[cfg(any(test, feature = "testing"))]
pub use notices::MockNotifier;
