//! Adapters implementing the ports.
//!
//! - `firebase`: Firebase Auth and Firestore over their REST APIs
//! - `memory`: in-process identity and document store
//! - `recording`: navigator and notifier that keep a history

pub mod firebase;
pub mod memory;
pub mod recording;

pub use firebase::{FirebaseAuthClient, FirestoreClient, SessionSlot};
pub use memory::{InMemoryDocuments, InMemoryIdentity};
pub use recording::{Navigation, RecordingNavigator, RecordingNotifier};
