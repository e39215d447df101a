//! userdesk Client library.
//!
//! Screen coordinators for the profile editor, the registration form, and
//! the sign-out confirmation, plus the adapters they talk to.
//!
//! ## Structure
//!
//! - `ports/` - Identity, document store, navigation, and notice traits
//! - `state/` - Observable form state (`watch` snapshots)
//! - `screens/` - Coordinators: validate, call a port, publish the result
//! - `infrastructure/` - Firebase REST, in-memory, and recording adapters
//! - `config`, `telemetry`, `app` - Environment, logging, composition

pub mod app;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod screens;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use config::{Backend, ClientConfig, ConfigError, FirebaseConfig};
pub use screens::{
    ProfileLoad, ProfileScreen, RegistrationScreen, SignOutFlow, SignOutOutcome, SignOutState,
    SubmitOutcome,
};
pub use state::{FormSnapshot, FormState, Phase};
