//! userdesk Domain - form models, validators, and invariants.
//!
//! Everything here is pure: no I/O, no async, no logging. The client crate
//! layers state holders and submission coordinators on top.

pub mod error;
pub mod forms;
pub mod ids;
pub mod screen;
pub mod validation;

pub use error::DomainError;
pub use forms::{
    is_valid_email, validate_profile, validate_registration, PasswordPolicy,
    PasswordRequirement, ProfileField, ProfileForm, ProfileRecord, RegistrationField,
    RegistrationForm,
};
pub use ids::UserId;
pub use screen::Screen;
pub use validation::{FormField, ValidationErrors};
