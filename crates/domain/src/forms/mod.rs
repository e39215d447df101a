//! Form models and their validators.

pub mod profile;
pub mod registration;

pub use profile::{validate_profile, ProfileField, ProfileForm, ProfileRecord};
pub use registration::{
    is_valid_email, validate_registration, PasswordPolicy, PasswordRequirement,
    RegistrationField, RegistrationForm,
};
