//! Registration form and its validator.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;

use crate::validation::{FormField, ValidationErrors};

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email is invalid";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_POLICY: &str = concat!(
    "Password must be at least 8 characters long and include an uppercase letter, ",
    "a lowercase letter, a number and a special character (!@#$%^&*)"
);
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

/// Anything but whitespace, where whitespace includes the Unicode spaces
/// (no-break space, ideographic space, BOM, ...) and not just ASCII.
const NON_SPACE: &str = concat!(
    r"[^\s\x{00A0}\x{1680}\x{2000}-\x{200A}",
    r"\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]"
);

/// `<non-space>+@<non-space>+.<non-space>+`, unanchored.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{NON_SPACE}+@{NON_SPACE}+\\.{NON_SPACE}+")).expect("valid regex")
});

/// Input fields of the registration screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegistrationField {
    Email,
    Password,
    ConfirmPassword,
}

impl FormField for RegistrationField {
    fn name(self) -> &'static str {
        match self {
            RegistrationField::Email => "email",
            RegistrationField::Password => "password",
            RegistrationField::ConfirmPassword => "confirmPassword",
        }
    }
}

/// In-memory values of the registration screen.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

// Passwords stay out of logs.
impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .finish()
    }
}

impl RegistrationForm {
    pub fn value(&self, field: RegistrationField) -> &str {
        match field {
            RegistrationField::Email => &self.email,
            RegistrationField::Password => &self.password,
            RegistrationField::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set(&mut self, field: RegistrationField, value: impl Into<String>) {
        let slot = match field {
            RegistrationField::Email => &mut self.email,
            RegistrationField::Password => &mut self.password,
            RegistrationField::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value.into();
    }
}

/// Does `email` look like `local@domain.tld`?
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// One requirement of the password strength policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRequirement {
    MinLength,
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
    /// Only ASCII letters, digits and the policy symbols may appear.
    AllowedCharacters,
}

/// Password strength policy used at registration.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    pub const MIN_LENGTH: usize = 8;
    pub const SYMBOLS: &'static str = "!@#$%^&*";

    fn is_symbol(c: char) -> bool {
        Self::SYMBOLS.contains(c)
    }

    /// Every requirement `password` fails, in a stable order.
    pub fn violations(password: &str) -> Vec<PasswordRequirement> {
        let mut failed = Vec::new();
        if password.chars().count() < Self::MIN_LENGTH {
            failed.push(PasswordRequirement::MinLength);
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            failed.push(PasswordRequirement::Lowercase);
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            failed.push(PasswordRequirement::Uppercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            failed.push(PasswordRequirement::Digit);
        }
        if !password.chars().any(Self::is_symbol) {
            failed.push(PasswordRequirement::Symbol);
        }
        if !password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || Self::is_symbol(c))
        {
            failed.push(PasswordRequirement::AllowedCharacters);
        }
        failed
    }

    pub fn is_satisfied_by(password: &str) -> bool {
        Self::violations(password).is_empty()
    }
}

/// Validate every registration rule independently.
///
/// A confirmation mismatch is reported even when the password itself is
/// invalid.
pub fn validate_registration(form: &RegistrationForm) -> ValidationErrors<RegistrationField> {
    let mut errors = ValidationErrors::new();

    if form.email.is_empty() {
        errors.insert(RegistrationField::Email, EMAIL_REQUIRED);
    } else if !is_valid_email(&form.email) {
        errors.insert(RegistrationField::Email, EMAIL_INVALID);
    }

    if form.password.is_empty() {
        errors.insert(RegistrationField::Password, PASSWORD_REQUIRED);
    } else if !PasswordPolicy::is_satisfied_by(&form.password) {
        errors.insert(RegistrationField::Password, PASSWORD_POLICY);
    }

    if form.password != form.confirm_password {
        errors.insert(RegistrationField::ConfirmPassword, PASSWORDS_DO_NOT_MATCH);
    }

    errors
}
