//! Transient notices (alerts) shown by the host UI.

/// A one-off message for the user, outside any form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ProfileUpdated,
    ProfileUpdateFailed,
    SignOutFailed { reason: String },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::ProfileUpdated => "Profile updated successfully".to_string(),
            Notice::ProfileUpdateFailed => "Could not update profile".to_string(),
            Notice::SignOutFailed { reason } => format!("Could not sign out: {reason}"),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::ProfileUpdated)
    }
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
