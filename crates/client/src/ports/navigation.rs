//! Navigation port.

use userdesk_domain::Screen;

/// The host application's navigation stack.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Show `screen` and drop the current one from history, so back
    /// navigation cannot return to it.
    fn replace_screen(&self, screen: Screen);

    /// Push `screen` on top of the current one.
    fn navigate_to(&self, screen: Screen);
}
