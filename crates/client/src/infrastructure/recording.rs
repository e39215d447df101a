//! Navigator and notifier adapters that record what they were asked to do.
//!
//! Used by headless hosts and tests; a real UI shell supplies its own.

use std::sync::{Mutex, PoisonError};

use userdesk_domain::Screen;

use crate::ports::{Navigator, Notice, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Replace(Screen),
    Push(Screen),
}

#[derive(Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Navigation>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Navigation> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The screen the last navigation landed on.
    pub fn current(&self) -> Option<Screen> {
        self.history().last().map(|navigation| match navigation {
            Navigation::Replace(screen) | Navigation::Push(screen) => *screen,
        })
    }

    fn record(&self, navigation: Navigation) {
        tracing::debug!(?navigation, "Navigation");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(navigation);
    }
}

impl Navigator for RecordingNavigator {
    fn replace_screen(&self, screen: Screen) {
        self.record(Navigation::Replace(screen));
    }

    fn navigate_to(&self, screen: Screen) {
        self.record(Navigation::Push(screen));
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            tracing::warn!(message = %notice.message(), "Notice");
        } else {
            tracing::info!(message = %notice.message(), "Notice");
        }
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}
