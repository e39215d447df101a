//! Form state holder.
//!
//! One `FormState` backs one screen. Every mutation publishes a fresh
//! immutable `FormSnapshot` on a `tokio::sync::watch` channel; the host UI
//! subscribes and re-renders from the latest snapshot.

use tokio::sync::watch;
use userdesk_domain::{FormField, ValidationErrors};

/// What the form is busy with, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Hydrating from the backend.
    Loading,
    /// Validating and sending a submission.
    Submitting,
}

/// Everything the UI needs to render a form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot<T, F: Ord> {
    pub values: T,
    pub errors: ValidationErrors<F>,
    pub phase: Phase,
    /// Message not tied to a field (e.g. a rejected registration).
    pub general_error: Option<String>,
}

impl<T, F: Ord> FormSnapshot<T, F> {
    /// Whether the loading indicator should be shown (and submit disabled).
    pub fn is_loading(&self) -> bool {
        self.phase != Phase::Idle
    }
}

pub struct FormState<T, F: Ord> {
    tx: watch::Sender<FormSnapshot<T, F>>,
}

impl<T, F> FormState<T, F>
where
    T: Clone + Default,
    F: FormField,
{
    pub fn new() -> Self {
        Self::with_values(T::default())
    }

    pub fn with_values(values: T) -> Self {
        let (tx, _rx) = watch::channel(FormSnapshot {
            values,
            errors: ValidationErrors::new(),
            phase: Phase::Idle,
            general_error: None,
        });
        Self { tx }
    }

    pub fn snapshot(&self) -> FormSnapshot<T, F> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot<T, F>> {
        self.tx.subscribe()
    }

    pub fn values(&self) -> T {
        self.tx.borrow().values.clone()
    }

    pub fn phase(&self) -> Phase {
        self.tx.borrow().phase
    }

    pub fn is_loading(&self) -> bool {
        self.tx.borrow().is_loading()
    }

    /// Apply a user edit. Edits are accepted in every phase.
    pub fn edit(&self, apply: impl FnOnce(&mut T)) {
        self.tx.send_modify(|snapshot| apply(&mut snapshot.values));
    }

    pub fn replace_values(&self, values: T) {
        self.tx.send_modify(|snapshot| snapshot.values = values);
    }

    pub fn set_errors(&self, errors: ValidationErrors<F>) {
        self.tx.send_modify(|snapshot| snapshot.errors = errors);
    }

    pub fn set_general_error(&self, message: Option<String>) {
        self.tx.send_modify(|snapshot| snapshot.general_error = message);
    }

    /// Values back to defaults, errors cleared.
    pub fn reset(&self) {
        self.tx.send_modify(|snapshot| {
            snapshot.values = T::default();
            snapshot.errors = ValidationErrors::new();
            snapshot.general_error = None;
        });
    }

    /// Enter `phase` if the form is idle.
    ///
    /// Returns the values as they were at that instant, or `None` when the
    /// form is already busy (the caller must then do nothing).
    pub fn begin(&self, phase: Phase) -> Option<T> {
        let mut captured = None;
        self.tx.send_if_modified(|snapshot| {
            if snapshot.phase != Phase::Idle {
                return false;
            }
            snapshot.phase = phase;
            captured = Some(snapshot.values.clone());
            true
        });
        captured
    }

    /// Return to `Idle`.
    pub fn finish(&self) {
        self.tx.send_if_modified(|snapshot| {
            let was_busy = snapshot.phase != Phase::Idle;
            snapshot.phase = Phase::Idle;
            was_busy
        });
    }
}

impl<T, F> Default for FormState<T, F>
where
    T: Clone + Default,
    F: FormField,
{
    fn default() -> Self {
        Self::new()
    }
}
