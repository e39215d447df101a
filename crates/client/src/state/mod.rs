//! Per-screen state containers observed by the host UI.

mod form_state;

pub use form_state::{FormSnapshot, FormState, Phase};
