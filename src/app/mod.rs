//! App layer - central state management and command processing
//!
//! The App actor receives UI events and network responses,
//! updates state, and emits network commands and render state.

pub mod state;
pub mod form;
pub mod actor;
pub mod commands;

pub use state::AppState;
pub use form::{FormMode, StudentForm};
pub use actor::AppActor;
