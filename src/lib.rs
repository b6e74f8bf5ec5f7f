//! # Roster TUI
//!
//! A terminal client for a student roster served over a REST API.
//!
//! ## Features
//! - Table of all students, refetched after every change
//! - One form for both creating and editing a record
//! - Delete with confirmation
//! - At most one request in flight
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod config;
pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use config::Config;
pub use models::{Student, StudentPayload, Mutation, HttpMethod};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor, FormMode, StudentForm};
pub use network::{NetworkActor, StudentApi};
