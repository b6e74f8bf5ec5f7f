//! App state - pure data structure with no I/O logic

use chrono::{DateTime, Local};

use crate::app::form::StudentForm;
use crate::messages::ui_events::{Focus, Overlay};
use crate::messages::RenderState;
use crate::models::{Mutation, Student};

/// What the single in-flight request is doing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingOp {
    Fetch,
    Mutate(Mutation),
}

impl PendingOp {
    pub fn label(&self) -> &'static str {
        match self {
            PendingOp::Fetch => "Loading students...",
            PendingOp::Mutate(Mutation::Delete(_)) => "Deleting...",
            PendingOp::Mutate(_) => "Saving...",
        }
    }
}

/// The request the app is waiting on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: u64,
    pub op: PendingOp,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Server data, as last fetched
    pub students: Vec<Student>,
    pub selected_row: usize,
    pub last_refreshed: Option<DateTime<Local>>,

    // Form
    pub form: StudentForm,
    pub focus: Focus,

    // At most one request in flight
    pub next_request_id: u64,
    pub pending: Option<PendingRequest>,

    // Popups
    pub alert: Option<String>,
    pub confirm_delete: Option<u64>,
    pub show_help: bool,

    // One-line note in the status bar
    pub status_note: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            students: Vec::new(),
            selected_row: 0,
            last_refreshed: None,
            form: StudentForm::default(),
            focus: Focus::Table,
            next_request_id: 1,
            pending: None,
            alert: None,
            confirm_delete: None,
            show_help: false,
            status_note: None,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn selected_student(&self) -> Option<&Student> {
        self.students.get(self.selected_row)
    }

    /// Topmost popup, if any
    pub fn overlay(&self) -> Option<Overlay> {
        if self.alert.is_some() {
            Some(Overlay::Alert)
        } else if self.confirm_delete.is_some() {
            Some(Overlay::Confirm)
        } else if self.show_help {
            Some(Overlay::Help)
        } else {
            None
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            students: self.students.clone(),
            selected_row: self.selected_row,
            last_refreshed: self.last_refreshed,
            form: self.form.clone(),
            focus: self.focus,
            pending: self.pending.map(|p| p.op),
            overlay: self.overlay(),
            alert: self.alert.clone(),
            confirm_delete: self.confirm_delete,
            status_note: self.status_note.clone(),
        }
    }
}
