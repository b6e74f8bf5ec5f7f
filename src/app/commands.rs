//! Command handlers - business logic for processing UI events
//!
//! Every handler that talks to the server returns the command to send instead
//! of sending it, so the whole state machine can be driven without I/O.

use chrono::Local;

use crate::app::form::FormMode;
use crate::app::state::{PendingOp, PendingRequest};
use crate::app::AppState;
use crate::constants::{MSG_FILL_ALL_FIELDS, MSG_LOAD_FAILED};
use crate::messages::network::FailureKind;
use crate::messages::ui_events::Focus;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::Mutation;

const BUSY_NOTE: &str = "Busy: wait for the current request to finish";

impl AppState {
    // ========================
    // Table navigation
    // ========================

    pub fn select_prev(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected_row + 1 < self.students.len() {
            self.selected_row += 1;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Table => Focus::Form,
            Focus::Form => Focus::Table,
        };
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    fn show_alert(&mut self, headline: &str, detail: impl std::fmt::Display) {
        self.alert = Some(format!("{}\n\n{}", headline, detail));
    }

    /// Refuse an action while a request is in flight
    fn refuse_if_busy(&mut self) -> bool {
        if self.is_busy() {
            self.status_note = Some(BUSY_NOTE.to_string());
            true
        } else {
            false
        }
    }

    fn start(&mut self, op: PendingOp) -> u64 {
        let id = self.next_id();
        self.pending = Some(PendingRequest { id, op });
        self.status_note = None;
        id
    }

    // ========================
    // List
    // ========================

    pub fn refresh(&mut self) -> Option<NetworkCommand> {
        if self.refuse_if_busy() {
            return None;
        }
        let id = self.start(PendingOp::Fetch);
        Some(NetworkCommand::FetchStudents { id })
    }

    // ========================
    // Form
    // ========================

    /// Load the selected row into the form and bind its id
    pub fn edit_selected(&mut self) {
        if self.refuse_if_busy() {
            return;
        }
        if let Some(student) = self.students.get(self.selected_row).cloned() {
            tracing::debug!(id = student.id, "Editing student");
            self.form.load(&student);
            self.focus = Focus::Form;
        }
    }

    /// Clear the form and start typing a new record
    pub fn new_student(&mut self) {
        if self.refuse_if_busy() {
            return;
        }
        self.form.clear();
        self.focus = Focus::Form;
    }

    /// Drop the edit target without contacting the server
    pub fn cancel_form(&mut self) {
        if self.refuse_if_busy() {
            return;
        }
        self.form.clear();
        self.focus = Focus::Table;
    }

    pub fn submit(&mut self) -> Option<NetworkCommand> {
        if self.refuse_if_busy() {
            return None;
        }

        let payload = match self.form.validate() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected submit");
                self.show_alert(MSG_FILL_ALL_FIELDS, e);
                return None;
            }
        };

        match self.form.mode {
            FormMode::Create => {
                let id = self.start(PendingOp::Mutate(Mutation::Create));
                Some(NetworkCommand::CreateStudent { id, payload })
            }
            FormMode::Editing(student_id) => {
                let id = self.start(PendingOp::Mutate(Mutation::Update(student_id)));
                Some(NetworkCommand::UpdateStudent { id, student_id, payload })
            }
        }
    }

    // ========================
    // Delete
    // ========================

    /// Ask for confirmation before deleting the selected row
    pub fn request_delete(&mut self) {
        if self.refuse_if_busy() {
            return;
        }
        if let Some(student) = self.selected_student() {
            self.confirm_delete = Some(student.id);
        }
    }

    pub fn decline_delete(&mut self) {
        self.confirm_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Option<NetworkCommand> {
        let student_id = self.confirm_delete.take()?;
        if self.refuse_if_busy() {
            return None;
        }
        let id = self.start(PendingOp::Mutate(Mutation::Delete(student_id)));
        Some(NetworkCommand::DeleteStudent { id, student_id })
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a network response; returns a follow-up command (the refetch) if any
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        let pending = match self.pending {
            Some(p) if p.id == response.id() => p,
            _ => {
                tracing::debug!(id = response.id(), "Ignoring stale response");
                return None;
            }
        };
        self.pending = None;

        match response {
            NetworkResponse::StudentsLoaded { students, time_ms, .. } => {
                tracing::info!(count = students.len(), time_ms, "Students loaded");
                self.students = students;
                if self.selected_row >= self.students.len() {
                    self.selected_row = self.students.len().saturating_sub(1);
                }
                self.last_refreshed = Some(Local::now());
                None
            }
            NetworkResponse::MutationApplied { mutation, status, time_ms, .. } => {
                tracing::info!(?mutation, status, time_ms, "Mutation applied");
                self.form.clear();
                self.focus = Focus::Table;
                self.refresh()
            }
            NetworkResponse::Error { kind, message, .. } => match pending.op {
                PendingOp::Fetch => {
                    tracing::error!(?kind, %message, "Error fetching students");
                    self.show_alert(MSG_LOAD_FAILED, message);
                    None
                }
                PendingOp::Mutate(mutation) => {
                    tracing::error!(?mutation, ?kind, %message, "Mutation failed");
                    self.show_alert(mutation.failure_message(), message);
                    match kind {
                        // The server answered, so its state may have moved on
                        FailureKind::Status(_) => self.refresh(),
                        FailureKind::Transport | FailureKind::Decode => None,
                    }
                }
            },
        }
    }
}
