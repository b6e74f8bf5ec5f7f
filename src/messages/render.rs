//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Local};

use crate::app::form::StudentForm;
use crate::app::state::PendingOp;
use crate::messages::ui_events::{Focus, Overlay};
use crate::models::Student;

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Table
    pub students: Vec<Student>,
    pub selected_row: usize,
    pub last_refreshed: Option<DateTime<Local>>,

    // Form
    pub form: StudentForm,
    pub focus: Focus,

    // Request in flight
    pub pending: Option<PendingOp>,

    // Popups
    pub overlay: Option<Overlay>,
    pub alert: Option<String>,
    pub confirm_delete: Option<u64>,

    pub status_note: Option<String>,
}
