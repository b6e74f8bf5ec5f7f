use chrono::{DateTime, Local};
use ratatui::{prelude::*, widgets::*};

use crate::app::form::{FormField, FormMode, StudentForm};
use crate::app::state::PendingOp;
use crate::models::{HttpMethod, Student};

/// Per-row controls, each tagged with the record id
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    Edit(u64),
    Delete(u64),
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Edit(_) => "[e]dit",
            RowAction::Delete(_) => "[d]elete",
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            RowAction::Edit(id) | RowAction::Delete(id) => *id,
        }
    }
}

pub fn row_actions(student: &Student) -> [RowAction; 2] {
    [RowAction::Edit(student.id), RowAction::Delete(student.id)]
}

/// One table row: id, name, age, grade, actions
pub fn student_row(student: &Student) -> Row<'static> {
    let mut cells: Vec<Cell> = student.cells().into_iter().map(Cell::from).collect();
    let actions: Vec<Span> = row_actions(student)
        .iter()
        .map(|a| Span::styled(format!("{} ", a.label()), action_color(a)))
        .collect();
    cells.push(Cell::from(Line::from(actions)));
    Row::new(cells)
}

fn action_color(action: &RowAction) -> Style {
    match action {
        RowAction::Edit(_) => Style::default().fg(Color::Blue),
        RowAction::Delete(_) => Style::default().fg(Color::Red),
    }
}

/// Form block title, naming the mode
pub fn form_title(mode: &FormMode) -> String {
    match mode {
        FormMode::Create => String::from(" New student "),
        FormMode::Editing(id) => format!(" Edit student #{} ", id),
    }
}

/// One form line, `Label: value`, highlighted when focused
pub fn form_line(form: &StudentForm, field: FormField, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(format!("{:>6}: ", field.label()), label_style),
        Span::raw(form.field(field).to_string()),
    ])
}

/// Status-bar color for the pending request
pub fn pending_color(op: &PendingOp) -> Color {
    match op {
        PendingOp::Fetch => method_color(&HttpMethod::GET),
        PendingOp::Mutate(m) => method_color(&m.method()),
    }
}

/// Method color
pub fn method_color(method: &HttpMethod) -> Color {
    match method {
        HttpMethod::GET => Color::Green,
        HttpMethod::POST => Color::Yellow,
        HttpMethod::PUT => Color::Blue,
        HttpMethod::DELETE => Color::Red,
    }
}

/// Idle status-bar tail: record count and last refresh time
pub fn status_summary(count: usize, last_refreshed: Option<DateTime<Local>>) -> String {
    let noun = if count == 1 { "student" } else { "students" };
    match last_refreshed {
        Some(t) => format!("| {} {} | refreshed {} ", count, noun, t.format("%H:%M:%S")),
        None => format!("| {} {} ", count, noun),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mutation;

    #[test]
    fn test_row_actions_are_tagged_with_id() {
        let bob = Student { id: 1, name: "Bob".into(), age: 15, grade: "9".into() };
        let actions = row_actions(&bob);
        assert_eq!(actions, [RowAction::Edit(1), RowAction::Delete(1)]);
        assert!(actions.iter().all(|a| a.id() == 1));
    }

    #[test]
    fn test_status_summary_counts_records() {
        assert_eq!(status_summary(1, None), "| 1 student ");
        assert_eq!(status_summary(3, None), "| 3 students ");
        let at = Local::now();
        let summary = status_summary(0, Some(at));
        assert!(summary.starts_with("| 0 students | refreshed "));
    }

    #[test]
    fn test_pending_color_follows_method() {
        assert_eq!(pending_color(&PendingOp::Fetch), Color::Green);
        assert_eq!(pending_color(&PendingOp::Mutate(Mutation::Delete(1))), Color::Red);
    }

    #[test]
    fn test_form_title_names_mode() {
        assert_eq!(form_title(&FormMode::Create), " New student ");
        assert_eq!(form_title(&FormMode::Editing(42)), " Edit student #42 ");
    }

    #[test]
    fn test_form_line_shows_value() {
        let form = StudentForm { name: "Alice".into(), ..StudentForm::default() };
        let line = form_line(&form, FormField::Name, true);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "  Name: Alice");
    }
}
