//! Roster TUI - Actor-based student roster client
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use roster_tui::app::form::FormField;
use roster_tui::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME, MSG_CONFIRM_DELETE};
use roster_tui::messages::ui_events::{key_to_ui_event, Focus, Overlay};
use roster_tui::ui::{form_line, form_title, pending_color, status_summary, student_row};
use roster_tui::{AppActor, Config, NetworkActor, NetworkCommand, NetworkResponse, RenderState, StudentApi, UiEvent};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Initialize logging to file
    let log_dir = Config::config_dir();
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_max_level(config.tracing_level())
        .init();
    tracing::info!(version = APP_VERSION, api = %config.api_base(), "Starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(StudentApi::new(&config), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx, &config).await?;

    tracing::info!("Exiting");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
    config: &Config,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state, config))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.focus, current_state.overlay) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }

        tokio::task::yield_now().await;
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState, config: &Config) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title
            Constraint::Min(5),     // Table
            Constraint::Length(5),  // Form
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_title(f, config, main_chunks[0]);
    draw_table(f, state, main_chunks[1]);
    draw_form(f, state, main_chunks[2]);
    draw_status_bar(f, state, main_chunks[3]);

    match state.overlay {
        Some(Overlay::Alert) => draw_alert_popup(f, state, area),
        Some(Overlay::Confirm) => draw_confirm_popup(f, state, area),
        Some(Overlay::Help) => draw_help_popup(f, area),
        None => {}
    }
}

fn draw_title(f: &mut Frame, config: &Config, area: Rect) {
    let title = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::styled(format!(" {} ", config.api_base()), Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_table(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.focus == Focus::Table;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Students ");

    if state.students.is_empty() {
        let hint = if state.pending.is_some() {
            "Loading..."
        } else {
            "No students yet. Press 'n' to add one."
        };
        let empty = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(["ID", "Name", "Age", "Grade", "Actions"])
        .style(Style::default().fg(Color::Yellow).bold());
    let rows: Vec<Row> = state.students.iter().map(student_row).collect();

    let highlight_style = if is_focused {
        Style::default().bg(Color::DarkGray).bold()
    } else {
        Style::default().bold()
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Min(12),
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Length(18),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(highlight_style);

    let mut table_state = TableState::default();
    table_state.select(Some(state.selected_row));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn draw_form(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.focus == Focus::Form;
    let border_style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(form_title(&state.form.mode))
        .title_bottom(Line::from(" Enter:save | Esc:cancel ").right_aligned());

    let fields = [FormField::Name, FormField::Age, FormField::Grade];
    let lines: Vec<Line> = fields
        .iter()
        .map(|field| form_line(&state.form, *field, is_focused && state.form.active_field == *field))
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);

    // Cursor
    if is_focused && state.overlay.is_none() {
        let row = fields.iter().position(|fl| *fl == state.form.active_field).unwrap_or(0) as u16;
        let input = state.form.field(state.form.active_field);
        let col = input[..state.form.cursor_position.min(input.len())].chars().count() as u16;
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + 1 + 8 + col).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1 + row));
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let line = if let Some(op) = &state.pending {
        Line::from(Span::styled(format!(" {} ", op.label()), Style::default().fg(pending_color(op))))
    } else if let Some(note) = &state.status_note {
        Line::from(Span::styled(format!(" {} ", note), Style::default().fg(Color::Yellow)))
    } else {
        let hints = match state.focus {
            Focus::Table => " ↑/↓:select | e:edit | d:delete | n:new | r:refresh | ?:help | q:quit ",
            Focus::Form => " Tab:next field | Enter:save | Esc:cancel | Ctrl+T:table ",
        };
        let summary = status_summary(state.students.len(), state.last_refreshed);
        Line::from(Span::styled(format!("{}{}", hints, summary), Style::default().fg(Color::DarkGray)))
    };

    f.render_widget(Paragraph::new(line), area);
}

fn draw_alert_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(60, 30, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Error (any key to close) ")
        .style(Style::default().bg(Color::Black));

    let alert = Paragraph::new(state.alert.clone().unwrap_or_default())
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(alert, popup_area);
}

fn draw_confirm_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(40, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Confirm ")
        .style(Style::default().bg(Color::Black));

    let target = state
        .confirm_delete
        .and_then(|id| state.students.iter().find(|s| s.id == id))
        .map(|s| format!("#{} {}", s.id, s.name))
        .unwrap_or_default();
    let text = format!("{}\n{}\n\n[y] Yes   [n] No", MSG_CONFIRM_DELETE, target);

    let confirm = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(confirm, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 ROSTER - Keyboard Shortcuts

 TABLE
   ↑ / ↓ (k / j)      Select row
   e / Enter          Edit selected student
   d / Delete         Delete selected student
   n                  New student
   r                  Refresh list
   Tab                Focus form

 FORM
   Tab / Shift+Tab    Next / previous field
   ← / →              Move cursor
   Enter              Save (create or update)
   Esc                Cancel and clear the form
   Ctrl+T             Back to the table, keeping the form

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
