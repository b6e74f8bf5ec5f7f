//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Initial load
        let initial = self.state.refresh();
        self.send(initial);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    let follow_up = self.state.handle_response(response);
                    self.send(follow_up);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send(&self, cmd: Option<NetworkCommand>) {
        if let Some(cmd) = cmd {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Focus
            UiEvent::ToggleFocus => self.state.toggle_focus(),
            UiEvent::NewStudent => self.state.new_student(),

            // Table
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::EditSelected => self.state.edit_selected(),
            UiEvent::DeleteSelected => self.state.request_delete(),
            UiEvent::Refresh => {
                let cmd = self.state.refresh();
                self.send(cmd);
            }

            // Form editing
            UiEvent::NextField => self.state.form.next_field(),
            UiEvent::PrevField => self.state.form.prev_field(),
            UiEvent::CharInput(c) => self.state.form.enter_char(c),
            UiEvent::Backspace => self.state.form.delete_char(),
            UiEvent::CursorLeft => self.state.form.move_cursor_left(),
            UiEvent::CursorRight => self.state.form.move_cursor_right(),
            UiEvent::Submit => {
                let cmd = self.state.submit();
                self.send(cmd);
            }
            UiEvent::CancelForm => self.state.cancel_form(),

            // Popups
            UiEvent::ConfirmYes => {
                let cmd = self.state.confirm_delete();
                self.send(cmd);
            }
            UiEvent::ConfirmNo => self.state.decline_delete(),
            UiEvent::DismissAlert => self.state.dismiss_alert(),
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Mutation, Student};

    /// Drives the actor with scripted responses and records the commands it sends
    #[tokio::test]
    async fn test_create_flow_sends_post_then_get() {
        let (net_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(AppActor::new(net_tx, render_tx).run(ui_rx, net_resp_rx));

        // Initial fetch
        let Some(NetworkCommand::FetchStudents { id }) = net_cmd_rx.recv().await else {
            panic!("expected initial fetch")
        };
        net_resp_tx
            .send(NetworkResponse::StudentsLoaded {
                id,
                students: vec![Student { id: 1, name: "Bob".into(), age: 15, grade: "9".into() }],
                time_ms: 1,
            })
            .unwrap();
        while let Some(state) = render_rx.recv().await {
            if state.pending.is_none() && !state.students.is_empty() {
                break;
            }
        }

        for c in "Cara".chars() {
            ui_tx.send(UiEvent::CharInput(c)).unwrap();
        }
        ui_tx.send(UiEvent::NextField).unwrap();
        for c in "16".chars() {
            ui_tx.send(UiEvent::CharInput(c)).unwrap();
        }
        ui_tx.send(UiEvent::NextField).unwrap();
        for c in "10".chars() {
            ui_tx.send(UiEvent::CharInput(c)).unwrap();
        }
        ui_tx.send(UiEvent::Submit).unwrap();

        let Some(NetworkCommand::CreateStudent { id, payload }) = net_cmd_rx.recv().await else {
            panic!("expected create")
        };
        assert_eq!(payload.name, "Cara");
        assert_eq!(payload.age, 16);
        assert_eq!(payload.grade, "10");

        net_resp_tx
            .send(NetworkResponse::MutationApplied {
                id,
                mutation: Mutation::Create,
                status: 201,
                time_ms: 1,
            })
            .unwrap();
        assert!(matches!(
            net_cmd_rx.recv().await,
            Some(NetworkCommand::FetchStudents { .. })
        ));

        ui_tx.send(UiEvent::Quit).unwrap();
        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::Shutdown)));
        handle.await.unwrap();

        let mut last = None;
        while let Ok(state) = render_rx.try_recv() {
            last = Some(state);
        }
        assert!(last.unwrap().form.is_empty());
    }
}
