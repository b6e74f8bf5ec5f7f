//! Network actor - runs roster API requests in the Tokio runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{execute_command, StudentApi};

/// Network actor that processes API commands
pub struct NetworkActor {
    api: StudentApi,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(api: StudentApi, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            api,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            self.active_requests.abort_all();
                            break;
                        }
                        Some(cmd) => {
                            let response_tx = self.response_tx.clone();
                            let api = self.api.clone();

                            self.active_requests.spawn(async move {
                                if let Some(result) = execute_command(&api, cmd).await {
                                    match &result {
                                        NetworkResponse::Error { id, message, .. } => {
                                            tracing::error!(id, %message, "Request failed");
                                        }
                                        other => tracing::info!(id = other.id(), "Request completed"),
                                    }
                                    let _ = response_tx.send(result);
                                }
                            });
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
