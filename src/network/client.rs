//! HTTP client wrapper - executes roster API calls and maps the outcome

use std::time::Instant;
use thiserror::Error;

use crate::config::Config;
use crate::constants::STUDENTS_PATH;
use crate::messages::network::FailureKind;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{HttpMethod, Mutation, Student, StudentPayload};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timed out ({0}s)")]
    Timeout(u64),
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Server returned HTTP {status} {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Timeout(_) | ApiError::Connect(_) | ApiError::Transport(_) => {
                FailureKind::Transport
            }
            ApiError::Status { status, .. } => FailureKind::Status(*status),
            ApiError::Decode(_) => FailureKind::Decode,
        }
    }
}

/// Client for the `/students` collection under `<origin>/api`
#[derive(Clone, Debug)]
pub struct StudentApi {
    client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl StudentApi {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        StudentApi {
            client,
            base_url: config.api_base(),
            timeout_secs: config.timeout_secs,
        }
    }

    /// `<base>/students`
    pub fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, STUDENTS_PATH)
    }

    /// `<base>/students/{id}`
    pub fn item_url(&self, id: u64) -> String {
        format!("{}{}/{}", self.base_url, STUDENTS_PATH, id)
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            ApiError::Connect(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }

    /// Send and reject non-2xx answers
    async fn send(
        &self,
        method: HttpMethod,
        url: String,
        payload: Option<&StudentPayload>,
    ) -> Result<reqwest::Response, ApiError> {
        tracing::info!(method = method.as_str(), url = %url, "Sending request");

        let mut req_builder = match method {
            HttpMethod::GET => self.client.get(&url),
            HttpMethod::POST => self.client.post(&url),
            HttpMethod::PUT => self.client.put(&url),
            HttpMethod::DELETE => self.client.delete(&url),
        };
        if let Some(payload) = payload.filter(|_| method.has_body()) {
            req_builder = req_builder.json(payload);
        }

        let resp = req_builder.send().await.map_err(|e| self.map_send_error(e))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }
        Ok(resp)
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        let resp = self.send(HttpMethod::GET, self.collection_url(), None).await?;
        let body = resp.text().await.map_err(|e| self.map_send_error(e))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// POST, returns the response status
    pub async fn create_student(&self, payload: &StudentPayload) -> Result<u16, ApiError> {
        let resp = self
            .send(HttpMethod::POST, self.collection_url(), Some(payload))
            .await?;
        Ok(resp.status().as_u16())
    }

    pub async fn update_student(&self, id: u64, payload: &StudentPayload) -> Result<u16, ApiError> {
        let resp = self
            .send(HttpMethod::PUT, self.item_url(id), Some(payload))
            .await?;
        Ok(resp.status().as_u16())
    }

    pub async fn delete_student(&self, id: u64) -> Result<u16, ApiError> {
        let resp = self.send(HttpMethod::DELETE, self.item_url(id), None).await?;
        Ok(resp.status().as_u16())
    }
}

/// Execute one command and produce the response for the App layer.
/// Returns None for commands that are not requests.
pub async fn execute_command(api: &StudentApi, cmd: NetworkCommand) -> Option<NetworkResponse> {
    let start = Instant::now();

    let (id, outcome) = match cmd {
        NetworkCommand::FetchStudents { id } => {
            let result = api.list_students().await;
            let time_ms = start.elapsed().as_millis() as u64;
            return Some(match result {
                Ok(students) => NetworkResponse::StudentsLoaded { id, students, time_ms },
                Err(e) => error_response(id, e, time_ms),
            });
        }
        NetworkCommand::CreateStudent { id, payload } => (
            id,
            api.create_student(&payload).await.map(|s| (Mutation::Create, s)),
        ),
        NetworkCommand::UpdateStudent { id, student_id, payload } => (
            id,
            api.update_student(student_id, &payload)
                .await
                .map(|s| (Mutation::Update(student_id), s)),
        ),
        NetworkCommand::DeleteStudent { id, student_id } => (
            id,
            api.delete_student(student_id)
                .await
                .map(|s| (Mutation::Delete(student_id), s)),
        ),
        NetworkCommand::Shutdown => return None,
    };

    let time_ms = start.elapsed().as_millis() as u64;
    Some(match outcome {
        Ok((mutation, status)) => NetworkResponse::MutationApplied { id, mutation, status, time_ms },
        Err(e) => error_response(id, e, time_ms),
    })
}

fn error_response(id: u64, e: ApiError, time_ms: u64) -> NetworkResponse {
    NetworkResponse::Error {
        id,
        kind: e.kind(),
        message: e.to_string(),
        time_ms,
    }
}
