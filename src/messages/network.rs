//! Network messages - communication between App and Network layers

use crate::models::{Mutation, Student, StudentPayload};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// GET the full collection
    FetchStudents { id: u64 },
    /// POST a new record
    CreateStudent { id: u64, payload: StudentPayload },
    /// PUT a full payload to an existing record
    UpdateStudent {
        id: u64,
        student_id: u64,
        payload: StudentPayload,
    },
    /// DELETE a record
    DeleteStudent { id: u64, student_id: u64 },
    /// Shutdown the network actor
    Shutdown,
}

/// Why a request did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never produced a response (connect error, timeout)
    Transport,
    /// The server answered with a non-2xx status
    Status(u16),
    /// The response body was not what we expected
    Decode,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// The collection was fetched and decoded
    StudentsLoaded {
        id: u64,
        students: Vec<Student>,
        time_ms: u64,
    },
    /// A create/update/delete got a 2xx answer
    MutationApplied {
        id: u64,
        mutation: Mutation,
        status: u16,
        time_ms: u64,
    },
    /// Any request failed
    Error {
        id: u64,
        kind: FailureKind,
        message: String,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::StudentsLoaded { id, .. } => *id,
            NetworkResponse::MutationApplied { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
        }
    }
}
