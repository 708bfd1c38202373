use std::time::Duration;

use thiserror::Error;

use crate::validation::ValidationOutcome;

/// Failure of a remote user query.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    /// The request never reached the server.
    #[error("Client connectivity error: {message}")]
    ClientConnectivity { message: String },
    /// The server answered with a failure status.
    #[error("Server rejection ({status}): {message}")]
    ServerRejection { status: u16, message: String },
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
    #[error("Query timed out after {0:?}")]
    Timeout(Duration),
}

impl QueryError {
    /// Text shown to the operator for this error.
    pub fn status_message(&self) -> String {
        match self {
            QueryError::ClientConnectivity { message } => {
                format!("Problem in the client – Error: {message}")
            }
            QueryError::ServerRejection { status, message } => {
                format!("Problem contacting the server – Error Code: {status}\nMessage: {message}")
            }
            QueryError::MalformedPayload(message) => {
                format!("Problem in the client – Error: could not read the server response ({message})")
            }
            QueryError::Timeout(after) => {
                format!("Problem in the client – Error: no response from the server after {after:?}")
            }
        }
    }

    pub fn is_client_side(&self) -> bool {
        !matches!(self, QueryError::ServerRejection { .. })
    }
}

/// Failure reported by a write collaborator.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WriteError {
    #[error("Write rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Client connectivity error: {0}")]
    Connectivity(String),
}

/// Failure of a user submission.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmitError {
    #[error("User validation error")]
    Validation(ValidationOutcome),
    #[error("Server rejection ({status}): {message}")]
    ServerRejection { status: u16, message: String },
    #[error("Client connectivity error: {0}")]
    ClientConnectivity(String),
}

impl From<WriteError> for SubmitError {
    fn from(value: WriteError) -> Self {
        match value {
            WriteError::Rejected { status, message } => SubmitError::ServerRejection { status, message },
            WriteError::Connectivity(message) => SubmitError::ClientConnectivity(message),
        }
    }
}

impl SubmitError {
    pub fn status_message(&self) -> String {
        match self {
            SubmitError::Validation(outcome) => outcome
                .schema_error()
                .map(str::to_owned)
                .unwrap_or_else(|| "Please correct the highlighted fields".to_owned()),
            SubmitError::ServerRejection { status, message } => {
                format!("Problem contacting the server – Error Code: {status}\nMessage: {message}")
            }
            SubmitError::ClientConnectivity(message) => {
                format!("Problem in the client – Error: {message}")
            }
        }
    }
}

/// Errors raised by the in-memory user store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("The requested user was not found")]
    NotFound(String),
    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        details: Vec<String>,
    },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<StoreError> for QueryError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => QueryError::ServerRejection {
                status: 404,
                message: format!("The requested user was not found: {id}"),
            },
            StoreError::Rejected { status, message, .. } => QueryError::ServerRejection { status, message },
            StoreError::ActorCommunicationError(message) => QueryError::ClientConnectivity { message },
        }
    }
}

impl From<StoreError> for WriteError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => WriteError::Rejected {
                status: 404,
                message: format!("The requested user was not found: {id}"),
            },
            StoreError::Rejected { status, message, .. } => WriteError::Rejected { status, message },
            StoreError::ActorCommunicationError(message) => WriteError::Connectivity(message),
        }
    }
}

/// Errors talking to the filter service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PipelineError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
