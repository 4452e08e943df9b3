//! Error types for the Mayday library.
//!
//! All fallible operations in the crate return [`Result`], whose error type
//! is the [`MaydayError`] enum. Dashboard handlers rely on the
//! [`IntoResponse`] implementation to turn errors into JSON responses.

use std::io;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// The main error type for Mayday operations.
#[derive(Error, Debug)]
pub enum MaydayError {
    /// I/O errors (file operations, sockets, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Text analysis errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Errors loading or validating the message table
    #[error("Data error: {0}")]
    Data(String),

    /// Training and prediction errors
    #[error("Model error: {0}")]
    Model(String),

    /// Errors reading or writing the persisted model artifact
    #[error("Artifact error: {0}")]
    Artifact(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Binary serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with MaydayError.
pub type Result<T> = std::result::Result<T, MaydayError>;

impl MaydayError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        MaydayError::Analysis(msg.into())
    }

    /// Create a new data error.
    pub fn data<S: Into<String>>(msg: S) -> Self {
        MaydayError::Data(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        MaydayError::Model(msg.into())
    }

    /// Create a new artifact error.
    pub fn artifact<S: Into<String>>(msg: S) -> Self {
        MaydayError::Artifact(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        MaydayError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        MaydayError::Other(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            MaydayError::Analysis(_) | MaydayError::Other(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for MaydayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        tracing::error!(status_code = status.as_u16(), message = %message, "Request error");

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = MaydayError::analysis("bad token stream");
        assert_eq!(error.to_string(), "Analysis error: bad token stream");

        let error = MaydayError::data("missing genre column");
        assert_eq!(error.to_string(), "Data error: missing genre column");

        let error = MaydayError::invalid_argument("shape mismatch");
        assert_eq!(error.to_string(), "Error: Invalid argument: shape mismatch");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = MaydayError::from(io_error);

        match error {
            MaydayError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            MaydayError::analysis("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            MaydayError::model("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
