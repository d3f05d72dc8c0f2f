use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::config::ErrorStatusPolicy;
use crate::error::{AnalyzerError, ErrorKind};

/// Failure returned by an HTTP handler, rendered as `{"detail": "..."}`
#[derive(Debug)]
pub enum ApiError {
    /// The multipart form was missing, unreadable or too large
    Upload { status: StatusCode, detail: String },

    /// Decoding or analysis of a well-formed upload failed
    Analysis {
        policy: ErrorStatusPolicy,
        error: AnalyzerError,
    },

    /// The analysis task itself could not complete
    Internal(String),
}

impl ApiError {
    pub fn upload<S: Into<String>>(status: StatusCode, detail: S) -> Self {
        Self::Upload {
            status,
            detail: detail.into(),
        }
    }

    pub fn analysis(policy: ErrorStatusPolicy, error: AnalyzerError) -> Self {
        Self::Analysis { policy, error }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Upload { status, .. } => *status,
            Self::Analysis { policy, error } => status_for(*policy, error),
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            Self::Upload { detail, .. } => detail.clone(),
            Self::Analysis { error, .. } => error.user_message(),
            Self::Internal(detail) => detail.clone(),
        }
    }
}

/// Map an analysis failure onto a status code under the configured policy
pub fn status_for(policy: ErrorStatusPolicy, error: &AnalyzerError) -> StatusCode {
    match policy {
        ErrorStatusPolicy::Flat => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorStatusPolicy::ByKind => match error.kind() {
            ErrorKind::DecodeFailure | ErrorKind::ShapeMismatch => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::InputValidation => StatusCode::BAD_REQUEST,
            ErrorKind::ComputeFailure => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({ "detail": self.detail() });
        (status, Json(body)).into_response()
    }
}
