//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::EmissionsError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(self),
        )
            .into_response()
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: EmissionsError) -> Problem {
    match error {
        EmissionsError::NotFound { resource, id } => Problem::new(
            StatusCode::NOT_FOUND,
            format!("{} Not Found", resource),
        )
        .with_detail(format!("{} with id '{}' was not found", resource, id)),

        EmissionsError::Conflict { reason } => {
            Problem::new(StatusCode::CONFLICT, "Conflict").with_detail(reason)
        }

        EmissionsError::Validation { message } => Problem::new(
            StatusCode::BAD_REQUEST,
            "Validation Error",
        )
        .with_detail(message),

        EmissionsError::Upstream { message } => {
            tracing::error!("LCA provider failure: {}", message);
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                .with_detail("The emission factor provider could not be reached")
        }

        EmissionsError::Internal => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        )
        .with_detail("An unexpected error occurred"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (EmissionsError::not_found("garment_type", 7), StatusCode::NOT_FOUND),
            (EmissionsError::validation("bad"), StatusCode::BAD_REQUEST),
            (
                EmissionsError::Conflict {
                    reason: "dup".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                EmissionsError::Upstream {
                    message: "timeout".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (EmissionsError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(map_domain_error(error).status, status.as_u16());
        }
    }

    #[test]
    fn test_not_found_detail_names_the_id() {
        let problem = map_domain_error(EmissionsError::not_found("garment_type", 42));
        assert_eq!(problem.title, "garment_type Not Found");
        assert_eq!(
            problem.detail.as_deref(),
            Some("garment_type with id '42' was not found")
        );
    }
}
