use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use curio_core::domain::{ArtifactError, ErrorKind};
use serde::Serialize;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const BODY_TOO_LARGE_MESSAGE: &str = "Request body too large";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Route not found";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

/// Error body shared by every endpoint: `{message, error?}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    error: Option<String>,
    headers: Vec<(&'static str, String)>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error: None,
            headers: Vec::new(),
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Artifact not found")
    }
}

impl From<ArtifactError> for ApiError {
    fn from(err: ArtifactError) -> Self {
        match err.kind() {
            ErrorKind::Validation => ApiError::new(StatusCode::BAD_REQUEST, err.to_string()),
            ErrorKind::NotFound => ApiError::not_found(),
            ErrorKind::Persistence => {
                tracing::error!(error = %err, "artifact store failure");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        let status = rejection.status();
        let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
            BODY_TOO_LARGE_MESSAGE
        } else {
            INVALID_BODY_MESSAGE
        };
        ApiError::new(status, message).with_error(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = ErrorResponse {
            message: self.message,
            error: self.error,
        };
        let mut response = (self.status, Json(payload)).into_response();
        for (name, value) in self.headers {
            if let Ok(value) = HeaderValue::from_str(&value) {
                response
                    .headers_mut()
                    .insert(HeaderName::from_static(name), value);
            }
        }
        response
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use curio_core::domain::ArtifactId;
    use rstest::rstest;

    fn some_id() -> ArtifactId {
        "01ARZ3NDEKTSV4RRFFQ69G5FAV".parse().unwrap()
    }

    #[rstest]
    #[case::validation(ArtifactError::Validation("comment text required".into()), StatusCode::BAD_REQUEST)]
    #[case::not_found(ArtifactError::NotFound(some_id()), StatusCode::NOT_FOUND)]
    #[case::persistence(ArtifactError::Persistence("disk on fire".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn artifact_errors_map_to_status(#[case] err: ArtifactError, #[case] expected: StatusCode) {
        assert_eq!(ApiError::from(err).status(), expected);
    }

    #[tokio::test]
    async fn error_body_is_message_json() {
        let response = ApiError::new(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
            .with_header("allow", "GET")
            .into_response();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()["allow"], "GET");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({ "message": METHOD_NOT_ALLOWED_MESSAGE }));
    }

    #[test]
    fn persistence_detail_is_not_exposed() {
        let api = ApiError::from(ArtifactError::Persistence("secret dsn".into()));
        assert_eq!(api.message, INTERNAL_ERROR_MESSAGE);
        assert!(api.error.is_none());
    }
}
