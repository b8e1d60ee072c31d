use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::ServiceError;
use util::paging::{PageInfo, PageRequest};
use validator::ValidationErrors;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// This struct enforces a consistent response structure across all endpoints:
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Some message"
/// }
/// ```
///
/// - `T` is the type of the `data` payload.
/// - `success` is a boolean indicating operation status.
/// - `message` provides a human-readable context string.
///
/// ## Example (success):
/// ```json
/// {
///   "success": true,
///   "data": { "id": 1, "subject": "Pricing question" },
///   "message": "Support ticket created successfully"
/// }
/// ```
///
/// ## Example (error):
/// ```json
/// {
///   "success": false,
///   "message": "Ticket not found"
/// }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    /// Constructs an error response. Error envelopes carry no `data` key.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
        }
    }
}

/// Success envelope for list endpoints.
///
/// ```json
/// {
///   "success": true,
///   "data": [ ... ],
///   "message": "Support tickets retrieved successfully",
///   "pagination": { "page": 1, "limit": 20, "total": 41, "pages": 3 }
/// }
/// ```
#[derive(Serialize)]
pub struct PaginatedResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: Vec<T>,
    pub message: String,
    pub pagination: PageInfo,
}

impl<T> PaginatedResponse<T>
where
    T: Serialize,
{
    pub fn new(data: Vec<T>, page: PageRequest, total: u64, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
            pagination: PageInfo::new(page, total),
        }
    }
}

/// HTTP status for a service failure.
pub fn status_of(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        ServiceError::Database(_) | ServiceError::Storage(_) | ServiceError::Serialization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Converts a service failure into the error envelope.
///
/// Internal failures are logged in full and reported to the client with the
/// `fallback` message only.
pub fn service_error(err: ServiceError, fallback: &str) -> Response {
    let status = status_of(&err);
    let message = if err.is_internal() {
        tracing::error!(error = %err, "{fallback}");
        fallback.to_string()
    } else {
        err.to_string()
    };

    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

/// Shorthand for a `400 Bad Request` error envelope.
pub fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::<()>::error(message))).into_response()
}

/// Flattens `validator` errors into one message, fields joined by `; `.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"));
                (field.to_string(), message)
            })
        })
        .collect();
    messages.sort();
    messages
        .into_iter()
        .map(|(_, message)| message)
        .collect::<Vec<_>>()
        .join("; ")
}
