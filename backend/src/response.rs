//! Structured response envelope
//!
//! Every endpoint answers with `{success, data | error, request_id}`.
//! Success bodies carry the request id assigned by the middleware; error
//! bodies are built at the `IntoResponse` boundary where no request context
//! is available, so their `request_id` is null.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::middleware::RequestId;

/// Successful response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub request_id: Option<Uuid>,
}

/// Error response envelope
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
    pub request_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Value,
}

impl ApiErrorResponse {
    pub fn new(code: &str, message: String, details: Value) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
            request_id: None,
        }
    }
}

/// 200 envelope
pub fn ok<T: Serialize>(request_id: RequestId, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data,
        request_id: Some(request_id.0),
    })
}

/// 201 envelope
pub fn created<T: Serialize>(
    request_id: RequestId,
    data: T,
) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, ok(request_id, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let id = Uuid::new_v4();
        let Json(body) = ok(RequestId(id), 42);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], 42);
        assert_eq!(value["request_id"], id.to_string());
    }

    #[test]
    fn error_envelope_shape() {
        let body = ApiErrorResponse::new(
            "MATERIAL_NOT_FOUND",
            "Material 9 not found".into(),
            serde_json::json!({}),
        );
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "MATERIAL_NOT_FOUND");
        assert!(value["request_id"].is_null());
    }
}
