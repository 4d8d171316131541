//! Success envelope shared by every handler.
//!
//! All responses carry `success`; payloads go in `data`, list endpoints add
//! `count`, and mutations may add a human-readable `message`. Errors use the
//! same shape with `error` and `code` instead (see [`crate::error`]).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

/// A success envelope plus the status code to send it with.
///
/// ```ignore
/// Ok(ApiResponse::created(vehicle).with_message("Vehicle created successfully."))
/// ```
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    status: StatusCode,
    body: Envelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    fn new(status: StatusCode, data: Option<T>) -> Self {
        Self {
            status,
            body: Envelope {
                success: true,
                data,
                message: None,
                count: None,
            },
        }
    }

    /// 200 OK with `data`.
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, Some(data))
    }

    /// 201 Created with `data`.
    pub fn created(data: T) -> Self {
        Self::new(StatusCode::CREATED, Some(data))
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body.message = Some(message.into());
        self
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// 200 OK with `data` and `count`.
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        let mut response = Self::ok(items);
        response.body.count = Some(count);
        response
    }
}

impl ApiResponse<()> {
    /// 200 OK carrying only a message (deletes).
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, None).with_message(message)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
