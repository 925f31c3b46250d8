//! # API Error Types
//!
//! Every operation failure crosses the HTTP boundary as a JSON body with a
//! stable machine-readable code and a human-readable message.
//!
//! ## Shape
//! ```json
//! {
//!   "code": "INSUFFICIENT_INVENTORY",
//!   "message": "Insufficient inventory for Widget: available 5, requested 6"
//! }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use storefront_core::CoreError;

// =============================================================================
// Error Codes
// =============================================================================

/// Machine-readable error codes for API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidQuantity,
    CartNotFound,
    ProductNotFound,
    ItemNotInCart,
    CartAlreadyCompleted,
    InsufficientInventory,
    DanglingCartItem,
    ValidationFailed,
    StoreFailure,
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidQuantity | ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,

            ErrorCode::CartNotFound | ErrorCode::ProductNotFound | ErrorCode::ItemNotInCart => {
                StatusCode::NOT_FOUND
            }

            ErrorCode::CartAlreadyCompleted
            | ErrorCode::InsufficientInventory
            | ErrorCode::DanglingCartItem => StatusCode::CONFLICT,

            ErrorCode::StoreFailure | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// =============================================================================
// API Error
// =============================================================================

/// A serializable operation failure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Stable machine-readable code.
    pub code: ErrorCode,

    /// Human-readable message for logs and UIs.
    pub message: String,
}

impl ApiError {
    /// Creates an error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            CoreError::CartNotFound(_) => ErrorCode::CartNotFound,
            CoreError::ProductNotFound(_) => ErrorCode::ProductNotFound,
            CoreError::ItemNotInCart { .. } => ErrorCode::ItemNotInCart,
            CoreError::CartAlreadyCompleted(_) => ErrorCode::CartAlreadyCompleted,
            CoreError::InsufficientInventory { .. } => ErrorCode::InsufficientInventory,
            CoreError::DanglingCartItem { .. } => ErrorCode::DanglingCartItem,
            CoreError::Validation(_) => ErrorCode::ValidationFailed,
            CoreError::Store(_) => ErrorCode::StoreFailure,
        };
        ApiError::new(code, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status();
        (status, Json(self)).into_response()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
