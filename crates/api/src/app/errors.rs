use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use storefront_infra::StoreError;
use storefront_products::DiscountError;

/// Every failure a product route can report.
///
/// `Display` is the literal `error` string clients see, except for
/// [`ApiError::Store`] which hides the underlying cause.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid product ID")]
    InvalidProductId,

    #[error("Invalid request payload")]
    InvalidPayload,

    #[error("Product not found")]
    ProductNotFound,

    #[error(transparent)]
    Discount(#[from] DiscountError),

    #[error("Internal server error")]
    Store(#[source] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidProductId | Self::InvalidPayload | Self::Discount(_) => StatusCode::BAD_REQUEST,
            Self::ProductNotFound => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::ProductNotFound,
            other => Self::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Store(cause) = &self {
            tracing::error!(error = %cause, "product store failure");
        }
        json_error(self.status(), self.to_string())
    }
}

/// `{"error": message}` with the given status.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, axum::Json(json!({ "error": message.into() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_becomes_404() {
        let err = ApiError::from(StoreError::NotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Product not found");
    }

    #[test]
    fn store_failures_hide_their_cause() {
        let err = ApiError::from(StoreError::Database("relation \"products\" does not exist".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn discount_errors_keep_their_message() {
        let err = ApiError::from(DiscountError::OutOfRange);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Discount must be >= 0 and <= 100");
    }
}
