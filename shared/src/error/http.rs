//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    ///
    /// Lifecycle conflicts (closing with pending items, double marking,
    /// deleting an open order) are reported as 400 like validation errors.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound
            | Self::OrderNotFound
            | Self::OrderItemNotFound
            | Self::MenuItemNotFound
            | Self::SupplierNotFound
            | Self::PurchaseNotFound => StatusCode::NOT_FOUND,

            Self::Unknown | Self::InternalError | Self::StorageError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            _ => StatusCode::BAD_REQUEST,
        }
    }
}
