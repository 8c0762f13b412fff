//! Unified error codes for the comanda server
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order (comanda) errors
//! - 6xxx: Menu errors
//! - 7xxx: Purchasing errors (suppliers, purchases)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so browser clients can
/// switch on them without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Line item not found in the order
    OrderItemNotFound = 4002,
    /// Order has no items
    OrderEmpty = 4003,
    /// Order is already closed
    OrderAlreadyClosed = 4004,
    /// Operation requires a closed order
    OrderNotClosed = 4005,
    /// Order still has items waiting for the kitchen or delivery
    OrderHasPendingItems = 4006,
    /// Item is already ready
    ItemAlreadyReady = 4007,
    /// Item was already delivered or cancelled
    ItemAlreadyResolved = 4008,
    /// Request carried nothing to apply
    NothingToUpdate = 4009,
    /// No item qualified for a bulk status change
    NoItemsToMark = 4010,
    /// Closing requires a payment method
    PaymentMethodRequired = 4011,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,

    // ==================== 7xxx: Purchasing ====================
    /// Supplier not found
    SupplierNotFound = 7001,
    /// Purchase not found
    PurchaseNotFound = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Backing file could not be read or written
    StorageError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderItemNotFound => "Item not found in order",
            ErrorCode::OrderEmpty => "Order must contain at least one item",
            ErrorCode::OrderAlreadyClosed => "Order is already closed",
            ErrorCode::OrderNotClosed => "Only closed orders can be deleted",
            ErrorCode::OrderHasPendingItems => {
                "Order still has items being prepared, ready or pending"
            }
            ErrorCode::ItemAlreadyReady => "Item is already ready",
            ErrorCode::ItemAlreadyResolved => "Item was already delivered or cancelled",
            ErrorCode::NothingToUpdate => "No items to add and no field to update",
            ErrorCode::NoItemsToMark => "No items to mark as ready",
            ErrorCode::PaymentMethodRequired => "Payment method is required",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",

            // Purchasing
            ErrorCode::SupplierNotFound => "Supplier not found",
            ErrorCode::PurchaseNotFound => "Purchase not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderItemNotFound),
            4003 => Ok(ErrorCode::OrderEmpty),
            4004 => Ok(ErrorCode::OrderAlreadyClosed),
            4005 => Ok(ErrorCode::OrderNotClosed),
            4006 => Ok(ErrorCode::OrderHasPendingItems),
            4007 => Ok(ErrorCode::ItemAlreadyReady),
            4008 => Ok(ErrorCode::ItemAlreadyResolved),
            4009 => Ok(ErrorCode::NothingToUpdate),
            4010 => Ok(ErrorCode::NoItemsToMark),
            4011 => Ok(ErrorCode::PaymentMethodRequired),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),

            // Purchasing
            7001 => Ok(ErrorCode::SupplierNotFound),
            7002 => Ok(ErrorCode::PurchaseNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
