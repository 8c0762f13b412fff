//! Shared types for the comanda server
//!
//! Domain types used by the HTTP server and its tests: order tickets and
//! their lifecycle, menu/supplier/purchase records, report aggregations,
//! and the unified error system.

pub mod error;
pub mod models;
pub mod money;
pub mod order;
pub mod report;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use order::{ItemStatus, LineItem, Order, OrderStatus};
