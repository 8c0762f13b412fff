//! Order tickets ("comandas")
//!
//! - [`types`]: persisted order/line item and request payloads
//! - [`status`]: order and item status enums
//! - [`lifecycle`]: derived status and total recomputation
//! - [`transitions`]: diff of successive order snapshots for alerts

pub mod lifecycle;
pub mod status;
pub mod transitions;
pub mod types;

// Re-exports
pub use lifecycle::{derive_status, recompute_status, recompute_total};
pub use status::{ItemStatus, OrderStatus};
pub use transitions::{OrderTransition, StatusSnapshot, detect_transitions};
pub use types::*;
