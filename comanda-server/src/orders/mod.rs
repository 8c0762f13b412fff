//! Order ticket management
//!
//! - **manager**: OrdersManager, one file mutation per API operation
//! - **monitor**: status polling and the alert feed
//! - **seed**: demo orders for empty installations
//! - **uptime**: uptime milestone logging
//!
//! # Data Flow
//!
//! ```text
//! Handler → OrdersManager → FileStore::mutate (lock, load, change, save)
//!                                   ↑
//!             TransitionMonitor ── load() every poll interval
//! ```

pub mod manager;
pub mod monitor;
pub mod seed;
pub mod uptime;

pub use manager::OrdersManager;
pub use monitor::{AlertEvent, AlertFeed, TransitionMonitor};
