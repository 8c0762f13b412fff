//! Order and line item status enumerations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived status of an order ticket
///
/// Every status except [`OrderStatus::Closed`] is recomputed from the item
/// list by [`super::lifecycle::recompute_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// No items yet
    #[default]
    Open,
    /// Kitchen is working on at least one item
    Preparing,
    /// At least one item waits to be served
    Ready,
    /// Every item is delivered or cancelled, awaiting checkout
    InConsumption,
    /// Paid and archived (terminal)
    Closed,
}

impl OrderStatus {
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Preparing => "PREPARING",
            Self::Ready => "READY",
            Self::InConsumption => "IN_CONSUMPTION",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a single line item
///
/// Items advance `OPEN → PREPARING → READY → DELIVERED` or divert to
/// `CANCELLED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    #[default]
    Open,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl ItemStatus {
    /// Delivered and cancelled items no longer count toward the order status
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Still owed to the table: blocks closing the order
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Open | Self::Preparing | Self::Ready)
    }

    /// Eligible for the bulk "mark all ready" action
    pub fn is_in_kitchen(&self) -> bool {
        matches!(self, Self::Open | Self::Preparing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Preparing => "PREPARING",
            Self::Ready => "READY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
