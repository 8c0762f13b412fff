//! 订单状态监控
//!
//! 定时读取订单文件，与上一次快照比较，产生 "新订单 / 订单就绪 / 订单离开"
//! 事件。事件写入有界的内存队列，客户端通过 `GET /api/alertas?after=` 轮询。

use crate::store::OrderStore;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared::order::{Order, OrderTransition, StatusSnapshot, detect_transitions};
use std::collections::VecDeque;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// 内存中保留的事件数量
pub const FEED_CAPACITY: usize = 200;

/// A transition with its feed sequence number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEvent {
    pub seq: u64,
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub transition: OrderTransition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertFeed {
    /// Highest sequence number issued so far; pass back as `after`
    pub last_seq: u64,
    pub events: Vec<AlertEvent>,
}

#[derive(Debug, Default)]
struct MonitorState {
    /// `None` until the first observation
    snapshot: Option<StatusSnapshot>,
    feed: VecDeque<AlertEvent>,
    last_seq: u64,
}

#[derive(Debug, Default)]
pub struct TransitionMonitor {
    state: Mutex<MonitorState>,
}

impl TransitionMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff `orders` against the previous observation.
    ///
    /// The first call only records the baseline and returns nothing.
    pub fn observe(&self, orders: &[Order]) -> Vec<AlertEvent> {
        let mut state = self.state.lock();
        let Some(previous) = state.snapshot.take() else {
            state.snapshot = Some(StatusSnapshot::from_orders(orders));
            return Vec::new();
        };

        let (transitions, next) = detect_transitions(&previous, orders);
        state.snapshot = Some(next);

        let now = Utc::now();
        let mut events = Vec::with_capacity(transitions.len());
        for transition in transitions {
            state.last_seq += 1;
            let event = AlertEvent {
                seq: state.last_seq,
                at: now,
                transition,
            };
            if state.feed.len() == FEED_CAPACITY {
                state.feed.pop_front();
            }
            state.feed.push_back(event.clone());
            events.push(event);
        }
        events
    }

    /// Events with `seq > after`, oldest first
    pub fn events_after(&self, after: u64) -> AlertFeed {
        let state = self.state.lock();
        AlertFeed {
            last_seq: state.last_seq,
            events: state
                .feed
                .iter()
                .filter(|e| e.seq > after)
                .cloned()
                .collect(),
        }
    }

    /// Poll the orders file until `shutdown` fires
    pub async fn run(&self, orders: OrderStore, interval: Duration, shutdown: CancellationToken) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        tracing::info!(interval_ms = interval.as_millis() as u64, "Order alert monitor started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Order alert monitor stopped");
                    break;
                }
                _ = ticker.tick() => {
                    match orders.load().await {
                        Ok(list) => {
                            for event in self.observe(&list) {
                                log_event(&event);
                            }
                        }
                        Err(e) => tracing::error!(error = %e, "Failed to poll orders"),
                    }
                }
            }
        }
    }
}

fn log_event(event: &AlertEvent) {
    match &event.transition {
        OrderTransition::NewOrder {
            order_id,
            scheduling_code,
            item_count,
        } => tracing::info!(seq = event.seq, order_id, scheduling_code = %scheduling_code, item_count, "New order"),
        OrderTransition::OrderReady {
            order_id,
            scheduling_code,
        } => tracing::info!(seq = event.seq, order_id, scheduling_code = %scheduling_code, "Order ready"),
        OrderTransition::OrderGone { order_id } => {
            tracing::debug!(seq = event.seq, order_id, "Order left the floor")
        }
    }
}
