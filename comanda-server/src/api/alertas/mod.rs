//! 订单提醒
//!
//! `GET /api/alertas?after=<seq>` 返回序号大于 `after` 的事件以及当前最大序号。
//! 客户端保存 `lastSeq` 并在下一次轮询时传回。

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::orders::AlertFeed;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/alertas", get(feed))
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertQuery {
    #[serde(default)]
    pub after: u64,
}

async fn feed(State(state): State<ServerState>, Query(query): Query<AlertQuery>) -> Json<AlertFeed> {
    Json(state.monitor.events_after(query.after))
}
