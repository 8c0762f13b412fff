//! 厨房队列和看板
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/cozinha | GET | 仍有待处理菜品的订单，最早的在前 |
//! | /api/painel | GET | 看板统计 |

use axum::{Json, Router, extract::State, routing::get};
use chrono::Utc;

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::order::Order;
use shared::report::{DashboardSummary, dashboard, kitchen_queue};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/cozinha", get(queue))
        .route("/api/painel", get(summary))
}

async fn queue(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders.list().await?;
    Ok(Json(kitchen_queue(&orders)))
}

async fn summary(State(state): State<ServerState>) -> AppResult<Json<DashboardSummary>> {
    let orders = state.orders.list().await?;
    Ok(Json(dashboard(&orders, Utc::now(), &state.offset())))
}
