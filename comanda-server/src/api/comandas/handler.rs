//! Comanda API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::api::extract::ApiPath;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::order::{
    AddItemsRequest, CloseOrderRequest, CreateOrderRequest, MarkAllReadyResponse, Order,
};

/// GET /api/comandas - 所有订单
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(state.orders.list().await?))
}

/// GET /api/comandas/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<u64>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders.get(id).await?))
}

/// POST /api/comandas - 开单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = state.orders.create(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// PUT /api/comandas/:id/adicionar-itens - 加菜 / 修改备注和桌号
pub async fn add_items(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<u64>,
    Json(payload): Json<AddItemsRequest>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders.add_items(id, payload).await?))
}

/// PUT /api/comandas/item/:orderId/:itemId/pronto
pub async fn mark_item_ready(
    State(state): State<ServerState>,
    ApiPath((order_id, item_id)): ApiPath<(u64, u64)>,
) -> AppResult<Json<Order>> {
    Ok(Json(state.orders.mark_item_ready(order_id, item_id).await?))
}

/// PUT /api/comandas/:orderId/pronto-todos
pub async fn mark_all_ready(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<u64>,
) -> AppResult<Json<MarkAllReadyResponse>> {
    Ok(Json(state.orders.mark_all_ready(id).await?))
}

/// PUT /api/comandas/item/:orderId/:itemId/entregue
pub async fn mark_item_delivered(
    State(state): State<ServerState>,
    ApiPath((order_id, item_id)): ApiPath<(u64, u64)>,
) -> AppResult<Json<Order>> {
    Ok(Json(
        state.orders.mark_item_delivered(order_id, item_id).await?,
    ))
}

/// PUT /api/comandas/fechar/:id - 结账
///
/// An empty body is treated as a missing payment method.
pub async fn close(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<u64>,
    payload: Option<Json<CloseOrderRequest>>,
) -> AppResult<Json<Order>> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    Ok(Json(state.orders.close(id, payload).await?))
}

/// DELETE /api/comandas/:id - 只能删除已结账订单
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<u64>,
) -> AppResult<StatusCode> {
    state.orders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
