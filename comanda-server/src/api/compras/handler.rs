//! Compra API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::api::extract::ApiPath;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Purchase, PurchaseInput};
use shared::util::next_id;

fn not_found(id: u64) -> AppError {
    AppError::with_message(ErrorCode::PurchaseNotFound, format!("Purchase {id} not found"))
        .with_detail("id", id)
}

/// GET /api/compras
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Purchase>>> {
    Ok(Json(state.purchases.load().await?))
}

/// GET /api/compras/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<u64>,
) -> AppResult<Json<Purchase>> {
    state
        .purchases
        .load()
        .await?
        .into_iter()
        .find(|p| p.id == id)
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// POST /api/compras
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PurchaseInput>,
) -> AppResult<(StatusCode, Json<Purchase>)> {
    let purchase = state
        .purchases
        .mutate(|purchases| {
            let purchase = Purchase::from_input(next_id(purchases.iter().map(|p| p.id)), payload)?;
            purchases.push(purchase.clone());
            Ok::<_, AppError>(purchase)
        })
        .await?;

    tracing::info!(
        id = purchase.id,
        supplier_id = ?purchase.supplier_id,
        total = purchase.total,
        "Purchase created"
    );
    Ok((StatusCode::CREATED, Json(purchase)))
}

/// PUT /api/compras/:id - 浅合并
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<u64>,
    Json(payload): Json<PurchaseInput>,
) -> AppResult<Json<Purchase>> {
    let purchase = state
        .purchases
        .mutate(|purchases| {
            let purchase = purchases
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| not_found(id))?;
            purchase.merge(payload)?;
            Ok::<_, AppError>(purchase.clone())
        })
        .await?;

    tracing::info!(id, total = purchase.total, "Purchase updated");
    Ok(Json(purchase))
}

/// DELETE /api/compras/:id
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<u64>,
) -> AppResult<StatusCode> {
    state
        .purchases
        .mutate(|purchases| {
            let index = purchases
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| not_found(id))?;
            purchases.remove(index);
            Ok::<_, AppError>(())
        })
        .await?;

    tracing::info!(id, "Purchase deleted");
    Ok(StatusCode::NO_CONTENT)
}
