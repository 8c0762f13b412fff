//! Fornecedor API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::api::extract::ApiPath;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Supplier, SupplierInput};
use shared::util::next_id;

fn not_found(id: u64) -> AppError {
    AppError::with_message(ErrorCode::SupplierNotFound, format!("Supplier {id} not found"))
        .with_detail("id", id)
}

/// GET /api/fornecedores
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Supplier>>> {
    Ok(Json(state.suppliers.load().await?))
}

/// GET /api/fornecedores/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<u64>,
) -> AppResult<Json<Supplier>> {
    state
        .suppliers
        .load()
        .await?
        .into_iter()
        .find(|s| s.id == id)
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// POST /api/fornecedores
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SupplierInput>,
) -> AppResult<(StatusCode, Json<Supplier>)> {
    let supplier = state
        .suppliers
        .mutate(|suppliers| {
            let supplier = Supplier::from_input(next_id(suppliers.iter().map(|s| s.id)), payload);
            suppliers.push(supplier.clone());
            Ok::<_, AppError>(supplier)
        })
        .await?;

    tracing::info!(id = supplier.id, name = %supplier.display_name(), "Supplier created");
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// PUT /api/fornecedores/:id - 浅合并
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<u64>,
    Json(payload): Json<SupplierInput>,
) -> AppResult<Json<Supplier>> {
    let supplier = state
        .suppliers
        .mutate(|suppliers| {
            let supplier = suppliers
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| not_found(id))?;
            supplier.merge(payload);
            Ok::<_, AppError>(supplier.clone())
        })
        .await?;

    tracing::info!(id, "Supplier updated");
    Ok(Json(supplier))
}

/// DELETE /api/fornecedores/:id
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<u64>,
) -> AppResult<StatusCode> {
    state
        .suppliers
        .mutate(|suppliers| {
            let index = suppliers
                .iter()
                .position(|s| s.id == id)
                .ok_or_else(|| not_found(id))?;
            suppliers.remove(index);
            Ok::<_, AppError>(())
        })
        .await?;

    tracing::info!(id, "Supplier deleted");
    Ok(StatusCode::NO_CONTENT)
}
