//! Cardápio API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::api::extract::ApiPath;
use crate::core::ServerState;
use crate::utils::validation::{MenuFields, validate_menu_item};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::menu::group_by_section;
use shared::models::{MenuItem, MenuItemInput, MenuSection};
use shared::util::next_id;

fn not_found(id: u64) -> AppError {
    AppError::with_message(ErrorCode::MenuItemNotFound, format!("Menu item {id} not found"))
        .with_detail("id", id)
}

fn apply(item: &mut MenuItem, fields: MenuFields) {
    item.name = fields.name;
    item.price = fields.price;
    item.category = fields.category;
}

/// GET /api/cardapio
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    Ok(Json(state.menu.load().await?))
}

/// GET /api/cardapio/secoes - 按出品分区分组
pub async fn sections(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuSection>>> {
    let menu = state.menu.load().await?;
    Ok(Json(group_by_section(&menu)))
}

/// GET /api/cardapio/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<u64>,
) -> AppResult<Json<MenuItem>> {
    state
        .menu
        .load()
        .await?
        .into_iter()
        .find(|i| i.id == id)
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// POST /api/cardapio - 新建，或在 id 已存在时编辑
pub async fn upsert(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemInput>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    let fields = validate_menu_item(&payload)?;
    let existing_id = payload.existing_id();

    let (status, item) = state
        .menu
        .mutate(|menu| {
            if let Some(item) = existing_id.and_then(|id| menu.iter_mut().find(|i| i.id == id)) {
                apply(item, fields);
                return Ok::<_, AppError>((StatusCode::OK, item.clone()));
            }
            let item = MenuItem {
                id: next_id(menu.iter().map(|i| i.id)),
                name: fields.name,
                price: fields.price,
                category: fields.category,
            };
            menu.push(item.clone());
            Ok((StatusCode::CREATED, item))
        })
        .await?;

    tracing::info!(id = item.id, name = %item.name, created = status == StatusCode::CREATED, "Menu item saved");
    Ok((status, Json(item)))
}

/// PUT /api/cardapio/:id
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<u64>,
    Json(payload): Json<MenuItemInput>,
) -> AppResult<Json<MenuItem>> {
    let fields = validate_menu_item(&payload)?;
    let item = state
        .menu
        .mutate(|menu| {
            let item = menu
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| not_found(id))?;
            apply(item, fields);
            Ok::<_, AppError>(item.clone())
        })
        .await?;

    tracing::info!(id, name = %item.name, "Menu item updated");
    Ok(Json(item))
}

/// DELETE /api/cardapio/:id
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<u64>,
) -> AppResult<StatusCode> {
    state
        .menu
        .mutate(|menu| {
            let index = menu
                .iter()
                .position(|i| i.id == id)
                .ok_or_else(|| not_found(id))?;
            menu.remove(index);
            Ok::<_, AppError>(())
        })
        .await?;

    tracing::info!(id, "Menu item deleted");
    Ok(StatusCode::NO_CONTENT)
}
