//! 报表 API Handlers

use axum::{
    Json,
    extract::{Query, State},
};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::report::{
    self, CashFlow, CashMovement, CategorySales, DateRange, DateRangeQuery, HourlyMovement,
    PurchasesTotal, SoldItem, SupplierSpending, TopItem,
};

fn range(state: &ServerState, query: &DateRangeQuery) -> AppResult<DateRange> {
    DateRange::from_query(query, &state.offset())
}

async fn sold(state: &ServerState, query: &DateRangeQuery) -> AppResult<Vec<SoldItem>> {
    let range = range(state, query)?;
    let orders = state.orders.list().await?;
    Ok(report::sold_items(&orders, &range))
}

/// GET /api/movimentacoes
pub async fn movements(
    State(state): State<ServerState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<CashMovement>>> {
    let range = range(&state, &query)?;
    let orders = state.orders.list().await?;
    Ok(Json(report::movements(&orders, &range)))
}

/// GET /api/relatorios/itens-vendidos
pub async fn sold_items(
    State(state): State<ServerState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<SoldItem>>> {
    Ok(Json(sold(&state, &query).await?))
}

/// GET /api/relatorios/vendas-por-categoria
pub async fn sales_by_category(
    State(state): State<ServerState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<CategorySales>>> {
    let items = sold(&state, &query).await?;
    let menu = state.menu.load().await?;
    Ok(Json(report::sales_by_category(&items, &menu)))
}

/// GET /api/relatorios/top-itens
pub async fn top_items(
    State(state): State<ServerState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<TopItem>>> {
    let items = sold(&state, &query).await?;
    Ok(Json(report::top_items(&items)))
}

/// GET /api/relatorios/movimentacao-horaria
pub async fn hourly_movement(
    State(state): State<ServerState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<HourlyMovement>>> {
    let items = sold(&state, &query).await?;
    Ok(Json(report::hourly_movement(&items, &state.offset())))
}

/// GET /api/relatorios/compras-total
pub async fn purchases_total(
    State(state): State<ServerState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<PurchasesTotal>> {
    let range = range(&state, &query)?;
    let purchases = state.purchases.load().await?;
    Ok(Json(report::purchases_total(&purchases, &range, &state.offset())))
}

/// GET /api/relatorios/compras-por-fornecedor
pub async fn purchases_by_supplier(
    State(state): State<ServerState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<SupplierSpending>>> {
    let range = range(&state, &query)?;
    let purchases = state.purchases.load().await?;
    let suppliers = state.suppliers.load().await?;
    Ok(Json(report::purchases_by_supplier(
        &purchases,
        &suppliers,
        &range,
        &state.offset(),
    )))
}

/// GET /api/financeiro
pub async fn cash_flow(
    State(state): State<ServerState>,
    Query(query): Query<DateRangeQuery>,
) -> AppResult<Json<CashFlow>> {
    let range = range(&state, &query)?;
    let orders = state.orders.list().await?;
    let purchases = state.purchases.load().await?;
    Ok(Json(report::cash_flow(&orders, &purchases, &range, &state.offset())))
}
