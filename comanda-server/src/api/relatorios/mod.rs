//! 报表 API 模块
//!
//! 所有报表都接受可选的 `?start=YYYY-MM-DD&end=YYYY-MM-DD`（本地日期，包含首尾）。
//!
//! | 路径 | 说明 |
//! |------|------|
//! | /api/movimentacoes | 已结账订单收款流水 |
//! | /api/relatorios/itens-vendidos | 已售菜品明细 |
//! | /api/relatorios/vendas-por-categoria | 分类销售额占比 |
//! | /api/relatorios/top-itens | 销量前 10 |
//! | /api/relatorios/movimentacao-horaria | 按小时销量 |
//! | /api/relatorios/compras-total | 采购总额 |
//! | /api/relatorios/compras-por-fornecedor | 按供应商采购额 |
//! | /api/financeiro | 现金流水账 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/movimentacoes", get(handler::movements))
        .route("/api/financeiro", get(handler::cash_flow))
        .nest("/api/relatorios", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/itens-vendidos", get(handler::sold_items))
        .route("/vendas-por-categoria", get(handler::sales_by_category))
        .route("/top-itens", get(handler::top_items))
        .route("/movimentacao-horaria", get(handler::hourly_movement))
        .route("/compras-total", get(handler::purchases_total))
        .route("/compras-por-fornecedor", get(handler::purchases_by_supplier))
}
