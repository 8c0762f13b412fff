//! Comanda (order ticket) API 模块
//!
//! 所有写操作都经过 [`OrdersManager`](crate::orders::OrdersManager)。

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/comandas", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .route("/{id}/adicionar-itens", put(handler::add_items))
        .route("/{id}/pronto-todos", put(handler::mark_all_ready))
        .route("/fechar/{id}", put(handler::close))
        // 单个菜品状态
        .route("/item/{order_id}/{item_id}/pronto", put(handler::mark_item_ready))
        .route(
            "/item/{order_id}/{item_id}/entregue",
            put(handler::mark_item_delivered),
        )
}
