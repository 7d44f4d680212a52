//! PedidoProduto API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pedidoproduto", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{pedido_id}/{produto_id}",
            get(handler::get_by_key)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/ativo/mesa/{mesa_id}", get(handler::list_active_by_mesa))
        .route("/inativo/mesa/{mesa_id}", get(handler::list_inactive_by_mesa))
}
