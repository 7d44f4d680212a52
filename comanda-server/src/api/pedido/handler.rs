//! Pedido API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::{Pedido, PedidoInput};

use crate::api::ApiJson;
use crate::core::ServerState;
use crate::db::repository::PedidoRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct PedidoBody {
    pub pedido: PedidoInput,
}

async fn find(repo: &PedidoRepository, id: i64) -> AppResult<Pedido> {
    repo.find_one(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Pedido {id}")))
}

/// GET /api/pedido - 获取所有订单
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Pedido>>> {
    let repo = PedidoRepository::new(&state.db);
    Ok(Json(repo.find_all().await?))
}

/// GET /api/pedido/mesa/{mesa_id} - 获取桌台的订单 (新的在前)
pub async fn list_by_mesa(
    State(state): State<ServerState>,
    Path(mesa_id): Path<i64>,
) -> AppResult<Json<Vec<Pedido>>> {
    let repo = PedidoRepository::new(&state.db);
    Ok(Json(repo.find_by_mesa_id(mesa_id).await?))
}

/// GET /api/pedido/{id} - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Pedido>> {
    let repo = PedidoRepository::new(&state.db);
    Ok(Json(find(&repo, id).await?))
}

/// POST /api/pedido - 创建订单
///
/// The table is not checked: a dangling `Mesa_id` is stored as is.
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(body): ApiJson<PedidoBody>,
) -> AppResult<Json<Pedido>> {
    let mut pedido = Pedido::default();
    pedido.apply(body.pedido);

    let repo = PedidoRepository::new(&state.db);
    let pedido = repo.save(&pedido).await?;
    tracing::info!(id = pedido.id, mesa_id = pedido.mesa_id, "Pedido created");
    Ok(Json(pedido))
}

/// PUT /api/pedido/{id} - 更新订单
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<PedidoBody>,
) -> AppResult<Json<Pedido>> {
    let repo = PedidoRepository::new(&state.db);
    let mut pedido = find(&repo, id).await?;
    pedido.apply(body.pedido);
    Ok(Json(repo.update(&pedido).await?))
}

/// DELETE /api/pedido/{id} - 删除订单
///
/// Lines of the order are left in place.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Pedido>> {
    let repo = PedidoRepository::new(&state.db);
    let pedido = find(&repo, id).await?;
    Ok(Json(repo.delete(pedido).await?))
}
