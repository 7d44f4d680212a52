//! PedidoProduto API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::{PedidoProduto, PedidoProdutoDetalhado, PedidoProdutoInput};

use crate::api::ApiJson;
use crate::core::ServerState;
use crate::db::repository::PedidoProdutoRepository;
use crate::utils::validation::{MAX_NOTE_LEN, validate_non_negative, validate_optional_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedidoProdutoBody {
    pub pedido_produto: PedidoProdutoInput,
}

fn validate(input: &PedidoProdutoInput) -> AppResult<()> {
    validate_non_negative(input.preco_venda, "precoVenda")?;
    validate_non_negative(input.quantidade, "quantidade")?;
    validate_optional_text(&input.observacao, "observacao", MAX_NOTE_LEN)?;
    Ok(())
}

async fn find(
    repo: &PedidoProdutoRepository,
    pedido_id: i64,
    produto_id: i64,
) -> AppResult<PedidoProduto> {
    repo.find_one(pedido_id, produto_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("PedidoProduto ({pedido_id}, {produto_id})")))
}

/// GET /api/pedidoproduto - 获取所有订单明细
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<PedidoProduto>>> {
    let repo = PedidoProdutoRepository::new(&state.db);
    Ok(Json(repo.find_all().await?))
}

/// GET /api/pedidoproduto/{pedido_id}/{produto_id}
pub async fn get_by_key(
    State(state): State<ServerState>,
    Path((pedido_id, produto_id)): Path<(i64, i64)>,
) -> AppResult<Json<PedidoProduto>> {
    let repo = PedidoProdutoRepository::new(&state.db);
    Ok(Json(find(&repo, pedido_id, produto_id).await?))
}

/// GET /api/pedidoproduto/ativo/mesa/{mesa_id} - 桌台未结订单的明细
///
/// An empty list is a normal answer, not a 404.
pub async fn list_active_by_mesa(
    State(state): State<ServerState>,
    Path(mesa_id): Path<i64>,
) -> AppResult<Json<Vec<PedidoProdutoDetalhado>>> {
    let repo = PedidoProdutoRepository::new(&state.db);
    Ok(Json(repo.find_all_by_mesa_active(mesa_id).await?))
}

/// GET /api/pedidoproduto/inativo/mesa/{mesa_id} - 桌台已结订单的明细
pub async fn list_inactive_by_mesa(
    State(state): State<ServerState>,
    Path(mesa_id): Path<i64>,
) -> AppResult<Json<Vec<PedidoProdutoDetalhado>>> {
    let repo = PedidoProdutoRepository::new(&state.db);
    Ok(Json(repo.find_all_by_mesa_inactive(mesa_id).await?))
}

/// POST /api/pedidoproduto - 创建订单明细
///
/// 409 when the (pedido, produto) pair already has a line.
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(body): ApiJson<PedidoProdutoBody>,
) -> AppResult<Json<PedidoProduto>> {
    validate(&body.pedido_produto)?;

    let mut linha = PedidoProduto::default();
    linha.apply(body.pedido_produto);

    let repo = PedidoProdutoRepository::new(&state.db);
    let linha = repo.save(&linha).await?;
    tracing::info!(
        pedido_id = linha.pedido_id,
        produto_id = linha.produto_id,
        quantidade = linha.quantidade,
        "PedidoProduto created"
    );
    Ok(Json(linha))
}

/// PUT /api/pedidoproduto/{pedido_id}/{produto_id} - 更新订单明细
///
/// The body may carry a different key: the line then moves to it.
pub async fn update(
    State(state): State<ServerState>,
    Path((pedido_id, produto_id)): Path<(i64, i64)>,
    ApiJson(body): ApiJson<PedidoProdutoBody>,
) -> AppResult<Json<PedidoProduto>> {
    validate(&body.pedido_produto)?;

    let repo = PedidoProdutoRepository::new(&state.db);
    let mut linha = find(&repo, pedido_id, produto_id).await?;
    linha.apply(body.pedido_produto);

    Ok(Json(repo.update_with_key(&linha, pedido_id, produto_id).await?))
}

/// DELETE /api/pedidoproduto/{pedido_id}/{produto_id} - 删除订单明细
pub async fn delete(
    State(state): State<ServerState>,
    Path((pedido_id, produto_id)): Path<(i64, i64)>,
) -> AppResult<Json<PedidoProduto>> {
    let repo = PedidoProdutoRepository::new(&state.db);
    let linha = find(&repo, pedido_id, produto_id).await?;
    Ok(Json(repo.delete(linha).await?))
}
