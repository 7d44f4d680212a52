//! TipoProduto API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::{TipoProduto, TipoProdutoInput};

use crate::api::ApiJson;
use crate::core::ServerState;
use crate::db::repository::TipoProdutoRepository;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipoProdutoBody {
    pub tipo_produto: TipoProdutoInput,
}

async fn find(repo: &TipoProdutoRepository, id: i64) -> AppResult<TipoProduto> {
    repo.find_one(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("TipoProduto {id}")))
}

/// GET /api/tipoproduto - 获取所有分类
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<TipoProduto>>> {
    let repo = TipoProdutoRepository::new(&state.db);
    Ok(Json(repo.find_all().await?))
}

/// GET /api/tipoproduto/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TipoProduto>> {
    let repo = TipoProdutoRepository::new(&state.db);
    Ok(Json(find(&repo, id).await?))
}

/// POST /api/tipoproduto - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(body): ApiJson<TipoProdutoBody>,
) -> AppResult<Json<TipoProduto>> {
    validate_required_text(&body.tipo_produto.descricao, "descricao", MAX_NAME_LEN)?;

    let mut tipo = TipoProduto::default();
    tipo.apply(body.tipo_produto);

    let repo = TipoProdutoRepository::new(&state.db);
    Ok(Json(repo.save(&tipo).await?))
}

/// PUT /api/tipoproduto/{id} - 更新分类
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<TipoProdutoBody>,
) -> AppResult<Json<TipoProduto>> {
    validate_required_text(&body.tipo_produto.descricao, "descricao", MAX_NAME_LEN)?;

    let repo = TipoProdutoRepository::new(&state.db);
    let mut tipo = find(&repo, id).await?;
    tipo.apply(body.tipo_produto);
    Ok(Json(repo.update(&tipo).await?))
}

/// DELETE /api/tipoproduto/{id} - 删除分类
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TipoProduto>> {
    let repo = TipoProdutoRepository::new(&state.db);
    let tipo = find(&repo, id).await?;
    Ok(Json(repo.delete(tipo).await?))
}
