//! Produto API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::{Produto, ProdutoInput};

use crate::api::ApiJson;
use crate::core::ServerState;
use crate::db::repository::ProdutoRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_non_negative, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ProdutoBody {
    pub produto: ProdutoInput,
}

fn validate(input: &ProdutoInput) -> AppResult<()> {
    validate_non_negative(input.numero, "numero")?;
    validate_required_text(&input.nome, "nome", MAX_NAME_LEN)?;
    validate_non_negative(input.preco, "preco")?;
    validate_optional_text(&input.ingredientes, "ingredientes", MAX_NOTE_LEN)?;
    Ok(())
}

async fn find(repo: &ProdutoRepository, id: i64) -> AppResult<Produto> {
    repo.find_one(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Produto {id}")))
}

/// GET /api/produto - 获取所有商品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Produto>>> {
    let repo = ProdutoRepository::new(&state.db);
    Ok(Json(repo.find_all().await?))
}

/// GET /api/produto/{id} - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Produto>> {
    let repo = ProdutoRepository::new(&state.db);
    Ok(Json(find(&repo, id).await?))
}

/// POST /api/produto - 创建商品
///
/// The category is not checked: a dangling `TipoProduto_id` is stored as is.
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(body): ApiJson<ProdutoBody>,
) -> AppResult<Json<Produto>> {
    validate(&body.produto)?;

    let mut produto = Produto::default();
    produto.apply(body.produto);

    let repo = ProdutoRepository::new(&state.db);
    let produto = repo.save(&produto).await?;
    tracing::info!(id = produto.id, nome = %produto.nome, "Produto created");
    Ok(Json(produto))
}

/// PUT /api/produto/{id} - 更新商品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<ProdutoBody>,
) -> AppResult<Json<Produto>> {
    validate(&body.produto)?;

    let repo = ProdutoRepository::new(&state.db);
    let mut produto = find(&repo, id).await?;
    produto.apply(body.produto);
    Ok(Json(repo.update(&produto).await?))
}

/// DELETE /api/produto/{id} - 删除商品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Produto>> {
    let repo = ProdutoRepository::new(&state.db);
    let produto = find(&repo, id).await?;
    Ok(Json(repo.delete(produto).await?))
}
