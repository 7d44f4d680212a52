//! Mesa API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::models::{Mesa, MesaInput};

use crate::api::ApiJson;
use crate::core::ServerState;
use crate::db::repository::MesaRepository;
use crate::utils::validation::validate_non_negative;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct MesaBody {
    pub mesa: MesaInput,
}

/// GET /api/mesa - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Mesa>>> {
    let repo = MesaRepository::new(&state.db);
    Ok(Json(repo.find_all().await?))
}

/// GET /api/mesa/{id} - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Mesa>> {
    let repo = MesaRepository::new(&state.db);
    let mesa = repo
        .find_one(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Mesa {id}")))?;
    Ok(Json(mesa))
}

/// POST /api/mesa - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(body): ApiJson<MesaBody>,
) -> AppResult<Json<Mesa>> {
    validate_non_negative(body.mesa.numero, "numero")?;

    let mut mesa = Mesa::default();
    mesa.apply(body.mesa);

    let repo = MesaRepository::new(&state.db);
    let mesa = repo.save(&mesa).await?;
    tracing::info!(id = mesa.id, numero = mesa.numero, "Mesa created");
    Ok(Json(mesa))
}

/// PUT /api/mesa/{id} - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<MesaBody>,
) -> AppResult<Json<Mesa>> {
    validate_non_negative(body.mesa.numero, "numero")?;

    let repo = MesaRepository::new(&state.db);
    let mut mesa = repo
        .find_one(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Mesa {id}")))?;
    mesa.apply(body.mesa);

    Ok(Json(repo.update(&mesa).await?))
}

/// DELETE /api/mesa/{id} - 删除桌台
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Mesa>> {
    let repo = MesaRepository::new(&state.db);
    let mesa = repo
        .find_one(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Mesa {id}")))?;

    let mesa = repo.delete(mesa).await?;
    tracing::info!(id = mesa.id, "Mesa deleted");
    Ok(Json(mesa))
}
