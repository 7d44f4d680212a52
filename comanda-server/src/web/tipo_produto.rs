//! TipoProduto 页面

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Response;
use axum::{Form, Router, routing::get};
use shared::models::{TipoProduto, TipoProdutoInput};

use super::views::Page;
use super::{fail, form, path_id, redirect_with};
use crate::auth::{FlashKind, Session};
use crate::core::ServerState;
use crate::db::repository::TipoProdutoRepository;
use crate::utils::AppError;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

const INDEX: &str = "/tipoproduto";

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/tipoproduto", get(index).post(store))
        .route("/tipoproduto/create", get(create))
        .route("/tipoproduto/{id}", get(show).put(update).delete(destroy))
        .route("/tipoproduto/{id}/edit", get(edit))
}

fn not_found(session: &mut Session) -> Response {
    redirect_with(session, INDEX, FlashKind::Warning, "TipoProduto não encontrado.")
}

/// GET /tipoproduto
pub async fn index(State(state): State<ServerState>, mut session: Session) -> Response {
    let result = async {
        let tipos = TipoProdutoRepository::new(&state.db).find_all().await?;
        Page::new("tipoproduto/index.html", "Index de TipoProduto")
            .with("tipoProdutos", &tipos)
            .render(&state, &session)
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, "/", e))
}

/// GET /tipoproduto/create
pub async fn create(State(state): State<ServerState>, mut session: Session) -> Response {
    Page::new("tipoproduto/create.html", "Create de TipoProduto")
        .render(&state, &session)
        .unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// POST /tipoproduto
pub async fn store(
    State(state): State<ServerState>,
    mut session: Session,
    submitted: Result<Form<TipoProdutoInput>, FormRejection>,
) -> Response {
    let result = async {
        let input = form(submitted)?;
        validate_required_text(&input.descricao, "descricao", MAX_NAME_LEN)?;

        let mut tipo = TipoProduto::default();
        tipo.apply(input);
        let tipo = TipoProdutoRepository::new(&state.db).save(&tipo).await?;
        Ok::<_, AppError>(format!(
            "TipoProduto {}-{} salvo com sucesso.",
            tipo.id, tipo.descricao
        ))
    }
    .await;

    match result {
        Ok(message) => redirect_with(&mut session, INDEX, FlashKind::Success, message),
        Err(e) => fail(&mut session, INDEX, e),
    }
}

/// GET /tipoproduto/{id}
pub async fn show(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let result = async {
        let id = path_id(id)?;
        match TipoProdutoRepository::new(&state.db).find_one(id).await? {
            Some(tipo) => Page::new("tipoproduto/show.html", "Show de TipoProduto")
                .with("tipoProduto", &tipo)
                .render(&state, &session),
            None => Ok(not_found(&mut session)),
        }
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// GET /tipoproduto/{id}/edit
pub async fn edit(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let result = async {
        let id = path_id(id)?;
        match TipoProdutoRepository::new(&state.db).find_one(id).await? {
            Some(tipo) => Page::new("tipoproduto/edit.html", "Edit de TipoProduto")
                .with("tipoProduto", &tipo)
                .render(&state, &session),
            None => Ok(not_found(&mut session)),
        }
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// PUT /tipoproduto/{id}
pub async fn update(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
    submitted: Result<Form<TipoProdutoInput>, FormRejection>,
) -> Response {
    let result = async {
        let id = path_id(id)?;
        let input = form(submitted)?;
        validate_required_text(&input.descricao, "descricao", MAX_NAME_LEN)?;

        let repo = TipoProdutoRepository::new(&state.db);
        let Some(mut tipo) = repo.find_one(id).await? else {
            return Ok(not_found(&mut session));
        };
        tipo.apply(input);
        let tipo = repo.update(&tipo).await?;
        Ok::<_, AppError>(redirect_with(
            &mut session,
            INDEX,
            FlashKind::Success,
            format!("TipoProduto {}-{} atualizado com sucesso.", tipo.id, tipo.descricao),
        ))
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// DELETE /tipoproduto/{id}
pub async fn destroy(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let result = async {
        let id = path_id(id)?;
        let repo = TipoProdutoRepository::new(&state.db);
        let Some(tipo) = repo.find_one(id).await? else {
            return Ok(not_found(&mut session));
        };
        let tipo = repo.delete(tipo).await?;
        Ok::<_, AppError>(redirect_with(
            &mut session,
            INDEX,
            FlashKind::Success,
            format!("TipoProduto {}-{} removido com sucesso.", tipo.id, tipo.descricao),
        ))
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}
