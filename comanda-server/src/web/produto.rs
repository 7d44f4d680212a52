//! Produto 页面
//!
//! Listing and detail pages show the category description; the forms offer
//! the existing categories as choices.

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Response;
use axum::{Form, Router, routing::get};
use shared::models::{Produto, ProdutoInput};

use super::views::Page;
use super::{fail, form, non_empty, path_id, redirect_with};
use crate::auth::{FlashKind, Session};
use crate::core::ServerState;
use crate::db::repository::{ProdutoRepository, TipoProdutoRepository};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_non_negative, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

const INDEX: &str = "/produto";

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/produto", get(index).post(store))
        .route("/produto/create", get(create))
        .route("/produto/{id}", get(show).put(update).delete(destroy))
        .route("/produto/{id}/edit", get(edit))
}

fn not_found(session: &mut Session) -> Response {
    redirect_with(session, INDEX, FlashKind::Warning, "Produto não encontrado.")
}

fn validated(submitted: Result<Form<ProdutoInput>, FormRejection>) -> AppResult<ProdutoInput> {
    let mut input = form(submitted)?;
    input.ingredientes = non_empty(input.ingredientes);
    validate_non_negative(input.numero, "numero")?;
    validate_required_text(&input.nome, "nome", MAX_NAME_LEN)?;
    validate_non_negative(input.preco, "preco")?;
    validate_optional_text(&input.ingredientes, "ingredientes", MAX_NOTE_LEN)?;
    Ok(input)
}

/// GET /produto
pub async fn index(State(state): State<ServerState>, mut session: Session) -> Response {
    let result = async {
        let produtos = ProdutoRepository::new(&state.db)
            .find_all_with_tipo_produto_descricao()
            .await?;
        Page::new("produto/index.html", "Index de Produto")
            .with("produtos", &produtos)
            .render(&state, &session)
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, "/", e))
}

/// GET /produto/create
pub async fn create(State(state): State<ServerState>, mut session: Session) -> Response {
    let result = async {
        let tipos = TipoProdutoRepository::new(&state.db).find_all().await?;
        Page::new("produto/create.html", "Create de Produto")
            .with("tipoProdutos", &tipos)
            .render(&state, &session)
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// POST /produto
pub async fn store(
    State(state): State<ServerState>,
    mut session: Session,
    submitted: Result<Form<ProdutoInput>, FormRejection>,
) -> Response {
    let result = async {
        let input = validated(submitted)?;
        let mut produto = Produto::default();
        produto.apply(input);
        let produto = ProdutoRepository::new(&state.db).save(&produto).await?;
        Ok::<_, AppError>(format!(
            "Produto {} - {} salvo com sucesso.",
            produto.numero, produto.nome
        ))
    }
    .await;

    match result {
        Ok(message) => redirect_with(&mut session, INDEX, FlashKind::Success, message),
        Err(e) => fail(&mut session, INDEX, e),
    }
}

/// GET /produto/{id}
pub async fn show(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let result = async {
        let id = path_id(id)?;
        let produto = ProdutoRepository::new(&state.db)
            .find_one_with_tipo_produto_descricao(id)
            .await?;
        match produto {
            Some(produto) => Page::new("produto/show.html", "Show de Produto")
                .with("produto", &produto)
                .render(&state, &session),
            None => Ok(not_found(&mut session)),
        }
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// GET /produto/{id}/edit
pub async fn edit(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let result = async {
        let id = path_id(id)?;
        let Some(produto) = ProdutoRepository::new(&state.db).find_one(id).await? else {
            return Ok(not_found(&mut session));
        };
        let tipos = TipoProdutoRepository::new(&state.db).find_all().await?;
        Page::new("produto/edit.html", "Edit de Produto")
            .with("produto", &produto)
            .with("tipoProdutos", &tipos)
            .render(&state, &session)
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// PUT /produto/{id}
pub async fn update(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
    submitted: Result<Form<ProdutoInput>, FormRejection>,
) -> Response {
    let result = async {
        let id = path_id(id)?;
        let input = validated(submitted)?;
        let repo = ProdutoRepository::new(&state.db);
        let Some(mut produto) = repo.find_one(id).await? else {
            return Ok(not_found(&mut session));
        };
        produto.apply(input);
        let produto = repo.update(&produto).await?;
        Ok::<_, AppError>(redirect_with(
            &mut session,
            INDEX,
            FlashKind::Success,
            format!("Produto {} - {} atualizado com sucesso.", produto.numero, produto.nome),
        ))
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// DELETE /produto/{id}
pub async fn destroy(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let result = async {
        let id = path_id(id)?;
        let repo = ProdutoRepository::new(&state.db);
        let Some(produto) = repo.find_one(id).await? else {
            return Ok(not_found(&mut session));
        };
        let produto = repo.delete(produto).await?;
        Ok::<_, AppError>(redirect_with(
            &mut session,
            INDEX,
            FlashKind::Success,
            format!("Produto {} - {} removido com sucesso.", produto.numero, produto.nome),
        ))
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}
