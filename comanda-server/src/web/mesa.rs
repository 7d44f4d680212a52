//! Mesa 页面

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Response;
use axum::{Form, Router, routing::get};
use serde::Deserialize;
use shared::models::{Estado, Mesa};

use super::views::Page;
use super::{fail, form, path_id, redirect_with};
use crate::auth::{FlashKind, Session};
use crate::core::ServerState;
use crate::db::repository::MesaRepository;
use crate::utils::validation::validate_non_negative;
use crate::utils::AppError;

const INDEX: &str = "/mesa";

#[derive(Debug, Deserialize)]
pub struct MesaForm {
    pub numero: i64,
}

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/mesa", get(index).post(store))
        .route("/mesa/create", get(create))
        .route("/mesa/{id}", get(show).put(update).delete(destroy))
        .route("/mesa/{id}/edit", get(edit))
}

fn not_found(session: &mut Session, id: i64) -> Response {
    redirect_with(session, INDEX, FlashKind::Warning, format!("Mesa {id} não encontrada."))
}

/// GET /mesa
pub async fn index(State(state): State<ServerState>, mut session: Session) -> Response {
    let result = async {
        let mesas = MesaRepository::new(&state.db).find_all().await?;
        Page::new("mesa/index.html", "Index de Mesa")
            .with("mesas", &mesas)
            .render(&state, &session)
    }
    .await;
    // the index itself failed: fall back to the home page
    result.unwrap_or_else(|e| fail(&mut session, "/", e))
}

/// GET /mesa/create
pub async fn create(State(state): State<ServerState>, mut session: Session) -> Response {
    Page::new("mesa/create.html", "Create de Mesa")
        .render(&state, &session)
        .unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// POST /mesa - new tables always start open
pub async fn store(
    State(state): State<ServerState>,
    mut session: Session,
    submitted: Result<Form<MesaForm>, FormRejection>,
) -> Response {
    let result = async {
        let input = form(submitted)?;
        validate_non_negative(input.numero, "numero")?;

        let mesa = Mesa {
            numero: input.numero,
            estado: Estado::Ativo,
            ..Default::default()
        };
        let mesa = MesaRepository::new(&state.db).save(&mesa).await?;
        Ok::<_, AppError>(format!("Mesa {} salva com sucesso.", mesa.numero))
    }
    .await;

    match result {
        Ok(message) => redirect_with(&mut session, INDEX, FlashKind::Success, message),
        Err(e) => fail(&mut session, INDEX, e),
    }
}

/// GET /mesa/{id}
pub async fn show(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let result = async {
        let id = path_id(id)?;
        match MesaRepository::new(&state.db).find_one(id).await? {
            Some(mesa) => Page::new("mesa/show.html", "Show de Mesa")
                .with("mesa", &mesa)
                .render(&state, &session),
            None => Ok(not_found(&mut session, id)),
        }
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// GET /mesa/{id}/edit
pub async fn edit(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let result = async {
        let id = path_id(id)?;
        match MesaRepository::new(&state.db).find_one(id).await? {
            Some(mesa) => Page::new("mesa/edit.html", "Edit de Mesa")
                .with("mesa", &mesa)
                .render(&state, &session),
            None => Ok(not_found(&mut session, id)),
        }
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// PUT /mesa/{id} - only the number changes here
pub async fn update(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
    submitted: Result<Form<MesaForm>, FormRejection>,
) -> Response {
    let result = async {
        let id = path_id(id)?;
        let input = form(submitted)?;
        validate_non_negative(input.numero, "numero")?;

        let repo = MesaRepository::new(&state.db);
        let Some(mut mesa) = repo.find_one(id).await? else {
            return Ok(not_found(&mut session, id));
        };
        mesa.numero = input.numero;
        let mesa = repo.update(&mesa).await?;
        Ok::<_, AppError>(redirect_with(
            &mut session,
            INDEX,
            FlashKind::Success,
            format!("Mesa {} atualizada com sucesso.", mesa.numero),
        ))
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// DELETE /mesa/{id}
pub async fn destroy(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let result = async {
        let id = path_id(id)?;
        let repo = MesaRepository::new(&state.db);
        let Some(mesa) = repo.find_one(id).await? else {
            return Ok(not_found(&mut session, id));
        };
        let mesa = repo.delete(mesa).await?;
        Ok::<_, AppError>(redirect_with(
            &mut session,
            INDEX,
            FlashKind::Success,
            format!("Mesa {} removida com sucesso.", mesa.numero),
        ))
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}
