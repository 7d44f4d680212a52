//! Usuario API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{Credenciais, NovoUsuario, Usuario, UsuarioUpdate};

use crate::api::ApiJson;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, UsuarioRepository};
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct UsuarioBody<T> {
    pub usuario: T,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

fn validate_credentials(credenciais: &Credenciais) -> AppResult<()> {
    validate_email(&credenciais.email)?;
    validate_required_text(&credenciais.senha, "senha", MAX_PASSWORD_LEN)?;
    Ok(())
}

/// Load the user behind `{id}`, refusing anyone but its owner
async fn find_owned(
    repo: &UsuarioRepository,
    current: &CurrentUser,
    id: i64,
) -> AppResult<Usuario> {
    let usuario = repo
        .find_one(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Usuario {id}")))?;

    if !current.owns(usuario.id) {
        security_log!(
            "WARN",
            "permission_denied",
            user_id = current.id,
            target_id = id
        );
        return Err(AppError::forbidden(format!(
            "Usuario {id} does not belong to the authenticated user"
        )));
    }
    Ok(usuario)
}

/// POST /api/usuario/login - 登录并签发令牌
pub async fn login(
    State(state): State<ServerState>,
    ApiJson(body): ApiJson<UsuarioBody<Credenciais>>,
) -> AppResult<Json<LoginResponse>> {
    let credenciais = body.usuario;
    if credenciais.email.trim().is_empty() || credenciais.senha.is_empty() {
        return Err(AppError::validation("E-mail e senha são obrigatórios."));
    }

    let repo = UsuarioRepository::new(&state.db);
    let usuario = match repo
        .validate_user(&credenciais.email, &credenciais.senha)
        .await?
    {
        Some(usuario) => usuario,
        None => {
            security_log!("WARN", "login_failed", email = credenciais.email.clone());
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .get_jwt_service()
        .generate_token(usuario.id, &usuario.nome)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    security_log!("INFO", "login_success", user_id = usuario.id);
    Ok(Json(LoginResponse { token }))
}

/// POST /api/usuario - 创建用户
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(body): ApiJson<UsuarioBody<NovoUsuario>>,
) -> AppResult<Json<Usuario>> {
    let novo = body.usuario;
    validate_required_text(&novo.nome, "nome", MAX_NAME_LEN)?;
    validate_email(&novo.email)?;
    validate_required_text(&novo.senha, "senha", MAX_PASSWORD_LEN)?;

    let repo = UsuarioRepository::new(&state.db);
    let usuario = repo.save(&novo).await.map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::already_exists(format!("Usuario {}", novo.email)),
        other => other.into(),
    })?;

    tracing::info!(id = usuario.id, "Usuario created");
    Ok(Json(usuario))
}

/// GET /api/usuario/{id} - 获取当前用户
pub async fn get_by_id(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Usuario>> {
    let repo = UsuarioRepository::new(&state.db);
    Ok(Json(find_owned(&repo, &current, id).await?))
}

/// PUT /api/usuario/{id} - 更新用户名
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<UsuarioBody<UsuarioUpdate>>,
) -> AppResult<Json<Usuario>> {
    validate_required_text(&body.usuario.nome, "nome", MAX_NAME_LEN)?;

    let repo = UsuarioRepository::new(&state.db);
    let mut usuario = find_owned(&repo, &current, id).await?;
    usuario.nome = body.usuario.nome;
    Ok(Json(repo.update(&usuario).await?))
}

/// PUT /api/usuario/{id}/emailsenha - 修改邮箱和密码
pub async fn update_email_senha(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    ApiJson(body): ApiJson<UsuarioBody<Credenciais>>,
) -> AppResult<Json<Usuario>> {
    let credenciais = body.usuario;
    validate_credentials(&credenciais)?;

    let repo = UsuarioRepository::new(&state.db);
    let usuario = find_owned(&repo, &current, id).await?;
    let usuario = repo
        .update_email_senha(&usuario, &credenciais.email, &credenciais.senha)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => {
                AppError::already_exists(format!("Usuario {}", credenciais.email))
            }
            other => other.into(),
        })?;

    security_log!("INFO", "credentials_changed", user_id = usuario.id);
    Ok(Json(usuario))
}

/// DELETE /api/usuario/{id} - 删除当前用户
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Usuario>> {
    let repo = UsuarioRepository::new(&state.db);
    let usuario = find_owned(&repo, &current, id).await?;
    Ok(Json(repo.delete(usuario).await?))
}
