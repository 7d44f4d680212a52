//! Usuario 页面
//!
//! The panel, sign-up and login pages are public. Profile pages only serve
//! the logged-in user; any other id is reported as not found.

use axum::extract::rejection::{FormRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Response;
use axum::{
    Form, Router,
    routing::{get, post},
};
use shared::models::{Credenciais, NovoUsuario, Usuario, UsuarioUpdate};

use super::views::Page;
use super::{fail, form, path_id, redirect_with};
use crate::auth::{FlashKind, Session, SessionUser};
use crate::core::ServerState;
use crate::db::repository::{RepoError, UsuarioRepository};
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult};

const INDEX: &str = "/usuario";

const NOT_FOUND: &str = "Usuário não encontrado.";
const NOT_OWNER: &str = "Usuário não pertence ao usuário logado.";

pub fn public_router() -> Router<ServerState> {
    Router::new()
        .route("/usuario", get(index).post(store))
        .route("/usuario/create", get(create))
        .route("/usuario/login", get(login_form).post(login))
        .route("/usuario/logout", post(logout))
}

pub fn protected_router() -> Router<ServerState> {
    Router::new()
        .route("/usuario/{id}", get(show).put(update).delete(destroy))
        .route("/usuario/{id}/edit", get(edit))
        .route(
            "/usuario/{id}/editemailpassword",
            get(edit_email_senha).put(update_email_senha),
        )
}

impl From<&Usuario> for SessionUser {
    fn from(usuario: &Usuario) -> Self {
        Self {
            id: usuario.id,
            nome: usuario.nome.clone(),
            email: usuario.email.clone(),
        }
    }
}

enum Lookup {
    Found(Usuario),
    Missing,
    NotOwner,
}

/// Load `{id}` and check it against the session user
async fn lookup(repo: &UsuarioRepository, session: &Session, id: i64) -> AppResult<Lookup> {
    let Some(usuario) = repo.find_one(id).await? else {
        return Ok(Lookup::Missing);
    };
    match session.user() {
        Some(logado) if logado.id == usuario.id => Ok(Lookup::Found(usuario)),
        logado => {
            security_log!(
                "WARN",
                "permission_denied",
                user_id = logado.map(|u| u.id).unwrap_or_default(),
                target_id = id
            );
            Ok(Lookup::NotOwner)
        }
    }
}

fn warn(session: &mut Session, message: &str) -> Response {
    redirect_with(session, INDEX, FlashKind::Warning, message)
}

/// GET /usuario - 用户面板 (公开)
pub async fn index(State(state): State<ServerState>, mut session: Session) -> Response {
    let result = async {
        let usuario = match session.user() {
            Some(logado) => UsuarioRepository::new(&state.db).find_one(logado.id).await?,
            None => None,
        };
        Page::new("usuario/index.html", "Painel de Usuário")
            .with("usuario", &usuario)
            .render(&state, &session)
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, "/", e))
}

/// GET /usuario/create
pub async fn create(State(state): State<ServerState>, mut session: Session) -> Response {
    Page::new("usuario/create.html", "Criar Usuário")
        .render(&state, &session)
        .unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// POST /usuario - 注册
pub async fn store(
    State(state): State<ServerState>,
    mut session: Session,
    submitted: Result<Form<NovoUsuario>, FormRejection>,
) -> Response {
    let result = async {
        let novo = form(submitted)?;
        if novo.nome.trim().is_empty() || novo.email.trim().is_empty() || novo.senha.is_empty() {
            return Ok(warn(
                &mut session,
                "Todos os campos são obrigatórios para cadastrar um usuário.",
            ));
        }
        validate_required_text(&novo.nome, "nome", MAX_NAME_LEN)?;
        validate_email(&novo.email)?;
        validate_required_text(&novo.senha, "senha", MAX_PASSWORD_LEN)?;

        let repo = UsuarioRepository::new(&state.db);
        let usuario = match repo.save(&novo).await {
            Ok(usuario) => usuario,
            Err(RepoError::Duplicate(_)) => return Ok(warn(&mut session, "E-mail já cadastrado.")),
            Err(e) => return Err(e.into()),
        };
        tracing::info!(id = usuario.id, "Usuario registered");
        Ok::<_, AppError>(redirect_with(
            &mut session,
            INDEX,
            FlashKind::Success,
            format!("Usuário {} cadastrado com sucesso.", usuario.nome),
        ))
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// GET /usuario/login
pub async fn login_form(State(state): State<ServerState>, mut session: Session) -> Response {
    Page::new("usuario/login.html", "Login de usuário")
        .render(&state, &session)
        .unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// POST /usuario/login
pub async fn login(
    State(state): State<ServerState>,
    mut session: Session,
    submitted: Result<Form<Credenciais>, FormRejection>,
) -> Response {
    let result = async {
        let credenciais = form(submitted)?;
        if credenciais.email.trim().is_empty() || credenciais.senha.is_empty() {
            return Ok(warn(&mut session, "E-mail e senha são obrigatórios."));
        }

        let repo = UsuarioRepository::new(&state.db);
        let Some(usuario) = repo
            .validate_user(&credenciais.email, &credenciais.senha)
            .await?
        else {
            security_log!("WARN", "web_login_failed", email = credenciais.email.as_str());
            return Ok(redirect_with(
                &mut session,
                INDEX,
                FlashKind::Danger,
                "E-mail ou senha inválidos.",
            ));
        };

        security_log!("INFO", "web_login_success", user_id = usuario.id);
        session.login(SessionUser::from(&usuario));
        Ok::<_, AppError>(redirect_with(
            &mut session,
            INDEX,
            FlashKind::Success,
            format!("Bem-vindo, {}!", usuario.nome),
        ))
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// POST /usuario/logout
pub async fn logout(mut session: Session) -> Response {
    session.logout();
    redirect_with(&mut session, INDEX, FlashKind::Success, "Usuário desautenticado.")
}

/// GET /usuario/{id}
pub async fn show(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    render_owned(
        &state,
        &mut session,
        path_id(id),
        "usuario/show.html",
        "Detalhes do Usuário",
    )
    .await
}

/// GET /usuario/{id}/edit
pub async fn edit(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    render_owned(
        &state,
        &mut session,
        path_id(id),
        "usuario/edit.html",
        "Editar Usuário",
    )
    .await
}

/// GET /usuario/{id}/editemailpassword
pub async fn edit_email_senha(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    render_owned(
        &state,
        &mut session,
        path_id(id),
        "usuario/edit_email_senha.html",
        "Editar E-mail e Senha",
    )
    .await
}

/// Profile pages of someone else read as "not found"
async fn render_owned(
    state: &ServerState,
    session: &mut Session,
    id: AppResult<i64>,
    template: &'static str,
    title: &str,
) -> Response {
    let repo = UsuarioRepository::new(&state.db);
    let found = match id {
        Ok(id) => lookup(&repo, session, id).await,
        Err(e) => Err(e),
    };
    let result = match found {
        Ok(Lookup::Found(usuario)) => Page::new(template, title)
            .with("usuario", &usuario)
            .render(state, session),
        Ok(Lookup::Missing | Lookup::NotOwner) => Ok(warn(session, NOT_FOUND)),
        Err(e) => Err(e),
    };
    result.unwrap_or_else(|e| fail(session, INDEX, e))
}

/// PUT /usuario/{id} - 修改用户名并刷新会话
pub async fn update(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
    submitted: Result<Form<UsuarioUpdate>, FormRejection>,
) -> Response {
    let result = async {
        let id = path_id(id)?;
        let input = form(submitted)?;
        validate_required_text(&input.nome, "nome", MAX_NAME_LEN)?;

        let repo = UsuarioRepository::new(&state.db);
        let mut usuario = match lookup(&repo, &session, id).await? {
            Lookup::Found(usuario) => usuario,
            Lookup::Missing => return Ok(warn(&mut session, NOT_FOUND)),
            Lookup::NotOwner => return Ok(warn(&mut session, NOT_OWNER)),
        };
        usuario.nome = input.nome;
        let usuario = repo.update(&usuario).await?;

        session.set_user(SessionUser::from(&usuario));
        Ok::<_, AppError>(redirect_with(
            &mut session,
            INDEX,
            FlashKind::Success,
            format!("Usuário {} atualizado com sucesso.", usuario.nome),
        ))
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// PUT /usuario/{id}/editemailpassword - 修改邮箱和密码，之后需要重新登录
pub async fn update_email_senha(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
    submitted: Result<Form<Credenciais>, FormRejection>,
) -> Response {
    let result = async {
        let id = path_id(id)?;
        let credenciais = form(submitted)?;
        if credenciais.email.trim().is_empty() || credenciais.senha.is_empty() {
            return Ok(warn(&mut session, "E-mail e senha são obrigatórios."));
        }
        validate_email(&credenciais.email)?;
        validate_required_text(&credenciais.senha, "senha", MAX_PASSWORD_LEN)?;

        let repo = UsuarioRepository::new(&state.db);
        let usuario = match lookup(&repo, &session, id).await? {
            Lookup::Found(usuario) => usuario,
            Lookup::Missing => return Ok(warn(&mut session, NOT_FOUND)),
            Lookup::NotOwner => return Ok(warn(&mut session, NOT_OWNER)),
        };
        let usuario = match repo
            .update_email_senha(&usuario, &credenciais.email, &credenciais.senha)
            .await
        {
            Ok(usuario) => usuario,
            Err(RepoError::Duplicate(_)) => return Ok(warn(&mut session, "E-mail já cadastrado.")),
            Err(e) => return Err(e.into()),
        };

        security_log!("INFO", "credentials_changed", user_id = usuario.id);
        session.logout();
        Ok::<_, AppError>(redirect_with(
            &mut session,
            INDEX,
            FlashKind::Success,
            format!("Usuário {} atualizado com sucesso.", usuario.nome),
        ))
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}

/// DELETE /usuario/{id} - 删除账号并退出登录
pub async fn destroy(
    State(state): State<ServerState>,
    mut session: Session,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let result = async {
        let id = path_id(id)?;
        let repo = UsuarioRepository::new(&state.db);
        let usuario = match lookup(&repo, &session, id).await? {
            Lookup::Found(usuario) => usuario,
            Lookup::Missing => return Ok(warn(&mut session, NOT_FOUND)),
            Lookup::NotOwner => return Ok(warn(&mut session, NOT_OWNER)),
        };
        let usuario = repo.delete(usuario).await?;

        session.logout();
        Ok::<_, AppError>(redirect_with(
            &mut session,
            INDEX,
            FlashKind::Success,
            format!("Usuário {} removido com sucesso.", usuario.nome),
        ))
    }
    .await;
    result.unwrap_or_else(|e| fail(&mut session, INDEX, e))
}
