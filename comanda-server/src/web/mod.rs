//! Web 页面模块
//!
//! Server-rendered HTML pages. Outcomes are reported through a flash message
//! and a redirect (303) to the resource index, never through an error page.
//!
//! - [`home`] - 首页与资源菜单
//! - [`mesa`] / [`tipo_produto`] / [`produto`] - 资源页面 (需要登录)
//! - [`usuario`] - 用户面板、注册、登录

pub mod home;
pub mod mesa;
pub mod method_override;
pub mod produto;
pub mod tipo_produto;
pub mod usuario;
pub mod views;

use axum::extract::Path;
use axum::extract::rejection::{FormRejection, PathRejection};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Router, middleware};

use crate::auth::{FlashKind, Session, require_session};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

pub use method_override::method_override;

/// All page routes; resource pages sit behind the session guard
pub fn router(state: &ServerState) -> Router<ServerState> {
    let protected = Router::new()
        .merge(mesa::router())
        .merge(tipo_produto::router())
        .merge(produto::router())
        .merge(usuario::protected_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .merge(home::router())
        .merge(usuario::public_router())
        .merge(protected)
}

/// Unwrap a submitted form, turning a malformed body into a request error
pub(crate) fn form<T>(form: Result<Form<T>, FormRejection>) -> AppResult<T> {
    form.map(|Form(value)| value)
        .map_err(|rejection| AppError::invalid_request(rejection.body_text()))
}

/// Resource id from the path; a non-numeric segment becomes a request error
pub(crate) fn path_id(path: Result<Path<i64>, PathRejection>) -> AppResult<i64> {
    path.map(|Path(id)| id)
        .map_err(|rejection| AppError::invalid_request(rejection.body_text()))
}

/// Flash `message` and redirect to `to`
pub(crate) fn redirect_with(
    session: &mut Session,
    to: &str,
    kind: FlashKind,
    message: impl Into<String>,
) -> Response {
    session.flash(kind, message);
    Redirect::to(to).into_response()
}

/// Report a failed page action as a danger flash on `to`
pub(crate) fn fail(session: &mut Session, to: &str, err: AppError) -> Response {
    if err.code.category().is_internal() {
        tracing::error!(code = %err.code, message = %err.message, "Page action failed");
    } else {
        tracing::debug!(code = %err.code, message = %err.message, "Page action rejected");
    }
    redirect_with(session, to, FlashKind::Danger, err.public_message())
}

/// Empty optional text field → `None`
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
