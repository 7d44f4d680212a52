//! API 路由模块
//!
//! JSON 接口，除 `/api/usuario/login` 外都需要 Bearer 令牌。
//! 请求体按资源名包裹，例如 `{"mesa": {...}}`。
//!
//! - [`mesa`] - 桌台
//! - [`tipo_produto`] - 商品分类
//! - [`produto`] - 商品
//! - [`pedido`] - 订单
//! - [`pedido_produto`] - 订单明细
//! - [`usuario`] - 用户与登录

pub mod mesa;
pub mod pedido;
pub mod pedido_produto;
pub mod produto;
pub mod tipo_produto;
pub mod usuario;

use axum::extract::{FromRequest, Request};
use axum::{Router, middleware};
use serde::de::DeserializeOwned;

use crate::auth::require_auth;
use crate::core::ServerState;
use crate::utils::AppError;

/// All API routes behind the token guard
pub fn router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(mesa::router())
        .merge(tipo_produto::router())
        .merge(produto::router())
        .merge(pedido::router())
        .merge(pedido_produto::router())
        .merge(usuario::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

/// JSON body extractor whose rejection is an [`AppError`]
///
/// Malformed bodies and missing fields become `400 InvalidRequest` with the
/// usual error shape instead of axum's plain-text rejection.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::invalid_request(rejection.body_text()))?;
        Ok(Self(value))
    }
}
