//! 认证中间件
//!
//! API 路由的 JWT 认证

use axum::{
    extract::{OriginalUri, Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// 无需令牌的 API 路径
const PUBLIC_API_ROUTES: &[&str] = &["/api/usuario/login"];

/// 认证中间件 - 要求有效的 Bearer 令牌
///
/// 验证成功后将 [`CurrentUser`] 注入请求扩展，并复制到响应扩展供请求日志使用。
///
/// # 跳过认证
///
/// - `OPTIONS *` (CORS 预检)
/// - `/api/usuario/login`
///
/// # 错误处理
///
/// | 情况 | 结果 |
/// |------|------|
/// | 无 Authorization 头或头为空 | 403 TokenMissing |
/// | 格式错误 / 无效令牌 | 401 TokenInvalid |
/// | 令牌过期 | 401 TokenExpired |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    if PUBLIC_API_ROUTES.contains(&path.as_str()) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .filter(|h| !h.trim().is_empty());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = req.uri().to_string());
            return Err(AppError::token_missing());
        }
    };

    let user = authenticate(&state, token).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = e.to_string(),
            uri = req.uri().to_string()
        );
        e
    })?;

    req.extensions_mut().insert(user.clone());
    let mut response = next.run(req).await;
    response.extensions_mut().insert(user);
    Ok(response)
}

/// 验证令牌并解析当前用户
pub(crate) fn authenticate(state: &ServerState, token: &str) -> Result<CurrentUser, AppError> {
    let claims = state
        .get_jwt_service()
        .validate_token(token)
        .map_err(|e| match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        })?;

    CurrentUser::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {e}")))
}
