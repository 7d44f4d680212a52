//! 请求日志中间件
//!
//! 记录所有进入的 HTTP 请求，包含请求 ID、用户信息和状态码

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};

use crate::auth::{CurrentUser, SessionUser};

/// 请求日志中间件
///
/// One line when the request arrives, one when it leaves with status and
/// latency. 5xx is logged at WARN.
///
/// The authenticated user is only known after the auth layers ran, so it is
/// read from the response extensions on the way out.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        user_agent = %user_agent,
        "Request started"
    );

    let response = next.run(req).await;

    let status = response.status();
    let latency_ms = start.elapsed().as_millis() as u64;
    let user = user_label(&response);

    match status.as_u16() {
        500.. => warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms,
            user = ?user,
            "Request failed"
        ),
        400..500 => info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms,
            user = ?user,
            "Request rejected"
        ),
        _ => info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            latency_ms,
            user = ?user,
            "Request completed"
        ),
    }

    response
}

fn user_label(response: &Response) -> Option<String> {
    let extensions = response.extensions();
    extensions
        .get::<CurrentUser>()
        .map(|u| format!("{}({})", u.nome, u.id))
        .or_else(|| {
            extensions
                .get::<SessionUser>()
                .map(|u| format!("{}({})", u.nome, u.id))
        })
}
