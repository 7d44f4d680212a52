//! 首页与资源菜单 (公开)

use axum::extract::State;
use axum::response::Response;
use axum::{Router, routing::get};

use super::fail;
use super::views::Page;
use crate::auth::Session;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(index))
        .route("/recurso", get(recurso))
}

/// GET /
pub async fn index(State(state): State<ServerState>, mut session: Session) -> Response {
    Page::new("index.html", "Página inicial")
        .render(&state, &session)
        .unwrap_or_else(|e| fail(&mut session, "/usuario", e))
}

/// GET /recurso
pub async fn recurso(State(state): State<ServerState>, mut session: Session) -> Response {
    Page::new("recurso.html", "Recursos")
        .render(&state, &session)
        .unwrap_or_else(|e| fail(&mut session, "/usuario", e))
}
