//! Usuario API 模块
//!
//! `/api/usuario/login` is public; every other route requires a token, and
//! `/{id}` routes only serve the token's own user.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/usuario", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/login", post(handler::login))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/emailsenha", put(handler::update_email_senha))
}
