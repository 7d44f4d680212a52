//! Web 会话
//!
//! 会话数据保存在服务端 ([`SessionStore`])，浏览器只持有一个签名 Cookie，
//! 值为随机会话 ID。闪现消息 (flash) 在下一次页面渲染时被取出并清除。

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use dashmap::DashMap;
use serde::Serialize;
use shared::util::now_millis;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies, Key};

use crate::core::ServerState;
use crate::utils::AppError;

/// 会话 Cookie 名称
pub const SESSION_COOKIE: &str = "comanda.sid";

/// 空闲会话的保留时间 (毫秒)
const SESSION_IDLE_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// 未登录访问受保护页面时的提示
pub const LOGIN_REQUIRED_MESSAGE: &str = "Você precisa estar autenticado para acessar esta página.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Warning,
    Danger,
}

/// One-shot message shown on the next rendered page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

/// 已登录的 Web 用户
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionUser {
    pub id: i64,
    pub nome: String,
    pub email: String,
}

#[derive(Debug, Clone, Default)]
struct SessionData {
    usuario: Option<SessionUser>,
    flash: Option<Flash>,
    touched_at: i64,
}

/// 服务端会话存储
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, SessionData>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建新会话并返回其 ID，同时清理过期会话
    fn create(&self) -> String {
        let now = now_millis();
        self.sessions
            .retain(|_, data| now - data.touched_at < SESSION_IDLE_MILLIS);

        let id = uuid::Uuid::new_v4().to_string();
        self.sessions.insert(
            id.clone(),
            SessionData {
                touched_at: now,
                ..Default::default()
            },
        );
        id
    }

    fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    fn with<T>(&self, id: &str, f: impl FnOnce(&mut SessionData) -> T) -> Option<T> {
        self.sessions.get_mut(id).map(|mut data| {
            data.touched_at = now_millis();
            f(&mut data)
        })
    }

    fn remove(&self, id: &str) {
        self.sessions.remove(id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// 当前请求的会话
///
/// The session is created lazily: a request that never writes to it does
/// not get a cookie.
pub struct Session {
    id: Option<String>,
    store: SessionStore,
    cookies: Cookies,
    key: Key,
}

impl Session {
    pub fn user(&self) -> Option<SessionUser> {
        self.id
            .as_deref()
            .and_then(|id| self.store.with(id, |data| data.usuario.clone()))
            .flatten()
    }

    /// Log `usuario` in under a fresh session id
    pub fn login(&mut self, usuario: SessionUser) {
        if let Some(old) = self.id.take() {
            self.store.remove(&old);
        }
        let id = self.ensure();
        self.store.with(&id, |data| data.usuario = Some(usuario));
    }

    /// Replace the logged-in user's data, e.g. after a profile update
    pub fn set_user(&mut self, usuario: SessionUser) {
        let id = self.ensure();
        self.store.with(&id, |data| data.usuario = Some(usuario));
    }

    pub fn logout(&mut self) {
        if let Some(id) = self.id.as_deref() {
            self.store.with(id, |data| data.usuario = None);
        }
    }

    pub fn flash(&mut self, kind: FlashKind, message: impl Into<String>) {
        let id = self.ensure();
        let flash = Flash {
            kind,
            message: message.into(),
        };
        self.store.with(&id, |data| data.flash = Some(flash));
    }

    /// Remove and return the pending flash message
    pub fn take_flash(&self) -> Option<Flash> {
        self.id
            .as_deref()
            .and_then(|id| self.store.with(id, |data| data.flash.take()))
            .flatten()
    }

    fn ensure(&mut self) -> String {
        if let Some(id) = &self.id {
            return id.clone();
        }

        let id = self.store.create();
        let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        self.cookies.signed(&self.key).add(cookie);
        self.id = Some(id.clone());
        id
    }
}

impl FromRequestParts<ServerState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::internal(msg))?;

        let id = cookies
            .signed(&state.cookie_key)
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|id| state.sessions.contains(id));

        Ok(Self {
            id,
            store: state.sessions.clone(),
            cookies,
            key: state.cookie_key.clone(),
        })
    }
}

/// 会话守卫 - 未登录时重定向到 `/usuario`
pub async fn require_session(mut session: Session, mut req: Request, next: Next) -> Response {
    match session.user() {
        Some(usuario) => {
            req.extensions_mut().insert(usuario.clone());
            let mut response = next.run(req).await;
            response.extensions_mut().insert(usuario);
            response
        }
        None => {
            tracing::debug!(uri = %req.uri(), "Web request without session user");
            session.flash(FlashKind::Danger, LOGIN_REQUIRED_MESSAGE);
            Redirect::to("/usuario").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_create_and_remove() {
        let store = SessionStore::new();
        let id = store.create();
        assert!(store.contains(&id));

        store.with(&id, |data| {
            data.flash = Some(Flash {
                kind: FlashKind::Success,
                message: "ok".into(),
            })
        });
        let taken = store.with(&id, |data| data.flash.take()).flatten();
        assert_eq!(taken.map(|f| f.kind), Some(FlashKind::Success));
        assert!(store.with(&id, |data| data.flash.take()).flatten().is_none());

        store.remove(&id);
        assert!(store.is_empty());
    }

    #[test]
    fn test_idle_sessions_are_purged() {
        let store = SessionStore::new();
        let stale = store.create();
        store.sessions.alter(&stale, |_, mut data| {
            data.touched_at -= SESSION_IDLE_MILLIS + 1;
            data
        });

        let fresh = store.create();
        assert!(!store.contains(&stale));
        assert!(store.contains(&fresh));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_flash_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&FlashKind::Danger).unwrap(),
            "\"danger\""
        );
    }
}
