//! Shared helpers for the integration tests
#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, Bytes, to_bytes};
use http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use comanda_server::db::repository::UsuarioRepository;
use comanda_server::{Config, DbService, ServerState, build_app};
use shared::models::{NovoUsuario, Usuario};

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef0123456789abcdef";

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// `name=value` of the session cookie set by this response, if any
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter(|v| v.starts_with("comanda.sid="))
            .last()
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let db = DbService::in_memory().await.expect("in-memory database");
        let state = ServerState::with_db(Config::for_tests(TEST_SECRET), db).expect("state");
        let app = build_app(&state);
        Self { app, state }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.expect("infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn create_user(&self, nome: &str, email: &str, senha: &str) -> Usuario {
        UsuarioRepository::new(&self.state.db)
            .save(&NovoUsuario {
                nome: nome.into(),
                email: email.into(),
                senha: senha.into(),
            })
            .await
            .expect("create user")
    }

    /// Log in through the API and return the bearer token
    pub async fn token(&self, email: &str, senha: &str) -> String {
        let body = serde_json::json!({ "usuario": { "email": email, "senha": senha } });
        let response = self.send(json_request("POST", "/api/usuario/login", None, Some(body))).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        response.json()["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    /// Log in through the login page and return the session cookie
    pub async fn web_login(&self, email: &str, senha: &str) -> String {
        let response = self
            .send(form_request(
                "POST",
                "/usuario/login",
                None,
                &format!("email={email}&senha={senha}"),
            ))
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        response.session_cookie().expect("session cookie")
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

pub fn page_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

pub fn form_request(method: &str, uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).expect("request")
}
