//! JSON API integration tests

mod common;

use axum::body::Body;
use common::{TEST_SECRET, TestApp, json_request};
use comanda_server::JwtService;
use comanda_server::auth::JwtConfig;
use http::{Request, StatusCode, header};
use serde_json::json;

const EMAIL: &str = "ana@example.com";
const SENHA: &str = "segredo123";

async fn app_with_token() -> (TestApp, String) {
    let app = TestApp::new().await;
    app.create_user("Ana", EMAIL, SENHA).await;
    let token = app.token(EMAIL, SENHA).await;
    (app, token)
}

#[tokio::test]
async fn test_missing_token_is_forbidden() {
    let app = TestApp::new().await;
    let response = app.send(json_request("GET", "/api/mesa", None, None)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.json()["code"], 1005);
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let app = TestApp::new().await;
    let response = app
        .send(json_request("GET", "/api/mesa", Some("not-a-jwt"), None))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["code"], 1004);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = TestApp::new().await;
    let other = JwtService::with_config(JwtConfig::new(
        "another-secret-another-secret-another-secret-another-secret",
    ));
    let token = other.generate_token(1, "Intrusa").unwrap();
    let response = app
        .send(json_request("GET", "/api/mesa", Some(&token), None))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new().await;
    let ana = app.create_user("Ana", EMAIL, SENHA).await;

    let mut config = JwtConfig::new(TEST_SECRET);
    config.expiration_minutes = -5;
    let token = JwtService::with_config(config)
        .generate_token(ana.id, &ana.nome)
        .unwrap();

    let response = app
        .send(json_request("GET", "/api/mesa", Some(&token), None))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["code"], 1003);
}

#[tokio::test]
async fn test_blank_authorization_header_counts_as_missing() {
    let app = TestApp::new().await;
    for value in ["", "   "] {
        let request = Request::builder()
            .method("GET")
            .uri("/api/mesa")
            .header(header::AUTHORIZATION, value)
            .body(Body::empty())
            .unwrap();
        let response = app.send(request).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "header {value:?}");
        assert_eq!(response.json()["code"], 1005, "header {value:?}");
    }
}

#[tokio::test]
async fn test_login_success_and_failure() {
    let app = TestApp::new().await;
    app.create_user("Ana", EMAIL, SENHA).await;

    let ok = app
        .send(json_request(
            "POST",
            "/api/usuario/login",
            None,
            Some(json!({ "usuario": { "email": EMAIL, "senha": SENHA } })),
        ))
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert!(ok.json()["token"].as_str().is_some_and(|t| !t.is_empty()));

    let wrong = app
        .send(json_request(
            "POST",
            "/api/usuario/login",
            None,
            Some(json!({ "usuario": { "email": EMAIL, "senha": "errada" } })),
        ))
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.json()["code"], 1002);

    let empty = app
        .send(json_request(
            "POST",
            "/api/usuario/login",
            None,
            Some(json!({ "usuario": { "email": "", "senha": "" } })),
        ))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.json()["code"], 2);
}

#[tokio::test]
async fn test_malformed_body_is_invalid_request() {
    let (app, token) = app_with_token().await;
    let response = app
        .send(json_request("POST", "/api/mesa", Some(&token), Some(json!({ "numero": 1 }))))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], 5);
}

#[tokio::test]
async fn test_mesa_crud() {
    let (app, token) = app_with_token().await;

    let created = app
        .send(json_request(
            "POST",
            "/api/mesa",
            Some(&token),
            Some(json!({ "mesa": { "numero": 7 } })),
        ))
        .await;
    assert_eq!(created.status, StatusCode::OK);
    let mesa = created.json();
    let id = mesa["id"].as_i64().unwrap();
    assert_eq!(mesa["numero"], 7);
    assert_eq!(mesa["estado"], "A");

    let fetched = app
        .send(json_request("GET", &format!("/api/mesa/{id}"), Some(&token), None))
        .await;
    assert_eq!(fetched.json(), mesa);

    let updated = app
        .send(json_request(
            "PUT",
            &format!("/api/mesa/{id}"),
            Some(&token),
            Some(json!({ "mesa": { "numero": 8, "estado": "I" } })),
        ))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    let updated = updated.json();
    assert_eq!(updated["numero"], 8);
    assert_eq!(updated["estado"], "I");
    assert!(updated["dataAtualizacao"].as_i64() > mesa["dataAtualizacao"].as_i64());
    assert_eq!(updated["dataCriacao"], mesa["dataCriacao"]);

    let list = app.send(json_request("GET", "/api/mesa", Some(&token), None)).await;
    assert_eq!(list.json().as_array().map(Vec::len), Some(1));

    let deleted = app
        .send(json_request("DELETE", &format!("/api/mesa/{id}"), Some(&token), None))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.json()["id"], id);

    let gone = app
        .send(json_request("GET", &format!("/api/mesa/{id}"), Some(&token), None))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.json()["code"], 3);
}

#[tokio::test]
async fn test_negative_mesa_numero_is_validation_error() {
    let (app, token) = app_with_token().await;
    let response = app
        .send(json_request(
            "POST",
            "/api/mesa",
            Some(&token),
            Some(json!({ "mesa": { "numero": -1 } })),
        ))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], 2);
}

#[tokio::test]
async fn test_produto_with_tipo_descricao() {
    let (app, token) = app_with_token().await;

    let tipo = app
        .send(json_request(
            "POST",
            "/api/tipoproduto",
            Some(&token),
            Some(json!({ "tipoProduto": { "descricao": "Bebida" } })),
        ))
        .await
        .json();

    let produto = app
        .send(json_request(
            "POST",
            "/api/produto",
            Some(&token),
            Some(json!({ "produto": {
                "numero": 10,
                "nome": "Suco",
                "preco": 6.5,
                "TipoProduto_id": tipo["id"],
                "ingredientes": "laranja"
            } })),
        ))
        .await;
    assert_eq!(produto.status, StatusCode::OK);
    let produto = produto.json();
    assert_eq!(produto["nome"], "Suco");
    assert_eq!(produto["TipoProduto_id"], tipo["id"]);

    let fetched = app
        .send(json_request(
            "GET",
            &format!("/api/produto/{}", produto["id"]),
            Some(&token),
            None,
        ))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json()["nome"], "Suco");
}

#[tokio::test]
async fn test_pedido_and_lines_by_mesa() {
    let (app, token) = app_with_token().await;
    let post = |uri: &'static str, body: serde_json::Value| {
        json_request("POST", uri, Some(&token), Some(body))
    };

    let mesa = app.send(post("/api/mesa", json!({ "mesa": { "numero": 1 } }))).await.json();
    let tipo = app
        .send(post("/api/tipoproduto", json!({ "tipoProduto": { "descricao": "Prato" } })))
        .await
        .json();
    let produto = app
        .send(post(
            "/api/produto",
            json!({ "produto": {
                "numero": 1, "nome": "Feijoada", "preco": 40.0, "TipoProduto_id": tipo["id"]
            } }),
        ))
        .await
        .json();
    let pedido = app
        .send(post("/api/pedido", json!({ "pedido": { "Mesa_id": mesa["id"] } })))
        .await
        .json();
    assert_eq!(pedido["estado"], "A");

    let linha = app
        .send(post(
            "/api/pedidoproduto",
            json!({ "pedidoProduto": {
                "Pedido_id": pedido["id"],
                "Produto_id": produto["id"],
                "precoVenda": 40.0,
                "quantidade": 2
            } }),
        ))
        .await;
    assert_eq!(linha.status, StatusCode::OK);
    assert_eq!(linha.json()["quantidade"], 2);

    let por_mesa = app
        .send(json_request(
            "GET",
            &format!("/api/pedido/mesa/{}", mesa["id"]),
            Some(&token),
            None,
        ))
        .await;
    assert_eq!(por_mesa.json().as_array().map(Vec::len), Some(1));

    let ativos = app
        .send(json_request(
            "GET",
            &format!("/api/pedidoproduto/ativo/mesa/{}", mesa["id"]),
            Some(&token),
            None,
        ))
        .await;
    assert_eq!(ativos.status, StatusCode::OK);
    let ativos = ativos.json();
    assert_eq!(ativos.as_array().map(Vec::len), Some(1));
    assert_eq!(ativos[0]["nome"], "Feijoada");
    assert_eq!(ativos[0]["Mesa_id"], mesa["id"]);

    let inativos = app
        .send(json_request(
            "GET",
            &format!("/api/pedidoproduto/inativo/mesa/{}", mesa["id"]),
            Some(&token),
            None,
        ))
        .await;
    assert_eq!(inativos.status, StatusCode::OK);
    assert_eq!(inativos.json(), json!([]));
}

#[tokio::test]
async fn test_pedido_produto_update_moves_key() {
    let (app, token) = app_with_token().await;
    let linha = |pedido: i64, produto: i64, quantidade: i64| {
        json!({ "pedidoProduto": {
            "Pedido_id": pedido, "Produto_id": produto, "precoVenda": 5.0, "quantidade": quantidade
        } })
    };

    let created = app
        .send(json_request("POST", "/api/pedidoproduto", Some(&token), Some(linha(1, 1, 1))))
        .await;
    assert_eq!(created.status, StatusCode::OK);

    let moved = app
        .send(json_request(
            "PUT",
            "/api/pedidoproduto/1/1",
            Some(&token),
            Some(linha(1, 2, 3)),
        ))
        .await;
    assert_eq!(moved.status, StatusCode::OK);
    assert_eq!(moved.json()["Produto_id"], 2);

    let old = app
        .send(json_request("GET", "/api/pedidoproduto/1/1", Some(&token), None))
        .await;
    assert_eq!(old.status, StatusCode::NOT_FOUND);

    let new = app
        .send(json_request("GET", "/api/pedidoproduto/1/2", Some(&token), None))
        .await;
    assert_eq!(new.json()["quantidade"], 3);
}

#[tokio::test]
async fn test_usuario_duplicate_email_conflicts() {
    let (app, token) = app_with_token().await;
    let response = app
        .send(json_request(
            "POST",
            "/api/usuario",
            Some(&token),
            Some(json!({ "usuario": { "nome": "Outra Ana", "email": EMAIL, "senha": "x1234567" } })),
        ))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.json()["code"], 4);
}

#[tokio::test]
async fn test_usuario_is_owner_only() {
    let (app, token) = app_with_token().await;
    let bruno = app.create_user("Bruno", "bruno@example.com", "outrasenha").await;

    let response = app
        .send(json_request(
            "GET",
            &format!("/api/usuario/{}", bruno.id),
            Some(&token),
            None,
        ))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.json()["code"], 2001);
}

#[tokio::test]
async fn test_usuario_never_exposes_senha() {
    let app = TestApp::new().await;
    let ana = app.create_user("Ana", EMAIL, SENHA).await;
    let token = app.token(EMAIL, SENHA).await;

    let response = app
        .send(json_request("GET", &format!("/api/usuario/{}", ana.id), Some(&token), None))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["email"], EMAIL);
    assert!(body.get("senha").is_none());
}

#[tokio::test]
async fn test_change_email_senha_then_login_again() {
    let app = TestApp::new().await;
    let ana = app.create_user("Ana", EMAIL, SENHA).await;
    let token = app.token(EMAIL, SENHA).await;

    let response = app
        .send(json_request(
            "PUT",
            &format!("/api/usuario/{}/emailsenha", ana.id),
            Some(&token),
            Some(json!({ "usuario": { "email": "ana@novo.com", "senha": "novasenha" } })),
        ))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.text());

    let old = app
        .send(json_request(
            "POST",
            "/api/usuario/login",
            None,
            Some(json!({ "usuario": { "email": EMAIL, "senha": SENHA } })),
        ))
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    app.token("ana@novo.com", "novasenha").await;
}

#[tokio::test]
async fn test_response_carries_request_id() {
    let app = TestApp::new().await;
    let response = app.send(json_request("GET", "/api/mesa", None, None)).await;
    assert!(response.headers.contains_key("x-request-id"));
}
