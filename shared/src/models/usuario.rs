//! Usuario Model

use serde::{Deserialize, Serialize};

/// Usuario entity
///
/// `senha` holds the password hash and is never serialized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: i64,
    pub nome: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub senha: String,
    #[cfg_attr(feature = "db", sqlx(rename = "dataCriacao"))]
    pub data_criacao: i64,
    #[cfg_attr(feature = "db", sqlx(rename = "dataAtualizacao"))]
    pub data_atualizacao: i64,
}

/// Create usuario payload (plaintext password)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NovoUsuario {
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub senha: String,
}

/// Update usuario payload; only the name is mutable this way
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsuarioUpdate {
    pub nome: String,
}

/// Credentials payload (login and email/password change)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credenciais {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub senha: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_senha_is_never_serialized() {
        let usuario = Usuario {
            id: 1,
            nome: "Ana".into(),
            email: "ana@example.com".into(),
            senha: "hash".into(),
            data_criacao: 10,
            data_atualizacao: 20,
        };
        let value = serde_json::to_value(&usuario).unwrap();
        assert!(value.get("senha").is_none());
        assert_eq!(value["dataCriacao"], 10);
    }
}
