//! TipoProduto Model

use serde::{Deserialize, Serialize};

/// Product category
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct TipoProduto {
    pub id: i64,
    pub descricao: String,
    #[cfg_attr(feature = "db", sqlx(rename = "dataCriacao"))]
    pub data_criacao: i64,
    #[cfg_attr(feature = "db", sqlx(rename = "dataAtualizacao"))]
    pub data_atualizacao: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipoProdutoInput {
    pub descricao: String,
}

impl TipoProduto {
    pub fn apply(&mut self, input: TipoProdutoInput) {
        self.descricao = input.descricao;
    }
}
