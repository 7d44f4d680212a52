//! Produto Model

use serde::{Deserialize, Serialize};

/// Produto entity
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    pub id: i64,
    pub numero: i64,
    pub nome: String,
    pub preco: f64,
    #[serde(rename = "TipoProduto_id")]
    #[cfg_attr(feature = "db", sqlx(rename = "TipoProduto_id"))]
    pub tipo_produto_id: i64,
    pub ingredientes: Option<String>,
    #[cfg_attr(feature = "db", sqlx(rename = "dataCriacao"))]
    pub data_criacao: i64,
    #[cfg_attr(feature = "db", sqlx(rename = "dataAtualizacao"))]
    pub data_atualizacao: i64,
}

/// Produto joined with its category description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProdutoDetalhado {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub produto: Produto,
    pub descricao: String,
}

/// Produto payload (create and update)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProdutoInput {
    pub numero: i64,
    pub nome: String,
    pub preco: f64,
    #[serde(rename = "TipoProduto_id")]
    pub tipo_produto_id: i64,
    #[serde(default)]
    pub ingredientes: Option<String>,
}

impl Produto {
    pub fn apply(&mut self, input: ProdutoInput) {
        self.numero = input.numero;
        self.nome = input.nome;
        self.preco = input.preco;
        self.tipo_produto_id = input.tipo_produto_id;
        self.ingredientes = input.ingredientes;
    }
}
