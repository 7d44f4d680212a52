//! PedidoProduto Model

use super::Estado;
use serde::{Deserialize, Serialize};

/// Order line, keyed by (Pedido_id, Produto_id)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct PedidoProduto {
    #[serde(rename = "Pedido_id")]
    #[cfg_attr(feature = "db", sqlx(rename = "Pedido_id"))]
    pub pedido_id: i64,
    #[serde(rename = "Produto_id")]
    #[cfg_attr(feature = "db", sqlx(rename = "Produto_id"))]
    pub produto_id: i64,
    #[cfg_attr(feature = "db", sqlx(rename = "precoVenda"))]
    pub preco_venda: f64,
    pub quantidade: i64,
    #[cfg_attr(feature = "db", sqlx(rename = "estadoValorAnulado"))]
    pub estado_valor_anulado: bool,
    #[cfg_attr(feature = "db", sqlx(rename = "estadoPago"))]
    pub estado_pago: bool,
    #[cfg_attr(feature = "db", sqlx(rename = "estadoCupomImpresso"))]
    pub estado_cupom_impresso: bool,
    #[cfg_attr(feature = "db", sqlx(rename = "estadoComandaImpressa"))]
    pub estado_comanda_impressa: bool,
    #[cfg_attr(feature = "db", sqlx(rename = "estadoRecebido"))]
    pub estado_recebido: bool,
    pub observacao: Option<String>,
    #[cfg_attr(feature = "db", sqlx(rename = "dataCriacao"))]
    pub data_criacao: i64,
    #[cfg_attr(feature = "db", sqlx(rename = "dataAtualizacao"))]
    pub data_atualizacao: i64,
}

/// Order line joined with its order and product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PedidoProdutoDetalhado {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub linha: PedidoProduto,
    #[serde(rename = "Mesa_id")]
    #[cfg_attr(feature = "db", sqlx(rename = "Mesa_id"))]
    pub mesa_id: i64,
    pub estado: Estado,
    pub nome: String,
}

/// Order line payload (create and update)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedidoProdutoInput {
    #[serde(rename = "Pedido_id")]
    pub pedido_id: i64,
    #[serde(rename = "Produto_id")]
    pub produto_id: i64,
    pub preco_venda: f64,
    pub quantidade: i64,
    #[serde(default)]
    pub estado_valor_anulado: bool,
    #[serde(default)]
    pub estado_pago: bool,
    #[serde(default)]
    pub estado_cupom_impresso: bool,
    #[serde(default)]
    pub estado_comanda_impressa: bool,
    #[serde(default)]
    pub estado_recebido: bool,
    #[serde(default)]
    pub observacao: Option<String>,
}

impl PedidoProduto {
    pub fn apply(&mut self, input: PedidoProdutoInput) {
        self.pedido_id = input.pedido_id;
        self.produto_id = input.produto_id;
        self.preco_venda = input.preco_venda;
        self.quantidade = input.quantidade;
        self.estado_valor_anulado = input.estado_valor_anulado;
        self.estado_pago = input.estado_pago;
        self.estado_cupom_impresso = input.estado_cupom_impresso;
        self.estado_comanda_impressa = input.estado_comanda_impressa;
        self.estado_recebido = input.estado_recebido;
        self.observacao = input.observacao;
    }
}
