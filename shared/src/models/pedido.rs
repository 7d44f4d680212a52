//! Pedido Model

use super::Estado;
use serde::{Deserialize, Serialize};

/// Pedido entity (an order opened on a Mesa)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Pedido {
    pub id: i64,
    #[serde(rename = "Mesa_id")]
    #[cfg_attr(feature = "db", sqlx(rename = "Mesa_id"))]
    pub mesa_id: i64,
    pub estado: Estado,
    #[cfg_attr(feature = "db", sqlx(rename = "dataCriacao"))]
    pub data_criacao: i64,
    #[cfg_attr(feature = "db", sqlx(rename = "dataAtualizacao"))]
    pub data_atualizacao: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PedidoInput {
    #[serde(rename = "Mesa_id")]
    pub mesa_id: i64,
    #[serde(default)]
    pub estado: Estado,
}

impl Pedido {
    pub fn apply(&mut self, input: PedidoInput) {
        self.mesa_id = input.mesa_id;
        self.estado = input.estado;
    }
}
