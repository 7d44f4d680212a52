//! Mesa Model

use super::Estado;
use serde::{Deserialize, Serialize};

/// Mesa entity (a physical table in the restaurant)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Mesa {
    pub id: i64,
    pub numero: i64,
    pub estado: Estado,
    #[cfg_attr(feature = "db", sqlx(rename = "dataCriacao"))]
    pub data_criacao: i64,
    #[cfg_attr(feature = "db", sqlx(rename = "dataAtualizacao"))]
    pub data_atualizacao: i64,
}

/// Mesa payload (create and update)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MesaInput {
    pub numero: i64,
    #[serde(default)]
    pub estado: Estado,
}

impl Mesa {
    /// Overwrite the caller-controlled fields
    pub fn apply(&mut self, input: MesaInput) {
        self.numero = input.numero;
        self.estado = input.estado;
    }
}
