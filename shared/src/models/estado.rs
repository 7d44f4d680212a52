//! Estado flag shared by Mesa and Pedido

use serde::{Deserialize, Serialize};
use std::fmt;

/// Open/active (`A`) or inactive (`I`) state, stored as a single letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum Estado {
    #[default]
    #[serde(rename = "A")]
    #[cfg_attr(feature = "db", sqlx(rename = "A"))]
    Ativo,
    #[serde(rename = "I")]
    #[cfg_attr(feature = "db", sqlx(rename = "I"))]
    Inativo,
}

impl Estado {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Estado::Ativo => "A",
            Estado::Inativo => "I",
        }
    }
}

impl fmt::Display for Estado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
