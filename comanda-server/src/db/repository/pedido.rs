//! Pedido Repository

use super::RepoResult;
use crate::db::mapper::{Record, RecordMapper, SqlValue};
use crate::db::schema::{DATA_ATUALIZACAO, DATA_CRIACAO, Schema, TableSchema};
use crate::db::DbService;
use shared::models::Pedido;

impl Record for Pedido {
    const TABLE: &'static str = "Pedido";

    fn table(schema: &Schema) -> &TableSchema {
        &schema.pedido
    }

    fn column_value(&self, column: &str) -> Option<SqlValue> {
        let value = match column {
            "id" => self.id.into(),
            "Mesa_id" => self.mesa_id.into(),
            "estado" => self.estado.into(),
            DATA_CRIACAO => self.data_criacao.into(),
            DATA_ATUALIZACAO => self.data_atualizacao.into(),
            _ => return None,
        };
        Some(value)
    }

    fn updated_at(&self) -> i64 {
        self.data_atualizacao
    }
}

#[derive(Clone)]
pub struct PedidoRepository {
    mapper: RecordMapper<Pedido>,
}

impl PedidoRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            mapper: RecordMapper::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Pedido>> {
        self.mapper.find_all().await
    }

    pub async fn find_one(&self, id: i64) -> RepoResult<Option<Pedido>> {
        self.mapper.find_one(id).await
    }

    /// All orders opened on a table, newest first
    pub async fn find_by_mesa_id(&self, mesa_id: i64) -> RepoResult<Vec<Pedido>> {
        let pedidos = sqlx::query_as::<_, Pedido>(
            "SELECT * FROM Pedido WHERE Mesa_id = ? ORDER BY id DESC",
        )
        .bind(mesa_id)
        .fetch_all(self.mapper.pool())
        .await?;
        Ok(pedidos)
    }

    pub async fn save(&self, pedido: &Pedido) -> RepoResult<Pedido> {
        self.mapper.save(pedido).await
    }

    pub async fn update(&self, pedido: &Pedido) -> RepoResult<Pedido> {
        self.mapper.update(pedido).await
    }

    pub async fn delete(&self, pedido: Pedido) -> RepoResult<Pedido> {
        self.mapper.delete(pedido).await
    }
}
