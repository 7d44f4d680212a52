//! TipoProduto Repository

use super::RepoResult;
use crate::db::mapper::{Record, RecordMapper, SqlValue};
use crate::db::schema::{DATA_ATUALIZACAO, DATA_CRIACAO, Schema, TableSchema};
use crate::db::DbService;
use shared::models::TipoProduto;

impl Record for TipoProduto {
    const TABLE: &'static str = "TipoProduto";

    fn table(schema: &Schema) -> &TableSchema {
        &schema.tipo_produto
    }

    fn column_value(&self, column: &str) -> Option<SqlValue> {
        let value = match column {
            "id" => self.id.into(),
            "descricao" => self.descricao.as_str().into(),
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
pub struct TipoProdutoRepository {
    mapper: RecordMapper<TipoProduto>,
}

impl TipoProdutoRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            mapper: RecordMapper::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<TipoProduto>> {
        self.mapper.find_all().await
    }

    pub async fn find_one(&self, id: i64) -> RepoResult<Option<TipoProduto>> {
        self.mapper.find_one(id).await
    }

    pub async fn save(&self, tipo_produto: &TipoProduto) -> RepoResult<TipoProduto> {
        self.mapper.save(tipo_produto).await
    }

    pub async fn update(&self, tipo_produto: &TipoProduto) -> RepoResult<TipoProduto> {
        self.mapper.update(tipo_produto).await
    }

    pub async fn delete(&self, tipo_produto: TipoProduto) -> RepoResult<TipoProduto> {
        self.mapper.delete(tipo_produto).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_crud_cycle() {
        let db = DbService::in_memory().await.unwrap();
        let repo = TipoProdutoRepository::new(&db);

        let bebida = repo
            .save(&TipoProduto {
                descricao: "Bebidas".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(
            repo.find_one(bebida.id).await.unwrap().as_ref(),
            Some(&bebida)
        );

        let mut renamed = bebida.clone();
        renamed.descricao = "Bebidas geladas".into();
        let renamed = repo.update(&renamed).await.unwrap();
        assert_eq!(renamed.descricao, "Bebidas geladas");
        assert_eq!(renamed.data_criacao, bebida.data_criacao);

        repo.delete(renamed).await.unwrap();
        assert!(repo.find_one(bebida.id).await.unwrap().is_none());
    }
}
