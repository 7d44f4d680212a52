//! Produto Repository

use super::RepoResult;
use crate::db::mapper::{Record, RecordMapper, SqlValue};
use crate::db::schema::{DATA_ATUALIZACAO, DATA_CRIACAO, Schema, TableSchema};
use crate::db::DbService;
use shared::models::{Produto, ProdutoDetalhado};

impl Record for Produto {
    const TABLE: &'static str = "Produto";

    fn table(schema: &Schema) -> &TableSchema {
        &schema.produto
    }

    fn column_value(&self, column: &str) -> Option<SqlValue> {
        let value = match column {
            "id" => self.id.into(),
            "numero" => self.numero.into(),
            "nome" => self.nome.as_str().into(),
            "preco" => self.preco.into(),
            "TipoProduto_id" => self.tipo_produto_id.into(),
            "ingredientes" => self.ingredientes.clone().into(),
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

const SELECT_DETALHADO: &str = "SELECT Produto.*, TipoProduto.descricao \
     FROM Produto \
     JOIN TipoProduto ON Produto.TipoProduto_id = TipoProduto.id";

#[derive(Clone)]
pub struct ProdutoRepository {
    mapper: RecordMapper<Produto>,
}

impl ProdutoRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            mapper: RecordMapper::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Produto>> {
        self.mapper.find_all().await
    }

    pub async fn find_one(&self, id: i64) -> RepoResult<Option<Produto>> {
        self.mapper.find_one(id).await
    }

    /// Produto plus its category description; `None` when either side is missing
    pub async fn find_one_with_tipo_produto_descricao(
        &self,
        id: i64,
    ) -> RepoResult<Option<ProdutoDetalhado>> {
        let sql = format!("{SELECT_DETALHADO} WHERE Produto.id = ?");
        let produto = sqlx::query_as::<_, ProdutoDetalhado>(&sql)
            .bind(id)
            .fetch_optional(self.mapper.pool())
            .await?;
        Ok(produto)
    }

    /// Every produto with a matching category, ordered by number
    pub async fn find_all_with_tipo_produto_descricao(&self) -> RepoResult<Vec<ProdutoDetalhado>> {
        let sql = format!("{SELECT_DETALHADO} ORDER BY Produto.numero");
        let produtos = sqlx::query_as::<_, ProdutoDetalhado>(&sql)
            .fetch_all(self.mapper.pool())
            .await?;
        Ok(produtos)
    }

    pub async fn save(&self, produto: &Produto) -> RepoResult<Produto> {
        self.mapper.save(produto).await
    }

    pub async fn update(&self, produto: &Produto) -> RepoResult<Produto> {
        self.mapper.update(produto).await
    }

    pub async fn delete(&self, produto: Produto) -> RepoResult<Produto> {
        self.mapper.delete(produto).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::TipoProdutoRepository;
    use shared::models::{ProdutoInput, TipoProduto};

    fn novo_produto(tipo_produto_id: i64) -> Produto {
        let mut produto = Produto::default();
        produto.apply(ProdutoInput {
            numero: 101,
            nome: "X-Salada".into(),
            preco: 18.5,
            tipo_produto_id,
            ingredientes: Some("pão, carne, alface".into()),
        });
        produto
    }

    #[tokio::test]
    async fn test_save_then_find_one() {
        let db = DbService::in_memory().await.unwrap();
        let repo = ProdutoRepository::new(&db);

        let saved = repo.save(&novo_produto(1)).await.unwrap();
        let found = repo.find_one(saved.id).await.unwrap().unwrap();
        assert_eq!(found, saved);
        assert_eq!(found.preco, 18.5);
        assert_eq!(found.ingredientes.as_deref(), Some("pão, carne, alface"));
    }

    #[tokio::test]
    async fn test_join_with_tipo_produto() {
        let db = DbService::in_memory().await.unwrap();
        let tipos = TipoProdutoRepository::new(&db);
        let repo = ProdutoRepository::new(&db);

        let lanche = tipos
            .save(&TipoProduto {
                descricao: "Lanches".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let saved = repo.save(&novo_produto(lanche.id)).await.unwrap();

        let detalhado = repo
            .find_one_with_tipo_produto_descricao(saved.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detalhado.produto, saved);
        assert_eq!(detalhado.descricao, "Lanches");

        let todos = repo.find_all_with_tipo_produto_descricao().await.unwrap();
        assert_eq!(todos.len(), 1);
    }

    /// Current behavior: nothing checks that the category exists.
    #[tokio::test]
    async fn test_missing_tipo_produto_is_accepted() {
        let db = DbService::in_memory().await.unwrap();
        let repo = ProdutoRepository::new(&db);

        let orphan = repo.save(&novo_produto(4040)).await.unwrap();
        assert_eq!(orphan.tipo_produto_id, 4040);

        // the join simply drops it
        assert!(
            repo.find_one_with_tipo_produto_descricao(orphan.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
