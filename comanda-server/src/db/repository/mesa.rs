//! Mesa Repository

use super::RepoResult;
use crate::db::mapper::{Record, RecordMapper, SqlValue};
use crate::db::schema::{DATA_ATUALIZACAO, DATA_CRIACAO, Schema, TableSchema};
use crate::db::DbService;
use shared::models::Mesa;

impl Record for Mesa {
    const TABLE: &'static str = "Mesa";

    fn table(schema: &Schema) -> &TableSchema {
        &schema.mesa
    }

    fn column_value(&self, column: &str) -> Option<SqlValue> {
        let value = match column {
            "id" => self.id.into(),
            "numero" => self.numero.into(),
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
pub struct MesaRepository {
    mapper: RecordMapper<Mesa>,
}

impl MesaRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            mapper: RecordMapper::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Mesa>> {
        self.mapper.find_all().await
    }

    pub async fn find_one(&self, id: i64) -> RepoResult<Option<Mesa>> {
        self.mapper.find_one(id).await
    }

    pub async fn save(&self, mesa: &Mesa) -> RepoResult<Mesa> {
        self.mapper.save(mesa).await
    }

    pub async fn update(&self, mesa: &Mesa) -> RepoResult<Mesa> {
        self.mapper.update(mesa).await
    }

    pub async fn delete(&self, mesa: Mesa) -> RepoResult<Mesa> {
        self.mapper.delete(mesa).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::RepoError;
    use shared::models::{Estado, MesaInput};

    async fn repo() -> MesaRepository {
        let db = DbService::in_memory().await.unwrap();
        MesaRepository::new(&db)
    }

    fn nova_mesa(numero: i64) -> Mesa {
        let mut mesa = Mesa::default();
        mesa.apply(MesaInput {
            numero,
            estado: Estado::Ativo,
        });
        mesa
    }

    #[tokio::test]
    async fn test_save_then_find_one() {
        let repo = repo().await;
        let saved = repo.save(&nova_mesa(12)).await.unwrap();

        assert!(saved.id > 0);
        assert!(saved.data_criacao > 0);
        assert_eq!(saved.data_criacao, saved.data_atualizacao);

        let found = repo.find_one(saved.id).await.unwrap().unwrap();
        assert_eq!(found, saved);
        assert_eq!(found.numero, 12);
        assert_eq!(found.estado, Estado::Ativo);
    }

    #[tokio::test]
    async fn test_update_keeps_key_and_creation_time() {
        let repo = repo().await;
        let saved = repo.save(&nova_mesa(1)).await.unwrap();

        let mut changed = saved.clone();
        changed.numero = 2;
        changed.estado = Estado::Inativo;
        // caller-supplied creation time is ignored
        changed.data_criacao = 42;

        let updated = repo.update(&changed).await.unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.numero, 2);
        assert_eq!(updated.estado, Estado::Inativo);
        assert_eq!(updated.data_criacao, saved.data_criacao);
        assert!(updated.data_atualizacao > saved.data_atualizacao);

        let again = repo.update(&updated).await.unwrap();
        assert!(again.data_atualizacao > updated.data_atualizacao);
    }

    #[tokio::test]
    async fn test_delete_then_not_found() {
        let repo = repo().await;
        let saved = repo.save(&nova_mesa(5)).await.unwrap();
        let id = saved.id;

        let deleted = repo.delete(saved).await.unwrap();
        assert_eq!(deleted.id, id);
        assert!(repo.find_one(id).await.unwrap().is_none());

        let err = repo.delete(deleted).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let repo = repo().await;
        let ghost = Mesa {
            id: 999,
            ..nova_mesa(9)
        };
        let err = repo.update(&ghost).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_find_all() {
        let repo = repo().await;
        assert!(repo.find_all().await.unwrap().is_empty());
        repo.save(&nova_mesa(1)).await.unwrap();
        repo.save(&nova_mesa(2)).await.unwrap();
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }
}
