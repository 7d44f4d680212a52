//! PedidoProduto Repository
//!
//! Order lines are keyed by `(Pedido_id, Produto_id)`. Both key columns are
//! written on insert, and a line can be moved to a new key on update.

use super::{RepoError, RepoResult};
use crate::db::mapper::{Record, RecordKey, RecordMapper, SqlValue};
use crate::db::schema::{DATA_ATUALIZACAO, DATA_CRIACAO, Schema, TableSchema};
use crate::db::DbService;
use shared::models::{Estado, PedidoProduto, PedidoProdutoDetalhado};
use shared::util::advance_millis;

impl Record for PedidoProduto {
    const TABLE: &'static str = "PedidoProduto";
    const INSERTABLE: Option<&'static [&'static str]> = Some(&[
        "Pedido_id",
        "Produto_id",
        "precoVenda",
        "quantidade",
        "estadoValorAnulado",
        "estadoPago",
        "estadoCupomImpresso",
        "estadoComandaImpressa",
        "estadoRecebido",
        "observacao",
    ]);

    fn table(schema: &Schema) -> &TableSchema {
        &schema.pedido_produto
    }

    fn column_value(&self, column: &str) -> Option<SqlValue> {
        let value = match column {
            "Pedido_id" => self.pedido_id.into(),
            "Produto_id" => self.produto_id.into(),
            "precoVenda" => self.preco_venda.into(),
            "quantidade" => self.quantidade.into(),
            "estadoValorAnulado" => self.estado_valor_anulado.into(),
            "estadoPago" => self.estado_pago.into(),
            "estadoCupomImpresso" => self.estado_cupom_impresso.into(),
            "estadoComandaImpressa" => self.estado_comanda_impressa.into(),
            "estadoRecebido" => self.estado_recebido.into(),
            "observacao" => self.observacao.clone().into(),
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

const SELECT_POR_MESA: &str = "SELECT PedidoProduto.*, Pedido.Mesa_id, Pedido.estado, Produto.nome \
     FROM PedidoProduto \
     JOIN Pedido ON PedidoProduto.Pedido_id = Pedido.id \
     JOIN Produto ON PedidoProduto.Produto_id = Produto.id \
     WHERE Pedido.Mesa_id = ? AND Pedido.estado = ? \
     ORDER BY PedidoProduto.Pedido_id DESC";

const UPDATE_COM_CHAVE: &str = "UPDATE PedidoProduto SET \
     Pedido_id = ?, Produto_id = ?, precoVenda = ?, quantidade = ?, \
     estadoValorAnulado = ?, estadoPago = ?, estadoCupomImpresso = ?, \
     estadoComandaImpressa = ?, estadoRecebido = ?, observacao = ?, dataAtualizacao = ? \
     WHERE Pedido_id = ? AND Produto_id = ?";

#[derive(Clone)]
pub struct PedidoProdutoRepository {
    mapper: RecordMapper<PedidoProduto>,
}

impl PedidoProdutoRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            mapper: RecordMapper::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<PedidoProduto>> {
        self.mapper.find_all().await
    }

    pub async fn find_one(
        &self,
        pedido_id: i64,
        produto_id: i64,
    ) -> RepoResult<Option<PedidoProduto>> {
        self.mapper
            .find_one(RecordKey::composite([
                ("Pedido_id", pedido_id),
                ("Produto_id", produto_id),
            ]))
            .await
    }

    /// Lines of the table's active orders
    pub async fn find_all_by_mesa_active(
        &self,
        mesa_id: i64,
    ) -> RepoResult<Vec<PedidoProdutoDetalhado>> {
        self.find_all_by_mesa(mesa_id, Estado::Ativo).await
    }

    /// Lines of the table's closed orders
    pub async fn find_all_by_mesa_inactive(
        &self,
        mesa_id: i64,
    ) -> RepoResult<Vec<PedidoProdutoDetalhado>> {
        self.find_all_by_mesa(mesa_id, Estado::Inativo).await
    }

    async fn find_all_by_mesa(
        &self,
        mesa_id: i64,
        estado: Estado,
    ) -> RepoResult<Vec<PedidoProdutoDetalhado>> {
        let linhas = sqlx::query_as::<_, PedidoProdutoDetalhado>(SELECT_POR_MESA)
            .bind(mesa_id)
            .bind(estado.as_str())
            .fetch_all(self.mapper.pool())
            .await?;
        Ok(linhas)
    }

    pub async fn save(&self, linha: &PedidoProduto) -> RepoResult<PedidoProduto> {
        self.mapper.save(linha).await
    }

    /// Update in place, keyed by the line's own key
    pub async fn update(&self, linha: &PedidoProduto) -> RepoResult<PedidoProduto> {
        self.update_with_key(linha, linha.pedido_id, linha.produto_id)
            .await
    }

    /// Update the line stored under `(old_pedido_id, old_produto_id)`,
    /// writing every column of `linha` including its key
    pub async fn update_with_key(
        &self,
        linha: &PedidoProduto,
        old_pedido_id: i64,
        old_produto_id: i64,
    ) -> RepoResult<PedidoProduto> {
        let result = sqlx::query(UPDATE_COM_CHAVE)
            .bind(linha.pedido_id)
            .bind(linha.produto_id)
            .bind(linha.preco_venda)
            .bind(linha.quantidade)
            .bind(linha.estado_valor_anulado)
            .bind(linha.estado_pago)
            .bind(linha.estado_cupom_impresso)
            .bind(linha.estado_comanda_impressa)
            .bind(linha.estado_recebido)
            .bind(linha.observacao.as_deref())
            .bind(advance_millis(linha.data_atualizacao))
            .bind(old_pedido_id)
            .bind(old_produto_id)
            .execute(self.mapper.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!(
                "PedidoProduto ({old_pedido_id}, {old_produto_id})"
            )));
        }

        self.find_one(linha.pedido_id, linha.produto_id)
            .await?
            .ok_or_else(|| RepoError::NotFound("PedidoProduto vanished during update".into()))
    }

    pub async fn delete(&self, linha: PedidoProduto) -> RepoResult<PedidoProduto> {
        self.mapper.delete(linha).await
    }
}
