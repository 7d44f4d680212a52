//! Schema descriptor
//!
//! Column and primary-key layout of every table, read once from
//! `pragma_table_info` at startup. The descriptor is immutable and shared
//! by `Arc` with every repository; SQL text is derived from it.

use sqlx::SqlitePool;

use super::repository::{RepoError, RepoResult};

/// Creation timestamp column, written on insert only
pub const DATA_CRIACAO: &str = "dataCriacao";
/// Update timestamp column, written on insert and every update
pub const DATA_ATUALIZACAO: &str = "dataAtualizacao";

/// Column layout of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    name: String,
    columns: Vec<String>,
    primary_key: Vec<String>,
}

impl TableSchema {
    pub fn new(
        name: impl Into<String>,
        columns: Vec<String>,
        primary_key: Vec<String>,
    ) -> RepoResult<Self> {
        let name = name.into();
        if columns.is_empty() {
            return Err(RepoError::Database(format!("table {name} does not exist")));
        }
        if primary_key.is_empty() {
            return Err(RepoError::Database(format!("table {name} has no primary key")));
        }
        Ok(Self {
            name,
            columns,
            primary_key,
        })
    }

    /// Read the layout of `table` from the store
    pub async fn introspect(pool: &SqlitePool, table: &str) -> RepoResult<Self> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT name, pk FROM pragma_table_info(?) ORDER BY cid")
                .bind(table)
                .fetch_all(pool)
                .await?;

        let columns = rows.iter().map(|(name, _)| name.clone()).collect();

        // pk holds the 1-based position inside the primary key, 0 for other columns
        let mut keyed: Vec<(i64, String)> = rows
            .into_iter()
            .filter(|(_, pk)| *pk > 0)
            .map(|(name, pk)| (pk, name))
            .collect();
        keyed.sort_by_key(|(pk, _)| *pk);
        let primary_key = keyed.into_iter().map(|(_, name)| name).collect();

        Self::new(table, columns, primary_key)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn primary_key(&self) -> &[String] {
        &self.primary_key
    }

    pub fn is_composite(&self) -> bool {
        self.primary_key.len() > 1
    }

    /// Columns written by an insert, timestamps excluded
    ///
    /// Explicit overrides win; otherwise every column except the primary
    /// key and the two timestamps.
    pub fn insertable(&self, overrides: Option<&[&str]>) -> Vec<String> {
        overrides
            .map(to_strings)
            .unwrap_or_else(|| self.data_columns())
    }

    /// Columns written by an update, update timestamp excluded
    pub fn updatable(&self, overrides: Option<&[&str]>) -> Vec<String> {
        overrides
            .map(to_strings)
            .unwrap_or_else(|| self.data_columns())
    }

    fn data_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !self.primary_key.contains(c))
            .filter(|c| c.as_str() != DATA_CRIACAO && c.as_str() != DATA_ATUALIZACAO)
            .cloned()
            .collect()
    }

    // ========== SQL text ==========

    pub fn select_all_sql(&self) -> String {
        format!("SELECT * FROM {}", quote(&self.name))
    }

    pub fn select_one_sql(&self) -> String {
        format!(
            "SELECT * FROM {} WHERE {}",
            quote(&self.name),
            self.key_predicate()
        )
    }

    pub fn insert_sql(&self, columns: &[String]) -> String {
        let names: Vec<String> = columns.iter().map(|c| quote(c)).collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote(&self.name),
            names.join(", "),
            placeholders
        )
    }

    /// Bind order: `columns` first, then the primary key
    pub fn update_sql(&self, columns: &[String]) -> String {
        let assignments: Vec<String> = columns.iter().map(|c| format!("{} = ?", quote(c))).collect();
        format!(
            "UPDATE {} SET {} WHERE {}",
            quote(&self.name),
            assignments.join(", "),
            self.key_predicate()
        )
    }

    pub fn delete_sql(&self) -> String {
        format!(
            "DELETE FROM {} WHERE {}",
            quote(&self.name),
            self.key_predicate()
        )
    }

    fn key_predicate(&self) -> String {
        self.primary_key
            .iter()
            .map(|c| format!("{} = ?", quote(c)))
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

fn to_strings(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Layout of every table the application uses
#[derive(Debug, Clone)]
pub struct Schema {
    pub mesa: TableSchema,
    pub tipo_produto: TableSchema,
    pub produto: TableSchema,
    pub pedido: TableSchema,
    pub pedido_produto: TableSchema,
    pub usuario: TableSchema,
}

impl Schema {
    /// Introspect all tables; a missing table aborts startup
    pub async fn load(pool: &SqlitePool) -> RepoResult<Self> {
        let schema = Self {
            mesa: TableSchema::introspect(pool, "Mesa").await?,
            tipo_produto: TableSchema::introspect(pool, "TipoProduto").await?,
            produto: TableSchema::introspect(pool, "Produto").await?,
            pedido: TableSchema::introspect(pool, "Pedido").await?,
            pedido_produto: TableSchema::introspect(pool, "PedidoProduto").await?,
            usuario: TableSchema::introspect(pool, "Usuario").await?,
        };
        tracing::debug!(
            tables = 6,
            pedido_produto_key = ?schema.pedido_produto.primary_key(),
            "Schema descriptor loaded"
        );
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn mesa() -> TableSchema {
        TableSchema::new(
            "Mesa",
            strings(&["id", "numero", "estado", "dataCriacao", "dataAtualizacao"]),
            strings(&["id"]),
        )
        .unwrap()
    }

    fn pedido_produto() -> TableSchema {
        TableSchema::new(
            "PedidoProduto",
            strings(&[
                "Pedido_id",
                "Produto_id",
                "quantidade",
                "dataCriacao",
                "dataAtualizacao",
            ]),
            strings(&["Pedido_id", "Produto_id"]),
        )
        .unwrap()
    }

    #[test]
    fn test_insertable_drops_key_and_timestamps() {
        assert_eq!(mesa().insertable(None), strings(&["numero", "estado"]));
    }

    #[test]
    fn test_updatable_drops_key_and_timestamps() {
        assert_eq!(mesa().updatable(None), strings(&["numero", "estado"]));
        assert_eq!(pedido_produto().updatable(None), strings(&["quantidade"]));
    }

    #[test]
    fn test_overrides_win() {
        let table = pedido_produto();
        assert_eq!(
            table.insertable(Some(&["Pedido_id", "Produto_id", "quantidade"])),
            strings(&["Pedido_id", "Produto_id", "quantidade"])
        );
        assert_eq!(mesa().updatable(Some(&["numero"])), strings(&["numero"]));
    }

    #[test]
    fn test_sql_text() {
        let table = mesa();
        assert_eq!(table.select_all_sql(), r#"SELECT * FROM "Mesa""#);
        assert_eq!(
            table.select_one_sql(),
            r#"SELECT * FROM "Mesa" WHERE "id" = ?"#
        );
        assert_eq!(
            table.insert_sql(&strings(&["numero", "estado"])),
            r#"INSERT INTO "Mesa" ("numero", "estado") VALUES (?, ?)"#
        );
        assert_eq!(
            table.update_sql(&strings(&["numero", "dataAtualizacao"])),
            r#"UPDATE "Mesa" SET "numero" = ?, "dataAtualizacao" = ? WHERE "id" = ?"#
        );
        assert_eq!(table.delete_sql(), r#"DELETE FROM "Mesa" WHERE "id" = ?"#);
    }

    #[test]
    fn test_composite_key_predicate() {
        let table = pedido_produto();
        assert!(table.is_composite());
        assert_eq!(
            table.delete_sql(),
            r#"DELETE FROM "PedidoProduto" WHERE "Pedido_id" = ? AND "Produto_id" = ?"#
        );
    }

    #[test]
    fn test_missing_table_and_key_are_rejected() {
        assert!(TableSchema::new("Nada", vec![], vec![]).is_err());
        assert!(TableSchema::new("SemChave", strings(&["a"]), vec![]).is_err());
    }
}
