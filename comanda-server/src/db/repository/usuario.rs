//! Usuario Repository
//!
//! Passwords are hashed here, never stored in plain text. A regular update
//! only touches `nome`; email and password change through
//! [`UsuarioRepository::update_email_senha`].

use super::{RepoError, RepoResult};
use crate::auth::password::{hash_password, verify_password};
use crate::db::mapper::{Record, RecordMapper, SqlValue};
use crate::db::schema::{DATA_ATUALIZACAO, DATA_CRIACAO, Schema, TableSchema};
use crate::db::DbService;
use shared::models::{NovoUsuario, Usuario};
use shared::util::advance_millis;

impl Record for Usuario {
    const TABLE: &'static str = "Usuario";
    const UPDATABLE: Option<&'static [&'static str]> = Some(&["nome"]);

    fn table(schema: &Schema) -> &TableSchema {
        &schema.usuario
    }

    fn column_value(&self, column: &str) -> Option<SqlValue> {
        let value = match column {
            "id" => self.id.into(),
            "nome" => self.nome.as_str().into(),
            "email" => self.email.as_str().into(),
            "senha" => self.senha.as_str().into(),
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
pub struct UsuarioRepository {
    mapper: RecordMapper<Usuario>,
}

impl UsuarioRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            mapper: RecordMapper::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Usuario>> {
        self.mapper.find_all().await
    }

    pub async fn find_one(&self, id: i64) -> RepoResult<Option<Usuario>> {
        self.mapper.find_one(id).await
    }

    pub async fn find_one_by_email(&self, email: &str) -> RepoResult<Option<Usuario>> {
        let usuario = sqlx::query_as::<_, Usuario>("SELECT * FROM Usuario WHERE email = ?")
            .bind(email)
            .fetch_optional(self.mapper.pool())
            .await?;
        Ok(usuario)
    }

    /// Create a user, hashing the plaintext password
    ///
    /// A taken email surfaces as [`RepoError::Duplicate`] before anything is
    /// written; the UNIQUE index stays as a backstop.
    pub async fn save(&self, novo: &NovoUsuario) -> RepoResult<Usuario> {
        self.ensure_email_free(&novo.email, None).await?;
        let usuario = Usuario {
            nome: novo.nome.clone(),
            email: novo.email.clone(),
            senha: hash_password(&novo.email, &novo.senha),
            ..Default::default()
        };
        self.mapper.save(&usuario).await
    }

    /// Update the name only
    pub async fn update(&self, usuario: &Usuario) -> RepoResult<Usuario> {
        self.mapper.update(usuario).await
    }

    /// User matching both email and password, if any
    pub async fn validate_user(&self, email: &str, senha: &str) -> RepoResult<Option<Usuario>> {
        let usuario = self
            .find_one_by_email(email)
            .await?
            .filter(|u| verify_password(email, senha, &u.senha));
        Ok(usuario)
    }

    /// Replace email and password; the hash is recomputed with the new email
    pub async fn update_email_senha(
        &self,
        usuario: &Usuario,
        email: &str,
        senha: &str,
    ) -> RepoResult<Usuario> {
        self.ensure_email_free(email, Some(usuario.id)).await?;
        let result = sqlx::query(
            "UPDATE Usuario SET email = ?, senha = ?, dataAtualizacao = ? WHERE id = ?",
        )
        .bind(email)
        .bind(hash_password(email, senha))
        .bind(advance_millis(usuario.data_atualizacao))
        .bind(usuario.id)
        .execute(self.mapper.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Usuario {}", usuario.id)));
        }

        self.find_one(usuario.id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Usuario {}", usuario.id)))
    }

    pub async fn delete(&self, usuario: Usuario) -> RepoResult<Usuario> {
        self.mapper.delete(usuario).await
    }

    /// 邮箱已被其他用户占用时返回 Duplicate
    async fn ensure_email_free(&self, email: &str, owner: Option<i64>) -> RepoResult<()> {
        match self.find_one_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => Err(RepoError::Duplicate(format!(
                "Usuario com e-mail {email} já existe"
            ))),
            _ => Ok(()),
        }
    }
}
