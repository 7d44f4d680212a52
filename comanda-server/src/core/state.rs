use std::sync::Arc;

use sha2::{Digest, Sha512};
use tower_cookies::Key;

use crate::auth::{JwtService, SessionStore};
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;
use crate::web::views::Views;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是浅拷贝 (Arc / 连接池句柄)，可以按值传给每个请求。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | SQLite 连接池与表结构描述 |
/// | jwt_service | API 令牌服务 |
/// | sessions | Web 会话存储 |
/// | cookie_key | 会话 Cookie 签名密钥 |
/// | views | 页面模板 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库服务
    pub db: DbService,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// Web 会话存储
    pub sessions: SessionStore,
    /// Cookie 签名密钥 (由 APP_SECRET 派生)
    pub cookie_key: Key,
    /// 页面模板
    pub views: Arc<Views>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 1. 数据库 (打开并执行迁移)
    /// 2. JWT 服务、会话存储、模板
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_url).await?;
        Self::with_db(config.clone(), db)
    }

    /// 使用已打开的数据库构造状态 (测试使用内存数据库)
    pub fn with_db(config: Config, db: DbService) -> Result<Self, AppError> {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let cookie_key = derive_cookie_key(&config.jwt.secret)?;
        let views = Arc::new(Views::new()?);

        Ok(Self {
            config,
            db,
            jwt_service,
            sessions: SessionStore::new(),
            cookie_key,
            views,
        })
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}

/// SHA-512 of the secret: exactly the 64 bytes a cookie key needs
fn derive_cookie_key(secret: &str) -> Result<Key, AppError> {
    let digest = Sha512::digest(secret.as_bytes());
    Key::try_from(digest.as_slice())
        .map_err(|e| AppError::internal(format!("Invalid cookie key: {e}")))
}
