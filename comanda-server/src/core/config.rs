use crate::auth::JwtConfig;
use crate::auth::jwt::{DEFAULT_EXPIRATION_MINUTES, generate_dev_secret};
use crate::utils::AppError;

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_URL | sqlite:comanda.db | SQLite 数据库 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | APP_SECRET | (开发环境随机生成) | 令牌与 Cookie 签名密钥 |
/// | JWT_EXPIRATION_MINUTES | 60 | 令牌有效期(分钟) |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | - | 日志文件目录 |
///
/// # 示例
///
/// ```ignore
/// APP_SECRET=... HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 数据库连接串
    pub database_url: String,
    /// HTTP 服务端口
    pub http_port: u16,
    /// JWT 认证配置 (密钥同时用于会话 Cookie 签名)
    pub jwt: JwtConfig,
    /// 运行环境: development | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 数值解析失败时使用默认值。生产环境必须设置 `APP_SECRET`。
    pub fn from_env() -> Result<Self, AppError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let secret = load_app_secret(&environment)?;

        let mut jwt = JwtConfig::new(secret);
        jwt.expiration_minutes = std::env::var("JWT_EXPIRATION_MINUTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_EXPIRATION_MINUTES);

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:comanda.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt,
            environment,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        })
    }

    /// 测试用配置: 内存数据库与固定密钥
    pub fn for_tests(secret: impl Into<String>) -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            http_port: 0,
            jwt: JwtConfig::new(secret),
            environment: "test".into(),
            log_level: "warn".into(),
            log_dir: None,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn load_app_secret(environment: &str) -> Result<String, AppError> {
    match std::env::var("APP_SECRET") {
        Ok(secret) if !secret.trim().is_empty() => Ok(secret),
        _ if environment == "production" => Err(AppError::internal(
            "APP_SECRET environment variable must be set in production",
        )),
        _ => {
            tracing::warn!("APP_SECRET not set! Generating a temporary secret for this process.");
            generate_dev_secret().map_err(|e| AppError::internal(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_for_tests() {
        let config = Config::for_tests("secret");
        assert_eq!(config.jwt.secret, "secret");
        assert_eq!(config.jwt.expiration_minutes, 60);
        assert!(!config.is_production());
    }

    #[test]
    fn test_missing_secret_outside_production_is_generated() {
        // ENVIRONMENT is passed explicitly; only APP_SECRET comes from the process
        if std::env::var("APP_SECRET").is_err() {
            let secret = load_app_secret("development").unwrap();
            assert_eq!(secret.len(), 64);
            assert!(load_app_secret("production").is_err());
        }
    }
}
