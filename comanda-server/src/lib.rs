//! Comanda Server - 餐厅点单管理
//!
//! # 架构概述
//!
//! 单进程 HTTP 服务，同一数据库上提供两套入口：
//!
//! - **JSON API** (`api`): `/api/...`，Bearer JWT 认证
//! - **Web 页面** (`web`): 服务端渲染 HTML，会话 + flash 消息
//! - **数据库** (`db`): SQLite，按表结构描述生成 SQL 的通用记录映射
//! - **认证** (`auth`): JWT、SHA-512 密码摘要、会话存储
//!
//! # 模块结构
//!
//! ```text
//! comanda-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT、密码、会话
//! ├── db/            # 连接、表结构、映射、仓储
//! ├── api/           # JSON 路由和处理器
//! ├── web/           # 页面路由、模板、方法覆盖
//! ├── routes/        # 路由组装与中间件栈
//! ├── middleware/    # 请求日志
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod middleware;
pub mod routes;
pub mod utils;
pub mod web;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState};
pub use db::DbService;
pub use routes::build_app;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

use tracing_appender::non_blocking::WorkerGuard;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 `.env` 并初始化日志
///
/// The returned guard flushes the file logger and must live as long as the
/// process.
pub fn setup_environment() -> Option<WorkerGuard> {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty());
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref())
}

pub fn print_banner() {
    println!(
        r#"
   ______                                __
  / ____/___  ____ ___  ____ _____  ____/ /___ _
 / /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/
    "#
    );
}
