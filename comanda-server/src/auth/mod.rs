//! 认证模块
//!
//! - [`JwtService`] - API 令牌服务
//! - [`CurrentUser`] - API 当前用户
//! - [`require_auth`] - API 认证中间件
//! - [`Session`] / [`require_session`] - Web 会话与守卫
//! - [`password`] - 密码哈希

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod session;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use session::{Flash, FlashKind, Session, SessionStore, SessionUser, require_session};
