//! 共享安全核心库
//! 为各服务提供令牌签发、API Key、对称加密与密码哈希能力

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

pub use auth::{ApiKeyManager, CipherManager, PasswordHasher, TokenCheck, TokenData, TokenIssuer};
pub use config::{LoggingConfig, SecurityConfig, SigningAlgorithm};
pub use error::{Result, SecurityError};
