//! 统一错误模型
//! 定义安全核心库的所有错误类型

use thiserror::Error;

/// 结果类型别名
pub type Result<T> = std::result::Result<T, SecurityError>;

/// 安全核心错误类型
#[derive(Debug, Error)]
pub enum SecurityError {
    /// Token is malformed or its signature does not match the configured
    /// secret. Always means "unauthenticated"; never retried.
    #[error("invalid token signature")]
    InvalidSignature,

    /// Ciphertext was not produced under the current key, or has been
    /// corrupted or truncated. Recoverable: the caller decides whether to
    /// treat the value as absent.
    #[error("decryption failed")]
    DecryptionFailed,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl SecurityError {
    // 便捷方法
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        SecurityError::InvalidInput(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        SecurityError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        SecurityError::Internal(msg.into())
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for SecurityError {
    fn from(e: config::ConfigError) -> Self {
        SecurityError::Config(e.to_string())
    }
}
