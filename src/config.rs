//! 配置系统
//! 从环境变量加载安全配置，使用 Secret 包装敏感信息

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use config::{Config, ConfigError, Environment};
use rand::RngCore;
use secrecy::Secret;
use serde::Deserialize;

/// 对称加密密钥长度（字节）
pub const ENCRYPTION_KEY_SIZE: usize = 32;

/// 签名算法
///
/// Currently only HS256 is supported; the enum exists so additional
/// algorithms can be added without changing the token API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum SigningAlgorithm {
    #[default]
    #[serde(rename = "HS256")]
    Hs256,
}

impl SigningAlgorithm {
    pub fn as_jwt(self) -> jsonwebtoken::Algorithm {
        match self {
            SigningAlgorithm::Hs256 => jsonwebtoken::Algorithm::HS256,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "json".to_string() }
    }
}

/// 安全配置
///
/// Key material is fixed for the lifetime of the value. Rotation means
/// constructing a new `SecurityConfig`; nothing here is ever mutated after
/// construction, which is what makes the derived components safe to share
/// across threads.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// JWT 签名密钥（使用 Secret 包装，防止日志泄露）
    pub jwt_secret: Secret<String>,

    /// 签名算法（默认 HS256）
    #[serde(default)]
    pub signing_algorithm: SigningAlgorithm,

    /// 访问令牌过期时间（秒）
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl_secs: u64,

    /// API Key 过期时间（秒），由外部存储层执行
    #[serde(default = "default_api_key_ttl")]
    pub api_key_ttl_secs: u64,

    /// 对称加密密钥（base64 编码的 32 字节，缺省时自动生成一次）
    #[serde(default = "generated_encryption_key")]
    pub encryption_key: Secret<String>,
}

fn default_access_token_ttl() -> u64 {
    1800
}

fn default_api_key_ttl() -> u64 {
    30 * 24 * 3600
}

fn generated_encryption_key() -> Secret<String> {
    Secret::new(SecurityConfig::generate_encryption_key())
}

impl SecurityConfig {
    /// Build a config programmatically. The encryption key is generated once
    /// here when the caller does not supply one.
    pub fn new(jwt_secret: impl Into<String>, encryption_key: Option<String>) -> Self {
        Self {
            jwt_secret: Secret::new(jwt_secret.into()),
            signing_algorithm: SigningAlgorithm::default(),
            access_token_ttl_secs: default_access_token_ttl(),
            api_key_ttl_secs: default_api_key_ttl(),
            encryption_key: Secret::new(
                encryption_key.unwrap_or_else(Self::generate_encryption_key),
            ),
        }
    }

    /// 从环境变量加载配置（前缀为 SECURITY_）
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("access_token_ttl_secs", default_access_token_ttl())?
            .set_default("api_key_ttl_secs", default_api_key_ttl())?
            .add_source(
                Environment::with_prefix("SECURITY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: SecurityConfig = settings.build()?.try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    /// Generate a fresh 256-bit encryption key from the OS random source,
    /// base64-encoded for storage in environment configuration.
    pub fn generate_encryption_key() -> String {
        let mut key = [0u8; ENCRYPTION_KEY_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut key);
        BASE64.encode(key)
    }

    /// 验证配置合法性
    fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token_ttl_secs == 0 {
            return Err(ConfigError::Message(
                "access_token_ttl_secs must be positive".to_string(),
            ));
        }

        if self.api_key_ttl_secs == 0 {
            return Err(ConfigError::Message("api_key_ttl_secs must be positive".to_string()));
        }

        Ok(())
    }
}
