//! Authentication and credential primitives
//!
//! Four independent components, each constructed from a [`SecurityConfig`]
//! (or standalone where no key material is needed) and composed by the
//! calling service.
//!
//! [`SecurityConfig`]: crate::config::SecurityConfig

pub mod api_key;
pub mod cipher;
pub mod password;
pub mod token;

pub use api_key::ApiKeyManager;
pub use cipher::CipherManager;
pub use password::PasswordHasher;
pub use token::{Claims, TokenCheck, TokenData, TokenIssuer};
