//! Identity gateway: credential issue/revoke and per-route access policies.

pub mod cookie;
pub mod error;
pub mod handlers;
pub mod policy;
pub mod token;

pub use cookie::CookieSettings;
pub use error::AuthError;
pub use handlers::gateway_config;
pub use policy::{Access, AccessPolicy, OwnershipField};
pub use token::TokenSigner;
