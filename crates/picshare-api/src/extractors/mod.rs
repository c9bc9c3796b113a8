//! Custom Axum extractors.

pub mod auth;
pub mod credentials;

pub use auth::AuthAccount;
pub use credentials::Credentials;
