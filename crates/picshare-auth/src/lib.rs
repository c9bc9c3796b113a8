//! # picshare-auth
//!
//! Stateless bearer tokens for the PicShare API.
//!
//! A token is an HMAC-signed JWT carrying the account id (`sub`) and an
//! expiry (`exp`). Nothing is persisted; any holder of the shared secret
//! can verify it.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
