//! # picshare-database
//!
//! MySQL connection management, schema migrations, and the account and
//! image repositories (MySQL-backed and in-memory).

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{AccountRepository, ImageRepository, Repositories};
