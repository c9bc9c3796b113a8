//! # picshare-entity
//!
//! Domain entity models for PicShare: registered accounts and uploaded
//! image records. Both map directly onto rows of the relational store.

pub mod account;
pub mod image;

pub use account::Account;
pub use image::Image;
