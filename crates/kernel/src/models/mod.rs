//! Data models.

pub mod user;

pub use user::{AdminUser, UserDirectory, UserError, hash_password};
