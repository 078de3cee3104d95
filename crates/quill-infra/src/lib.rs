//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! SQLite persistence via SeaORM, in-memory repositories for tests and the
//! no-database fallback, and Argon2 password hashing.

pub mod auth;
pub mod database;

pub use auth::Argon2PasswordService;
pub use database::{
    DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository, SqlitePostRepository,
    SqliteUserRepository,
};
