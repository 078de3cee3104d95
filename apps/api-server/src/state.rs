//! Application state - shared across all handlers.

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use quill_core::BlogService;
use quill_core::ports::{PostRepository, UserRepository};
use quill_infra::database::{self, DatabaseConfig};
use quill_infra::{
    Argon2PasswordService, InMemoryPostRepository, InMemoryUserRepository, SqlitePostRepository,
    SqliteUserRepository,
};

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

/// Duplicate a database connection handle, sharing the same underlying pool.
///
/// This mirrors `DatabaseConnection::clone()` for the sqlite pool variant.
/// SeaORM only derives `Clone` on `DatabaseConnection` when its `mock`
/// feature is off (see its `cfg_attr(not(feature = "mock"), derive(Clone))`);
/// because `quill-infra`'s test suite enables `mock`, workspace-wide feature
/// unification turns it on for this crate too during `cargo test`, which would
/// otherwise make `conn.clone()` fail to compile. The inner
/// `SqlxSqlitePoolConnection` is itself `Clone`, so this produces the exact
/// same shared-pool handle the derived clone would.
fn duplicate_conn(conn: &DatabaseConnection) -> DatabaseConnection {
    match conn {
        DatabaseConnection::SqlxSqlitePoolConnection(c) => {
            DatabaseConnection::SqlxSqlitePoolConnection(c.clone())
        }
        DatabaseConnection::Disconnected => DatabaseConnection::Disconnected,
        #[allow(unreachable_patterns)]
        _ => DatabaseConnection::Disconnected,
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: Arc<BlogService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Connects the SQLite store and brings the schema up to date; when the
    /// store cannot be opened, falls back to in-memory repositories so the
    /// server still comes up (state is then lost on restart).
    pub async fn new(config: &AppConfig) -> Self {
        match Self::with_sqlite(&config.database).await {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(
                    "Failed to initialize database: {}. Using in-memory repositories.",
                    e
                );
                Self::in_memory()
            }
        }
    }

    async fn with_sqlite(config: &DatabaseConfig) -> Result<Self, sea_orm::DbErr> {
        let conn = database::connect(config).await?;
        Migrator::up(&conn, None).await?;

        let users = Arc::new(SqliteUserRepository::new(duplicate_conn(&conn)));
        let posts = Arc::new(SqlitePostRepository::new(conn));
        Ok(Self::with_repos(users, posts))
    }

    /// State backed entirely by in-memory repositories.
    pub fn in_memory() -> Self {
        Self::with_repos(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
        )
    }

    fn with_repos(users: Arc<dyn UserRepository>, posts: Arc<dyn PostRepository>) -> Self {
        let blog = Arc::new(BlogService::new(
            users,
            posts,
            Arc::new(Argon2PasswordService::new()),
        ));

        Self { blog }
    }
}
