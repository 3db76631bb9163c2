use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory database with the full schema and seed data applied.
///
/// The pool is pinned to one connection: every pooled connection to
/// `sqlite::memory:` would otherwise get its own empty database.
pub async fn setup() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts)
        .await
        .expect("connect to in-memory sqlite");
    tempo_storage::run_migrations(&db)
        .await
        .expect("run migrations");
    db
}
