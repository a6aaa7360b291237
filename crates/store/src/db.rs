use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// Pool created lazily — no connections are opened until the first query.
/// This avoids binding to a specific tokio runtime at init time, which is
/// critical for tests where each `#[tokio::test]` creates its own runtime.
static POOL: OnceLock<Pool<Sqlite>> = OnceLock::new();
static MIGRATED: AtomicBool = AtomicBool::new(false);

/// Create a new database connection pool.
///
/// The database URL comes from the DATABASE_URL environment variable (a
/// `.env` file is honored), then `config.toml`, then a local file database.
/// Uses `connect_lazy_with` so no connections open until the first query.
pub fn create_pool() -> Pool<Sqlite> {
    let _ = dotenvy::dotenv();

    let config = crate::config::app_config();
    let database_url = std::env::var("DATABASE_URL")
        .ok()
        .or_else(|| config.database.url.clone())
        .unwrap_or_else(|| "sqlite:legal_cases.db".to_string());

    let options = SqliteConnectOptions::from_str(&database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy_with(options)
}

/// Run database migrations against the given pool.
pub async fn run_migrations(pool: &Pool<Sqlite>) {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .expect("Failed to run database migrations");
}

/// Get or initialize the database connection pool.
/// Migrations run once on the first call; subsequent calls return immediately.
pub async fn get_db() -> &'static Pool<Sqlite> {
    let pool = POOL.get_or_init(create_pool);

    // Run migrations at most once per process. `swap` is atomic so only
    // the first caller executes; migrations are idempotent regardless.
    if !MIGRATED.swap(true, Ordering::SeqCst) {
        run_migrations(pool).await;
    }

    pool
}
