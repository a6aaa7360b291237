use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

/// Fresh in-memory database per test, fully migrated.
///
/// The pool is capped at a single connection: every `sqlite::memory:`
/// connection is its own database, so one shared connection keeps all
/// queries on the same instance. Tests must not hold an acquired
/// connection across a call that needs the pool.
pub async fn test_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    store::db::run_migrations(&pool).await;
    pool
}

/// Deterministic RNG for reproducible generation.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Count rows matching a single-bind query, e.g. children of one case.
pub async fn count_where(pool: &Pool<Sqlite>, sql: &str, id: uuid::Uuid) -> i64 {
    sqlx::query_scalar(sql)
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("count query failed")
}

/// Count all rows of a table.
pub async fn count_all(pool: &Pool<Sqlite>, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count query failed")
}
