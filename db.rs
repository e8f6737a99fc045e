use crate::*;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::str::FromStr;

pub type Db = Pool<Sqlite>;

/// Global pool for the binary; tests and embedded usage create their own with [`memory_db`]
pub static DB: Lazy<Db> = Lazy::new(|| pool(&CONFIG.database_url).expect("valid DATABASE_URL"));

fn pool(url: &str) -> Result<Db> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    // An in-memory sqlite DB lives and dies with its connection, so the
    // pool must not open a second one.
    let pool_options = if url.contains(":memory:") {
        SqlitePoolOptions::new().max_connections(1)
    } else {
        SqlitePoolOptions::new()
    };
    Ok(pool_options.connect_lazy_with(options))
}

pub async fn migrate(db: &Db) -> Result {
    sqlx::migrate!().run(db).await?;
    OK
}

/// Fresh migrated in-memory DB
pub async fn memory_db() -> Result<Db> {
    let db = pool("sqlite::memory:")?;
    migrate(&db).await?;
    Ok(db)
}
