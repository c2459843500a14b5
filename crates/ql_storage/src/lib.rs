use std::sync::Arc;

use ql_core::{Error, Result, Store};

pub mod backends;

pub use backends::memory::MemoryStorage;
#[cfg(feature = "sqlite")]
pub use backends::sqlite::SqliteStorage;

#[cfg(feature = "sqlite")]
const DEFAULT_DB_PATH: &str = "quill.db";

/// Build a storage backend by name.
pub async fn create_storage(kind: &str, db_path: Option<&str>) -> Result<Arc<dyn Store>> {
    match kind {
        "memory" => Ok(Arc::new(MemoryStorage::new())),
        "sqlite" => open_sqlite(db_path).await,
        other => Err(Error::Storage(format!("unknown storage backend: {}", other))),
    }
}

#[cfg(feature = "sqlite")]
async fn open_sqlite(db_path: Option<&str>) -> Result<Arc<dyn Store>> {
    let path = std::path::PathBuf::from(db_path.unwrap_or(DEFAULT_DB_PATH));
    Ok(Arc::new(SqliteStorage::open(&path).await?))
}

#[cfg(not(feature = "sqlite"))]
async fn open_sqlite(_db_path: Option<&str>) -> Result<Arc<dyn Store>> {
    Err(Error::Storage(
        "sqlite backend requires building with the `sqlite` feature".to_string(),
    ))
}

pub mod prelude {
    pub use super::create_storage;
    pub use ql_core::{ArticleStore, Store, UserStore};
}
