use crate::domain::ports::SessionStore;
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding session key-value pairs.
pub const CF_SESSION: &str = "session";

/// A persistent session store using RocksDB.
///
/// Keys and values are stored as raw UTF-8 bytes in their own Column Family.
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBSessionStore {
    db: Arc<DB>,
}

impl RocksDBSessionStore {
    /// Opens or creates a RocksDB instance at the specified path, creating
    /// the session column family when missing.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_session = ColumnFamilyDescriptor::new(CF_SESSION, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_session])?;

        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait]
impl SessionStore for RocksDBSessionStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let cf = self
            .db
            .cf_handle(CF_SESSION)
            .ok_or_else(|| CheckoutError::Storage("Session column family not found".to_string()))?;

        match self.db.get_cf(&cf, key.as_bytes())? {
            Some(bytes) => {
                let value = String::from_utf8(bytes).map_err(|e| {
                    CheckoutError::Storage(format!("Session value for '{}' is not UTF-8: {}", key, e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let cf = self
            .db
            .cf_handle(CF_SESSION)
            .ok_or_else(|| CheckoutError::Storage("Session column family not found".to_string()))?;

        self.db.put_cf(&cf, key.as_bytes(), value.as_bytes())?;
        Ok(())
    }
}
