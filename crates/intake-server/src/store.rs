//! Durable storage of submitted requests.
//!
//! [`JsonFileStore`] keeps every record in one pretty-printed JSON array at
//! `{data_dir}/requests.json`. Each operation rewrites or rereads the whole
//! file under a single async mutex, so concurrent submissions are applied
//! one at a time and readers never see a partial write.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;

use intake_core::StoredRequest;

/// File name of the store inside the data directory.
pub const STORE_FILE: &str = "requests.json";

/// Errors from the request store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store contents are not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence for submitted requests.
///
/// Records keep insertion order. Nothing is ever updated or removed.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Every stored record; empty if nothing has been stored yet.
    async fn load(&self) -> Result<Vec<StoredRequest>, StoreError>;

    /// Replace the full contents of the store.
    async fn save(&self, records: &[StoredRequest]) -> Result<(), StoreError>;

    /// Add one record at the end.
    async fn append(&self, record: StoredRequest) -> Result<(), StoreError>;

    /// All records in submission order.
    async fn list(&self) -> Result<Vec<StoredRequest>, StoreError>;

    /// The record with this id, if any.
    async fn get(&self, id: &str) -> Result<Option<StoredRequest>, StoreError>;
}

/// Request store backed by a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store under `data_dir`, creating the directory if needed.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir).await?;

        let path = data_dir.join(STORE_FILE);
        tracing::debug!(path = %path.display(), "Opened request store");

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> Result<Vec<StoredRequest>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    async fn write_records(&self, records: &[StoredRequest]) -> Result<(), StoreError> {
        let mut bytes = serde_json::to_vec_pretty(records)?;
        bytes.push(b'\n');

        // Write beside the target, then swap it in.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl RequestStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<StoredRequest>, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_records().await
    }

    async fn save(&self, records: &[StoredRequest]) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        self.write_records(records).await
    }

    async fn append(&self, record: StoredRequest) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        let mut records = self.read_records().await?;
        records.push(record);
        self.write_records(&records).await?;

        tracing::debug!(count = records.len(), "Appended request");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<StoredRequest>, StoreError> {
        self.load().await
    }

    async fn get(&self, id: &str) -> Result<Option<StoredRequest>, StoreError> {
        let records = self.load().await?;
        Ok(records.into_iter().find(|r| r.id == id))
    }
}
