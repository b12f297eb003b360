use crate::domain::model::AuditRecord;
use crate::domain::ports::{AuditStore, Storage};
use crate::utils::error::{AuditError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        tokio::fs::try_exists(self.full_path(path))
            .await
            .unwrap_or(false)
    }
}

/// Write-once JSON records named `<audit_id>.json`.
#[derive(Debug, Clone)]
pub struct FileAuditStore<S: Storage> {
    storage: S,
}

impl<S: Storage> FileAuditStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn record_file(id: &str) -> String {
        format!("{}.json", id)
    }
}

#[async_trait]
impl<S: Storage> AuditStore for FileAuditStore<S> {
    async fn persist(&self, record: &AuditRecord) -> Result<String> {
        let id = record.audit_id.to_string();
        let file = Self::record_file(&id);

        if self.storage.exists(&file).await {
            return Err(AuditError::DuplicateRecord { id });
        }

        let data = serde_json::to_vec_pretty(record)?;
        self.storage.write_file(&file, &data).await?;
        tracing::debug!("Persisted audit record {} ({} bytes)", id, data.len());
        Ok(file)
    }
}
