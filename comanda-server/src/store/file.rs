//! Whole-file collection store
//!
//! Each collection lives in one file that is read and rewritten in full.
//! A single async mutex per collection serializes every access, so a
//! `mutate()` is an atomic load → change → save with respect to all other
//! requests on the same collection.

use super::codec::Codec;
use super::error::{StoreError, StoreResult};
use chrono::Utc;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct FileStore<T, C> {
    path: PathBuf,
    codec: Arc<C>,
    /// 单写者锁
    lock: Arc<Mutex<()>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T, C> Clone for FileStore<T, C> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            codec: self.codec.clone(),
            lock: self.lock.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, C> std::fmt::Debug for FileStore<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore").field("path", &self.path).finish()
    }
}

impl<T, C> FileStore<T, C>
where
    C: Codec<T>,
{
    /// Open the collection at `path`, creating the directory and an empty
    /// file when missing.
    pub async fn open(path: impl Into<PathBuf>, codec: C) -> StoreResult<Self> {
        let store = Self {
            path: path.into(),
            codec: Arc::new(codec),
            lock: Arc::new(Mutex::new(())),
            _marker: PhantomData,
        };

        if let Some(parent) = store.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let guard = store.lock.lock().await;
        if !tokio::fs::try_exists(&store.path)
            .await
            .map_err(|e| StoreError::io(&store.path, e))?
        {
            store.write_unlocked(&[]).await?;
            tracing::info!(path = %store.path.display(), "Created empty collection file");
        }
        drop(guard);

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole collection
    pub async fn load(&self) -> StoreResult<Vec<T>> {
        let _guard = self.lock.lock().await;
        self.read_unlocked().await
    }

    /// Replace the whole collection
    pub async fn save(&self, items: &[T]) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        self.write_unlocked(items).await
    }

    /// Load, apply `f`, and write back only if `f` succeeds.
    ///
    /// The lock is held for the whole sequence.
    pub async fn mutate<R, E, F>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, E>,
        E: From<StoreError>,
    {
        let _guard = self.lock.lock().await;
        let mut items = self.read_unlocked().await?;
        let result = f(&mut items)?;
        self.write_unlocked(&items).await?;
        Ok(result)
    }

    async fn read_unlocked(&self) -> StoreResult<Vec<T>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.write_unlocked(&[]).await?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        match self.codec.decode(&bytes) {
            Ok(items) => Ok(items),
            Err(e) if e.is_corrupt() => {
                self.quarantine(&e).await?;
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Move a corrupt file aside and start over with an empty collection
    async fn quarantine(&self, cause: &StoreError) -> StoreResult<()> {
        let backup = sibling(
            &self.path,
            &format!("corrupt-{}", Utc::now().format("%Y%m%d%H%M%S%3f")),
        );
        tracing::error!(
            path = %self.path.display(),
            backup = %backup.display(),
            error = %cause,
            "Collection file is corrupt, resetting to empty"
        );
        tokio::fs::copy(&self.path, &backup)
            .await
            .map_err(|e| StoreError::io(&backup, e))?;
        self.write_unlocked(&[]).await
    }

    /// Atomic write: tmp file + rename
    async fn write_unlocked(&self, items: &[T]) -> StoreResult<()> {
        let bytes = self.codec.encode(items)?;
        let tmp_path = sibling(&self.path, "tmp");

        tokio::fs::write(&tmp_path, &bytes)
            .await
            .map_err(|e| StoreError::io(&tmp_path, e))?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(StoreError::io(&self.path, e));
        }
        Ok(())
    }
}

/// `<file>.<suffix>` next to `path`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::codec::JsonCodec;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: u64,
    }

    async fn open(dir: &Path) -> FileStore<Row, JsonCodec> {
        FileStore::open(dir.join("rows.json"), JsonCodec).await.unwrap()
    }

    #[tokio::test]
    async fn test_open_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir.path().join("nested")).await;
        assert!(store.path().exists());
        assert!(store.load().await.unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_failed_mutation_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(dir.path()).await;
        store.save(&[Row { id: 1 }]).await.unwrap();
        let before = std::fs::read(store.path()).unwrap();

        let result: Result<(), StoreError> = store
            .mutate(|rows| {
                rows.clear();
                Err(StoreError::Csv("rejected".into()))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_concurrent_mutations_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(dir.path()).await;

        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .mutate(|rows| {
                        let id = rows.len() as u64 + 1;
                        rows.push(Row { id });
                        Ok::<_, StoreError>(())
                    })
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let rows = store.load().await.unwrap();
        assert_eq!(rows.len(), 20);
        assert_eq!(rows.last(), Some(&Row { id: 20 }));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_backed_up_and_reset() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(dir.path()).await;
        std::fs::write(store.path(), "[{\"id\": ").unwrap();

        assert!(store.load().await.unwrap().is_empty());

        let backups: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with("rows.json.corrupt-"))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(&backups[0])).unwrap(),
            "[{\"id\": "
        );
    }
}
