// src/store.rs
// =============================================================================
// Persisting downloaded image bytes.
//
// The engine only knows one capability: "persist these bytes under this
// name". The store owns the output directory and joins names onto it; a
// name that collides with an earlier download silently overwrites it
// (last writer wins). Write failures are the caller's problem to log and
// move past - one unwritable image never stops a crawl.
// =============================================================================

use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    // Writes one image file, returning the path it landed at
    pub async fn persist(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.dir.join(name);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("could not write {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_persist_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        let path = store.persist("logo.png", b"not really a png").await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"not really a png");
    }

    #[tokio::test]
    async fn test_persist_overwrites_colliding_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        store.persist("pic.png", b"first").await.unwrap();
        let path = store.persist("pic.png", b"second").await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_persist_into_missing_directory_is_an_error() {
        let store = ImageStore::new("/definitely/not/a/real/dir");
        assert!(store.persist("pic.png", b"bytes").await.is_err());
    }
}
