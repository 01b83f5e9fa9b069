use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::StoreError;

/// A stored chirp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chirp {
    pub id: u64,
    pub body: String,
}

/// The whole on-disk document, `{"chirps": {"<id>": {...}}}`.
///
/// `serde_json` writes the integer map keys as decimal strings and parses
/// them back, so the file layout matches what other clients expect.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseDocument {
    #[serde(default)]
    pub chirps: BTreeMap<u64, Chirp>,
}

/// JSON file backed chirp store.
///
/// Every mutation reads the full document, changes it in memory and rewrites
/// the whole file. `create` holds the write guard for the entire cycle and
/// `list_all` holds a read guard, so readers never see a half-written file.
#[derive(Debug)]
pub struct Database {
    path: PathBuf,
    lock: RwLock<()>,
}

impl Database {
    /// Create a store handle without touching the filesystem
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    /// Create a store handle and make sure its backing file exists
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let db = Self::new(path);
        db.ensure_initialized().await?;
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `{}` to the backing file if it does not exist yet.
    /// An existing file is left alone whatever it contains.
    pub async fn ensure_initialized(&self) -> Result<(), StoreError> {
        let _guard = self.lock.write().await;

        match tokio::fs::metadata(&self.path).await {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(target: "chirpy::database", path = %self.path.display(), "Creating database file");
                tokio::fs::write(&self.path, b"{}").await?;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Persist a new chirp and return it with its assigned id
    pub async fn create(&self, body: &str) -> Result<Chirp, StoreError> {
        let _guard = self.lock.write().await;

        let mut document = self.load().await?;

        // Ids follow the record count rather than a stored high-water mark.
        // Nothing deletes records, so count + 1 is always unused.
        let chirp = Chirp {
            id: document.chirps.len() as u64 + 1,
            body: body.to_string(),
        };
        document.chirps.insert(chirp.id, chirp.clone());

        self.write(&document).await?;

        debug!(target: "chirpy::database", id = chirp.id, "Chirp created");
        Ok(chirp)
    }

    /// Every stored chirp, ascending by id
    pub async fn list_all(&self) -> Result<Vec<Chirp>, StoreError> {
        let _guard = self.lock.read().await;

        let document = self.load().await?;
        Ok(document.chirps.into_values().collect())
    }

    /// Number of stored chirps
    pub async fn len(&self) -> Result<usize, StoreError> {
        let _guard = self.lock.read().await;
        Ok(self.load().await?.chirps.len())
    }

    /// Read the document from disk. Callers must hold the lock.
    ///
    /// A file that cannot be read counts as an empty store; only content
    /// that is present but malformed is an error.
    async fn load(&self) -> Result<DatabaseDocument, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(
                    target: "chirpy::database",
                    path = %self.path.display(),
                    error = %err,
                    "Failed to read database file, treating it as empty"
                );
                return Ok(DatabaseDocument::default());
            }
        };

        parse_document(&bytes)
    }

    /// Replace the file contents with `document`. Callers must hold the write lock.
    async fn write(&self, document: &DatabaseDocument) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(document).map_err(StoreError::Encode)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

fn parse_document(bytes: &[u8]) -> Result<DatabaseDocument, StoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(DatabaseDocument::default());
    }
    serde_json::from_slice(bytes).map_err(StoreError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn temp_db() -> (TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("database.json"));
        (dir, db)
    }

    #[tokio::test]
    async fn test_ensure_initialized_creates_empty_object() {
        let (_dir, db) = temp_db();
        db.ensure_initialized().await.unwrap();

        let contents = tokio::fs::read_to_string(db.path()).await.unwrap();
        assert_eq!(contents, "{}");
        assert_eq!(db.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ensure_initialized_keeps_existing_file() {
        let (_dir, db) = temp_db();
        tokio::fs::write(db.path(), "not json at all").await.unwrap();

        db.ensure_initialized().await.unwrap();

        let contents = tokio::fs::read_to_string(db.path()).await.unwrap();
        assert_eq!(contents, "not json at all");
    }

    #[tokio::test]
    async fn test_ensure_initialized_fails_when_directory_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("missing").join("database.json"));

        assert!(matches!(db.ensure_initialized().await, Err(StoreError::Io(_))));
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let (_dir, db) = temp_db();
        db.ensure_initialized().await.unwrap();

        for i in 1..=3 {
            db.create(&format!("body-value-{}", i)).await.unwrap();
        }

        let chirps = db.list_all().await.unwrap();
        assert_eq!(
            chirps,
            vec![
                Chirp { id: 1, body: "body-value-1".to_string() },
                Chirp { id: 2, body: "body-value-2".to_string() },
                Chirp { id: 3, body: "body-value-3".to_string() },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_all_orders_numerically() {
        let (_dir, db) = temp_db();
        db.ensure_initialized().await.unwrap();

        for i in 0..12 {
            db.create(&format!("chirp {}", i)).await.unwrap();
        }

        let ids: Vec<u64> = db.list_all().await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_file_layout_uses_string_keys() {
        let (_dir, db) = temp_db();
        db.ensure_initialized().await.unwrap();
        db.create("hello").await.unwrap();

        let contents = tokio::fs::read_to_string(db.path()).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value, serde_json::json!({"chirps": {"1": {"id": 1, "body": "hello"}}}));
    }

    #[tokio::test]
    async fn test_document_survives_reopen() {
        let (dir, db) = temp_db();
        db.ensure_initialized().await.unwrap();
        db.create("first").await.unwrap();
        db.create("second").await.unwrap();
        let before = db.list_all().await.unwrap();
        drop(db);

        let reopened = Database::open(dir.path().join("database.json")).await.unwrap();
        assert_eq!(reopened.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_missing_file_lists_as_empty() {
        let (_dir, db) = temp_db();
        assert!(db.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_without_file_starts_at_one() {
        let (_dir, db) = temp_db();
        let chirp = db.create("no file yet").await.unwrap();
        assert_eq!(chirp.id, 1);
    }

    #[tokio::test]
    async fn test_empty_file_lists_as_empty() {
        let (_dir, db) = temp_db();
        tokio::fs::write(db.path(), "").await.unwrap();
        assert!(db.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let (_dir, db) = temp_db();
        tokio::fs::write(db.path(), "{\"chirps\": [").await.unwrap();

        assert!(matches!(db.list_all().await, Err(StoreError::Decode(_))));
        assert!(matches!(db.create("x").await, Err(StoreError::Decode(_))));

        // The corrupt document is not overwritten.
        let contents = tokio::fs::read_to_string(db.path()).await.unwrap();
        assert_eq!(contents, "{\"chirps\": [");
    }

    #[tokio::test]
    async fn test_concurrent_creates_never_share_an_id() {
        let (_dir, db) = temp_db();
        db.ensure_initialized().await.unwrap();
        let db = Arc::new(db);

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let db = Arc::clone(&db);
                tokio::spawn(async move { db.create(&format!("chirp {}", i)).await.unwrap() })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().id);
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
        assert_eq!(db.len().await.unwrap(), 20);
    }
}
