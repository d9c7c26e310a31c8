//! Snapshot directory layout and JSON I/O.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use talawa_core::Result;
use talawa_core::error::{Error, InvalidInputError, QueryError};

/// The connections a snapshot can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKind {
    /// Posts of an organization.
    Posts,
    /// Comments of a post.
    Comments,
    /// Up-voters of a post.
    PostUpVoters,
    /// Up-voters of a comment.
    CommentUpVoters,
}

impl ConnectionKind {
    /// Directory name under the snapshot root.
    pub fn dir_name(self) -> &'static str {
        match self {
            ConnectionKind::Posts => "posts",
            ConnectionKind::Comments => "comments",
            ConnectionKind::PostUpVoters => "post-up-voters",
            ConnectionKind::CommentUpVoters => "comment-up-voters",
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Reads and writes the JSON arrays of a snapshot directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at `root`. The directory need not exist yet.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Returns the snapshot root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `kind` for `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` could escape its directory.
    pub fn connection_path(&self, kind: ConnectionKind, parent: &str) -> Result<PathBuf> {
        if parent.is_empty()
            || parent.starts_with('.')
            || parent.contains(['/', '\\'])
        {
            return Err(InvalidInputError::Other {
                message: format!("'{}' cannot be used as a snapshot file name", parent),
            }
            .into());
        }

        Ok(self
            .root
            .join(kind.dir_name())
            .join(format!("{}.json", parent)))
    }

    /// Read every item of a connection. A missing file is an empty
    /// connection.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn read<T: DeserializeOwned>(
        &self,
        kind: ConnectionKind,
        parent: &str,
    ) -> Result<Vec<T>> {
        let path = self.connection_path(kind, parent)?;

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No snapshot file; empty connection");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            Error::Query(QueryError::Malformed {
                message: format!("{}: {}", path.display(), e),
            })
        })
    }

    /// Replace the items of a connection, creating directories as needed.
    #[instrument(skip(self, items), fields(root = %self.root.display()))]
    pub async fn write<T: Serialize>(
        &self,
        kind: ConnectionKind,
        parent: &str,
        items: &[T],
    ) -> Result<()> {
        let path = self.connection_path(kind, parent)?;

        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let json = serde_json::to_vec_pretty(items)?;
        tokio::fs::write(&path, json).await?;

        debug!(path = %path.display(), count = items.len(), "Wrote snapshot file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn layout() {
        let store = SnapshotStore::new("/snap");
        assert_eq!(
            store
                .connection_path(ConnectionKind::PostUpVoters, "post-1")
                .unwrap(),
            PathBuf::from("/snap/post-up-voters/post-1.json")
        );
    }

    #[test]
    fn rejects_escaping_names() {
        let store = SnapshotStore::new("/snap");
        for parent in ["", "..", ".hidden", "a/b", "a\\b"] {
            assert!(
                store.connection_path(ConnectionKind::Posts, parent).is_err(),
                "{parent:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());

        let items: Vec<serde_json::Value> =
            store.read(ConnectionKind::Comments, "post-1").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());

        store
            .write(ConnectionKind::Posts, "org-1", &["a", "b"])
            .await
            .unwrap();

        let items: Vec<String> = store.read(ConnectionKind::Posts, "org-1").await.unwrap();
        assert_eq!(items, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn malformed_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());
        let path = store
            .connection_path(ConnectionKind::Posts, "org-1")
            .unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let err = store
            .read::<String>(ConnectionKind::Posts, "org-1")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("malformed response"));
    }
}
