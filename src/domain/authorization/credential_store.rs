//! Process-wide credential cell with split write/read capabilities.
//!
//! Exactly one [`CredentialWriter`] exists per store. It is handed to the
//! authorization flow, which is the only component allowed to install a
//! credential. Any number of [`CredentialReader`]s can be cloned out for
//! components that only need to look at the current credential.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::Credential;

type Cell = Arc<RwLock<Option<Arc<Credential>>>>;

/// Empty credential cell, consumed by [`CredentialStore::split`].
#[derive(Debug, Default)]
pub struct CredentialStore {
    cell: Cell,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits the store into its single writer and a first reader.
    pub fn split(self) -> (CredentialWriter, CredentialReader) {
        let reader = CredentialReader {
            cell: Arc::clone(&self.cell),
        };
        (CredentialWriter { cell: self.cell }, reader)
    }
}

/// Sole capability to replace the live credential.
#[derive(Debug)]
pub struct CredentialWriter {
    cell: Cell,
}

impl CredentialWriter {
    /// Atomically replaces the live credential, returning the previous one.
    ///
    /// Concurrent installs serialize on the write lock; the last one wins.
    pub async fn install(&self, credential: Credential) -> Option<Arc<Credential>> {
        let mut guard = self.cell.write().await;
        guard.replace(Arc::new(credential))
    }

    /// Creates another reader over the same cell.
    pub fn reader(&self) -> CredentialReader {
        CredentialReader {
            cell: Arc::clone(&self.cell),
        }
    }
}

/// Read-only view of the live credential.
#[derive(Debug, Clone)]
pub struct CredentialReader {
    cell: Cell,
}

impl CredentialReader {
    /// Returns the installed credential, if any.
    pub async fn current(&self) -> Option<Arc<Credential>> {
        self.cell.read().await.clone()
    }

    pub async fn is_present(&self) -> bool {
        self.cell.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_starts_empty() {
        let (_writer, reader) = CredentialStore::new().split();
        assert!(reader.current().await.is_none());
        assert!(!reader.is_present().await);
    }

    #[tokio::test]
    async fn install_is_visible_to_every_reader() {
        let (writer, reader) = CredentialStore::new().split();
        let other = reader.clone();
        let third = writer.reader();

        writer.install(Credential::new("token-a")).await;

        assert_eq!(reader.current().await.unwrap().access_token(), "token-a");
        assert_eq!(other.current().await.unwrap().access_token(), "token-a");
        assert_eq!(third.current().await.unwrap().access_token(), "token-a");
    }

    #[tokio::test]
    async fn install_replaces_and_returns_previous() {
        let (writer, reader) = CredentialStore::new().split();

        assert!(writer.install(Credential::new("first")).await.is_none());
        let previous = writer.install(Credential::new("second")).await.unwrap();

        assert_eq!(previous.access_token(), "first");
        assert_eq!(reader.current().await.unwrap().access_token(), "second");
    }

    #[tokio::test]
    async fn concurrent_installs_leave_exactly_one_credential() {
        let (writer, reader) = CredentialStore::new().split();
        let writer = Arc::new(writer);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let writer = Arc::clone(&writer);
                tokio::spawn(async move {
                    writer.install(Credential::new(format!("token-{}", i))).await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let live = reader.current().await.unwrap();
        assert!(live.access_token().starts_with("token-"));
    }
}
