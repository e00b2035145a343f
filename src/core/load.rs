use crate::core::{Batch, DocumentStore, LoadReport, StoreConnection};
use crate::utils::error::Result;

/// Writes the whole batch with a single unordered bulk insert.
///
/// An empty batch is a no-op and never opens a connection. Once a connection
/// has been opened it is closed again whether or not the insert succeeded.
pub async fn load_batch<D: DocumentStore>(store: &D, batch: &Batch) -> Result<LoadReport> {
    if batch.is_empty() {
        tracing::info!("Gameweek {} has no records, skipping insert", batch.gameweek);
        return Ok(LoadReport { inserted: 0 });
    }

    let connection = store.connect().await?;
    tracing::info!("Connected to document store");

    let outcome = connection.insert_many(&batch.records).await;
    connection.close().await;
    tracing::debug!("Document store connection released");

    let inserted = outcome?;
    tracing::info!(
        "Inserted {} documents for gameweek {}",
        inserted,
        batch.gameweek
    );
    Ok(LoadReport { inserted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Gameweek, Record};
    use crate::utils::error::{EtlError, Stage};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MockState {
        documents: Mutex<Vec<Record>>,
        connects: AtomicUsize,
        inserts: AtomicUsize,
        closes: AtomicUsize,
    }

    #[derive(Clone, Default)]
    struct MockStore {
        state: Arc<MockState>,
        fail_connect: bool,
        fail_write: bool,
    }

    struct MockConnection {
        state: Arc<MockState>,
        fail_write: bool,
    }

    impl DocumentStore for MockStore {
        type Connection = MockConnection;

        async fn connect(&self) -> Result<MockConnection> {
            self.state.connects.fetch_add(1, Ordering::SeqCst);
            if self.fail_connect {
                return Err(EtlError::connect("server selection timeout"));
            }
            Ok(MockConnection {
                state: self.state.clone(),
                fail_write: self.fail_write,
            })
        }
    }

    impl StoreConnection for MockConnection {
        async fn insert_many(&self, records: &[Record]) -> Result<u64> {
            self.state.inserts.fetch_add(1, Ordering::SeqCst);
            if self.fail_write {
                return Err(EtlError::write("E11000 duplicate key error"));
            }
            let mut documents = self.state.documents.lock().await;
            documents.extend_from_slice(records);
            Ok(records.len() as u64)
        }

        async fn close(self) {
            self.state.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn batch(size: i64) -> Batch {
        let records = (1..=size)
            .map(|id| serde_json::from_value(serde_json::json!({ "id": id })).unwrap())
            .collect();
        Batch {
            gameweek: Gameweek::new(13),
            records,
        }
    }

    #[tokio::test]
    async fn test_load_inserts_and_releases_connection() {
        let store = MockStore::default();

        let report = load_batch(&store, &batch(3)).await.unwrap();

        assert_eq!(report.inserted, 3);
        assert_eq!(store.state.documents.lock().await.len(), 3);
        assert_eq!(store.state.connects.load(Ordering::SeqCst), 1);
        assert_eq!(store.state.inserts.load(Ordering::SeqCst), 1);
        assert_eq!(store.state.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_empty_batch_is_a_no_op() {
        let store = MockStore::default();

        let report = load_batch(&store, &batch(0)).await.unwrap();

        assert_eq!(report.inserted, 0);
        assert_eq!(store.state.connects.load(Ordering::SeqCst), 0);
        assert_eq!(store.state.inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_write_failure_still_releases_connection() {
        let store = MockStore {
            fail_write: true,
            ..Default::default()
        };

        let err = load_batch(&store, &batch(2)).await.unwrap_err();

        assert_eq!(err.stage(), Stage::Write);
        assert_eq!(store.state.closes.load(Ordering::SeqCst), 1);
        assert!(store.state.documents.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_connect_failure_skips_insert() {
        let store = MockStore {
            fail_connect: true,
            ..Default::default()
        };

        let err = load_batch(&store, &batch(2)).await.unwrap_err();

        assert_eq!(err.stage(), Stage::Connect);
        assert_eq!(store.state.inserts.load(Ordering::SeqCst), 0);
        assert_eq!(store.state.closes.load(Ordering::SeqCst), 0);
    }
}
