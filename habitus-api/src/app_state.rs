use std::path::PathBuf;
use std::sync::Arc;

use habitus::{snapshot, HabitStore, StoreError};
use tokio::sync::RwLock;

/// Shared service state: the single habit store behind one lock, plus the
/// optional snapshot file flushed after every successful mutation.
#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<HabitStore>>,
    snapshot_path: Option<Arc<PathBuf>>,
}

impl AppState {
    pub fn new(store: HabitStore, snapshot_path: Option<PathBuf>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            snapshot_path: snapshot_path.map(Arc::new),
        }
    }

    /// Run a read-only closure against the store.
    pub async fn read<T>(&self, f: impl FnOnce(&HabitStore) -> T) -> T {
        let store = self.store.read().await;
        f(&store)
    }

    /// Run a mutation against the store. The write lock is held across both
    /// the mutation and the snapshot flush, so concurrent requests never see
    /// a partially applied change. Flush failures are logged, not surfaced:
    /// habit data loss is preferable to failing the request.
    pub async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut HabitStore) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut store = self.store.write().await;
        let result = f(&mut store)?;

        if let Some(ref path) = self.snapshot_path {
            if let Err(err) = snapshot::save(path, store.list()) {
                tracing::error!("failed to flush habit snapshot: {err}");
            }
        }

        Ok(result)
    }
}
