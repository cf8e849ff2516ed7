//! In-memory flight repository.

use tokio::sync::Mutex;

use super::{FlightRepository, FlightStore};
use crate::error::Result;
use crate::flight::{Flight, FlightId};

/// A [`FlightStore`] behind one lock, shared by all request handlers.
///
/// The lock is held for the whole of each operation, so a scan never sees a
/// half-applied mutation from another request.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    store: Mutex<FlightStore>,
}

impl MemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `store`.
    #[must_use]
    pub fn with_store(store: FlightStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    /// Check if the repository holds no records.
    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }
}

#[async_trait::async_trait]
impl FlightRepository for MemoryRepository {
    async fn create(&self, flight: Flight) -> Result<Flight> {
        Ok(self.store.lock().await.create(flight).clone())
    }

    async fn list(&self) -> Result<Vec<Flight>> {
        Ok(self.store.lock().await.list().to_vec())
    }

    async fn get(&self, id: FlightId) -> Result<Flight> {
        self.store.lock().await.get(id).cloned()
    }

    async fn update(&self, id: FlightId, patch: Flight) -> Result<Flight> {
        self.store.lock().await.update(id, patch).cloned()
    }

    async fn delete(&self, id: FlightId) -> Result<Vec<Flight>> {
        self.store.lock().await.delete(id)
    }
}
