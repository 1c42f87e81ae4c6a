pub mod json_store;
pub mod schema;

use thiserror::Error;

use crate::engine::mastery::WordPerformance;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Injected persistence capability for word performance records. The game
/// treats writes as best-effort; a failed save never surfaces past the
/// session boundary.
pub trait PerformanceStore {
    fn load(&self) -> Vec<WordPerformance>;
    fn save(&mut self, performances: &[WordPerformance]) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// In-memory fallback for headless runs and tests. Behaves like a store
/// whose backing entry simply never hits disk.
#[derive(Default)]
pub struct MemoryStore {
    performances: Vec<WordPerformance>,
}

impl PerformanceStore for MemoryStore {
    fn load(&self) -> Vec<WordPerformance> {
        self.performances.clone()
    }

    fn save(&mut self, performances: &[WordPerformance]) -> Result<(), StoreError> {
        self.performances = performances.to_vec();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.performances.clear();
        Ok(())
    }
}
