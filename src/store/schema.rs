use serde::{Deserialize, Serialize};

use crate::engine::mastery::WordPerformance;

pub const SCHEMA_VERSION: u32 = 1;

/// Envelope for the single persisted entry: every word's latest performance
/// record. Timestamps serialize as RFC 3339 strings via chrono's serde
/// support and are parsed back on load.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PerformanceData {
    pub schema_version: u32,
    pub performances: Vec<WordPerformance>,
}

impl Default for PerformanceData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            performances: Vec::new(),
        }
    }
}
