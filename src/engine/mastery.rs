use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{MemoryStore, PerformanceStore};

pub const DEFAULT_SUCCESS_THRESHOLD_MS: u64 = 5000;
pub const MASTERY_STREAK: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasteryStatus {
    New,
    Learning,
    Mastered,
}

impl MasteryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MasteryStatus::New => "new",
            MasteryStatus::Learning => "learning",
            MasteryStatus::Mastered => "mastered",
        }
    }
}

/// Latest performance record for one distinct word. Created on first
/// attempt, overwritten on every subsequent attempt, removed only by a bulk
/// clear.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WordPerformance {
    pub word: String,
    pub level: u8,
    pub last_attempt_time: DateTime<Utc>,
    pub time_to_complete_ms: u64,
    pub used_tools: bool,
    pub consecutive_successes: u32,
    pub total_attempts: u32,
    pub mastery_status: MasteryStatus,
}

/// Read-only snapshot for badges and progress displays. Defaults to a fresh
/// "new" view when the word has never been attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MasteryInfo {
    pub attempts: u32,
    pub consecutive_successes: u32,
    pub status: MasteryStatus,
    pub last_time_ms: Option<u64>,
}

impl Default for MasteryInfo {
    fn default() -> Self {
        Self {
            attempts: 0,
            consecutive_successes: 0,
            status: MasteryStatus::New,
            last_time_ms: None,
        }
    }
}

fn classify(consecutive_successes: u32, total_attempts: u32) -> MasteryStatus {
    if consecutive_successes >= MASTERY_STREAK {
        MasteryStatus::Mastered
    } else if total_attempts > 0 {
        MasteryStatus::Learning
    } else {
        MasteryStatus::New
    }
}

/// Converts attempt events into updated performance records and persists
/// them through the injected store. Save failures are swallowed: the
/// in-memory view stays correct for the rest of the session.
pub struct PerformanceTracker {
    store: Box<dyn PerformanceStore>,
    pub success_threshold_ms: u64,
}

impl PerformanceTracker {
    pub fn new(store: Box<dyn PerformanceStore>) -> Self {
        Self {
            store,
            success_threshold_ms: DEFAULT_SUCCESS_THRESHOLD_MS,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::default()))
    }

    pub fn records(&self) -> Vec<WordPerformance> {
        self.store.load()
    }

    pub fn records_for_level(&self, level: u8) -> Vec<WordPerformance> {
        self.store
            .load()
            .into_iter()
            .filter(|p| p.level == level)
            .collect()
    }

    pub fn get(&self, word: &str) -> Option<WordPerformance> {
        self.store.load().into_iter().find(|p| p.word == word)
    }

    /// Record one attempt: bump the totals, extend or reset the success
    /// streak, reclassify, and persist the replacement record.
    pub fn record_attempt(
        &mut self,
        word: &str,
        level: u8,
        time_to_complete_ms: u64,
        used_tools: bool,
    ) -> WordPerformance {
        let mut performances = self.store.load();
        let existing = performances.iter().position(|p| p.word == word);

        let (prev_streak, prev_attempts) = existing
            .map(|i| {
                (
                    performances[i].consecutive_successes,
                    performances[i].total_attempts,
                )
            })
            .unwrap_or((0, 0));

        let is_success = time_to_complete_ms <= self.success_threshold_ms && !used_tools;
        let consecutive_successes = if is_success { prev_streak + 1 } else { 0 };
        let total_attempts = prev_attempts + 1;

        let updated = WordPerformance {
            word: word.to_string(),
            level,
            last_attempt_time: Utc::now(),
            time_to_complete_ms,
            used_tools,
            consecutive_successes,
            total_attempts,
            mastery_status: classify(consecutive_successes, total_attempts),
        };

        match existing {
            Some(i) => performances[i] = updated.clone(),
            None => performances.push(updated.clone()),
        }
        let _ = self.store.save(&performances);

        updated
    }

    pub fn record_successful_completion(
        &mut self,
        word: &str,
        level: u8,
        time_to_complete_ms: u64,
    ) -> WordPerformance {
        self.record_attempt(word, level, time_to_complete_ms, false)
    }

    pub fn record_tool_usage(
        &mut self,
        word: &str,
        level: u8,
        time_to_complete_ms: u64,
    ) -> WordPerformance {
        self.record_attempt(word, level, time_to_complete_ms, true)
    }

    pub fn is_mastered(&self, word: &str) -> bool {
        self.get(word).is_some_and(|p| {
            p.mastery_status == MasteryStatus::Mastered && p.consecutive_successes >= MASTERY_STREAK
        })
    }

    pub fn mastery_info(&self, word: &str) -> MasteryInfo {
        match self.get(word) {
            Some(p) => MasteryInfo {
                attempts: p.total_attempts,
                consecutive_successes: p.consecutive_successes,
                status: p.mastery_status,
                last_time_ms: Some(p.time_to_complete_ms),
            },
            None => MasteryInfo::default(),
        }
    }

    pub fn clear_all(&mut self) {
        let _ = self.store.clear();
    }
}
