use std::time::Instant;

use crate::engine::bonus::{self, BonusProgress};
use crate::engine::letter_groups::WordState;
use crate::engine::mastery::{MASTERY_STREAK, MasteryInfo, PerformanceTracker};
use crate::feedback::{Feedback, FeedbackEvent};
use crate::levels::WordLevels;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    Regular,
    Bonus,
    SessionStartBonus,
}

impl GameMode {
    pub fn is_bonus(self) -> bool {
        matches!(self, GameMode::Bonus | GameMode::SessionStartBonus)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelInfo {
    pub level: u8,
    pub word_index: usize,
    pub total_words: usize,
    pub current_word: String,
}

/// Orchestrates level progression, word advancement, and bonus-round
/// entry/exit. Exactly one word list is active at a time: the current
/// level's regular list, or the bonus list when a bonus round is running.
pub struct GameSession {
    pub current_level: u8,
    pub word_index: usize,
    pub mode: GameMode,
    pub bonus_words: Vec<String>,
    pub bonus_source_level: Option<u8>,
    pub word: WordState,
    pub tracker: PerformanceTracker,
    levels: WordLevels,
    feedback: Box<dyn Feedback>,
    home_level: u8,
    word_started_at: Instant,
    tools_used: bool,
}

impl GameSession {
    /// Start a session. Enters the session-start bonus round when any
    /// stored word still needs work, otherwise begins the regular list of
    /// `start_level`.
    pub fn new(
        levels: WordLevels,
        tracker: PerformanceTracker,
        feedback: Box<dyn Feedback>,
        start_level: u8,
    ) -> Self {
        let home_level = start_level.clamp(1, levels.count());
        let records = tracker.records();
        let (mode, bonus_words) = if bonus::should_show_session_start_bonus(&records) {
            (
                GameMode::SessionStartBonus,
                bonus::session_start_bonus_words(&records),
            )
        } else {
            (GameMode::Regular, Vec::new())
        };

        let first_word = match mode {
            GameMode::SessionStartBonus => bonus_words[0].clone(),
            _ => levels.words(home_level)[0].clone(),
        };
        let session = Self {
            current_level: home_level,
            word_index: 0,
            mode,
            bonus_words,
            bonus_source_level: None,
            word: WordState::new(&first_word),
            tracker,
            levels,
            feedback,
            home_level,
            word_started_at: Instant::now(),
            tools_used: false,
        };
        if session.mode == GameMode::SessionStartBonus {
            session.feedback.notify(FeedbackEvent::BonusStarted);
        }
        session
    }

    pub fn current_word(&self) -> String {
        match self.mode {
            GameMode::Regular => self.levels.words(self.current_level)[self.word_index].clone(),
            GameMode::Bonus | GameMode::SessionStartBonus => self
                .bonus_words
                .get(self.word_index)
                .cloned()
                .unwrap_or_default(),
        }
    }

    pub fn level_info(&self) -> LevelInfo {
        let total_words = match self.mode {
            GameMode::Regular => self.levels.words(self.current_level).len(),
            GameMode::Bonus | GameMode::SessionStartBonus => self.bonus_words.len(),
        };
        LevelInfo {
            level: self.current_level,
            word_index: self.word_index,
            total_words,
            current_word: self.current_word(),
        }
    }

    pub fn level_count(&self) -> u8 {
        self.levels.count()
    }

    pub fn word_levels(&self) -> &WordLevels {
        &self.levels
    }

    pub fn bonus_progress(&self) -> Option<BonusProgress> {
        self.mode
            .is_bonus()
            .then(|| bonus::bonus_progress(&self.bonus_words, self.word_index))
    }

    pub fn mastery_info(&self, word: &str) -> MasteryInfo {
        self.tracker.mastery_info(word)
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.word_started_at.elapsed().as_millis() as u64
    }

    /// Finalize the outgoing word's attempt, then advance. Regular lists
    /// wrap to index 0; a wrap first checks for a level bonus round. Bonus
    /// exhaustion returns to the regular rotation.
    pub fn next_word(&mut self) {
        self.record_completion();

        match self.mode {
            GameMode::Regular => {
                let total = self.levels.words(self.current_level).len();
                if self.word_index + 1 >= total {
                    let pending =
                        bonus::level_bonus_words(&self.tracker.records(), self.current_level);
                    if pending.is_empty() {
                        self.word_index = 0;
                    } else {
                        self.bonus_source_level = Some(self.current_level);
                        self.bonus_words = pending;
                        self.mode = GameMode::Bonus;
                        self.word_index = 0;
                        self.feedback.notify(FeedbackEvent::BonusStarted);
                    }
                } else {
                    self.word_index += 1;
                }
            }
            GameMode::Bonus | GameMode::SessionStartBonus => {
                if self.word_index + 1 >= self.bonus_words.len() {
                    self.finish_bonus();
                } else {
                    self.word_index += 1;
                }
            }
        }

        self.present_current_word();
        self.feedback.notify(FeedbackEvent::WordAdvanced);
    }

    fn finish_bonus(&mut self) {
        self.feedback.notify(FeedbackEvent::BonusComplete);
        match self.mode {
            GameMode::SessionStartBonus => {
                self.current_level = self.home_level;
            }
            _ => {
                let source = self.bonus_source_level.take().unwrap_or(self.current_level);
                self.current_level = if source >= self.levels.count() {
                    1
                } else {
                    source + 1
                };
            }
        }
        self.mode = GameMode::Regular;
        self.word_index = 0;
        self.bonus_words.clear();
        self.bonus_source_level = None;
    }

    /// Jump straight to a regular level, abandoning any bonus round. The
    /// outgoing word is not recorded. No-op when already on that regular
    /// level.
    pub fn switch_to_level(&mut self, level: u8) {
        let level = level.clamp(1, self.levels.count());
        if self.mode == GameMode::Regular && self.current_level == level {
            return;
        }
        self.mode = GameMode::Regular;
        self.current_level = level;
        self.word_index = 0;
        self.bonus_words.clear();
        self.bonus_source_level = None;
        self.present_current_word();
        self.feedback.notify(FeedbackEvent::LevelSwitched);
    }

    pub fn clear_history(&mut self) {
        self.tracker.clear_all();
    }

    // Tool operations. Each one that actually changes the grouping marks
    // the current attempt as tool-assisted and records a tool-usage attempt
    // without advancing the word.

    pub fn split_at(&mut self, position: usize) {
        self.apply_tool(|word| word.split_at(position));
    }

    pub fn merge_adjacent(&mut self, gap_index: usize) {
        self.apply_tool(|word| word.merge_adjacent(gap_index));
    }

    pub fn merge_range(&mut self, start: usize, end: usize) {
        self.apply_tool(|word| word.merge_range(start, end));
    }

    pub fn separate_all(&mut self) {
        self.apply_tool(|word| word.separate_all());
    }

    pub fn collapse_all(&mut self) {
        self.apply_tool(|word| word.collapse_all());
    }

    pub fn can_split_at(&self, position: usize) -> bool {
        self.word.can_split_at(position)
    }

    fn apply_tool(&mut self, op: impl FnOnce(&mut WordState)) {
        let before = self.word.letter_groups.clone();
        op(&mut self.word);
        if self.word.letter_groups == before {
            return;
        }
        self.tools_used = true;
        let word = self.current_word();
        let level = self.record_level_for(&word);
        let elapsed = self.elapsed_ms();
        self.tracker.record_tool_usage(&word, level, elapsed);
        self.feedback.notify(FeedbackEvent::ToolUsed);
    }

    /// Record the attempt that ends when the player moves on. `used_tools`
    /// sticks for the whole attempt, so a quick finish after a tool still
    /// counts as assisted.
    fn record_completion(&mut self) {
        let word = self.current_word();
        if word.is_empty() {
            return;
        }
        let level = self.record_level_for(&word);
        let elapsed = self.elapsed_ms();
        let record = self
            .tracker
            .record_attempt(&word, level, elapsed, self.tools_used);
        if record.consecutive_successes == MASTERY_STREAK {
            self.feedback.notify(FeedbackEvent::WordMastered);
        }
    }

    /// Bonus words keep the level they were first practiced under so level
    /// bonus filtering stays meaningful; regular words use the active level.
    fn record_level_for(&self, word: &str) -> u8 {
        if self.mode.is_bonus() {
            self.tracker
                .get(word)
                .map(|p| p.level)
                .unwrap_or(self.current_level)
        } else {
            self.current_level
        }
    }

    fn present_current_word(&mut self) {
        let word = self.current_word();
        self.word = WordState::new(&word);
        self.word_started_at = Instant::now();
        self.tools_used = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::NullFeedback;

    fn fresh_session() -> GameSession {
        GameSession::new(
            WordLevels::load(),
            PerformanceTracker::in_memory(),
            Box::new(NullFeedback),
            1,
        )
    }

    fn session_with_tracker(tracker: PerformanceTracker) -> GameSession {
        GameSession::new(
            WordLevels::load(),
            tracker,
            Box::new(NullFeedback),
            1,
        )
    }

    #[test]
    fn fresh_session_starts_regular_at_level_one() {
        let session = fresh_session();
        assert_eq!(session.mode, GameMode::Regular);
        assert_eq!(session.current_level, 1);
        assert_eq!(session.word_index, 0);
        assert_eq!(session.word.original_word, "BALL");
        assert!(session.bonus_words.is_empty());
    }

    #[test]
    fn next_word_advances_and_resets_word_state() {
        let mut session = fresh_session();
        session.split_at(2);
        assert!(session.word.letter_groups.len() > 1);
        session.next_word();
        assert_eq!(session.word_index, 1);
        assert_eq!(session.word.original_word, "TREE");
        assert_eq!(session.word.letter_groups.len(), 1);
    }

    #[test]
    fn next_word_records_outgoing_performance() {
        let mut session = fresh_session();
        session.next_word();
        let record = session.tracker.get("BALL").unwrap();
        assert_eq!(record.total_attempts, 1);
        assert_eq!(record.level, 1);
        assert!(!record.used_tools);
        // Fast and tool-free: counts toward the streak.
        assert_eq!(record.consecutive_successes, 1);
    }

    #[test]
    fn tool_usage_sticks_until_the_word_advances() {
        let mut session = fresh_session();
        session.split_at(2);
        let after_tool = session.tracker.get("BALL").unwrap();
        assert!(after_tool.used_tools);
        assert_eq!(after_tool.total_attempts, 1);

        session.next_word();
        let finalized = session.tracker.get("BALL").unwrap();
        assert!(finalized.used_tools);
        assert_eq!(finalized.total_attempts, 2);
        assert_eq!(finalized.consecutive_successes, 0);
    }

    #[test]
    fn invalid_tool_input_does_not_record_usage() {
        let mut session = fresh_session();
        session.split_at(0);
        session.merge_adjacent(5);
        assert!(session.tracker.get("BALL").is_none());
        session.next_word();
        assert_eq!(session.tracker.get("BALL").unwrap().consecutive_successes, 1);
    }

    #[test]
    fn wrap_with_no_needy_words_stays_regular() {
        let mut session = fresh_session();
        let total = session.levels.words(1).len();
        // Run enough clean passes (bonus rounds included) to master every
        // level-1 word; only then does a wrap stay regular.
        for _ in 0..3 {
            for _ in 0..total {
                session.next_word();
            }
            if session.mode.is_bonus() {
                let remaining = session.bonus_words.len() - session.word_index;
                for _ in 0..remaining {
                    session.next_word();
                }
                session.switch_to_level(1);
            }
        }
        // All level-1 words now mastered; the next wrap must stay regular.
        assert_eq!(session.mode, GameMode::Regular);
        assert_eq!(session.current_level, 1);
        session.word_index = total - 1;
        session.present_current_word();
        session.next_word();
        assert_eq!(session.mode, GameMode::Regular);
        assert_eq!(session.word_index, 0);
        assert_eq!(session.current_level, 1);
    }

    #[test]
    fn wrap_with_needy_words_inserts_level_bonus() {
        let mut session = fresh_session();
        let total = session.levels.words(1).len();
        // Use a tool on the first word so it needs work.
        session.split_at(2);
        for _ in 0..total {
            session.next_word();
        }
        assert_eq!(session.mode, GameMode::Bonus);
        assert_eq!(session.bonus_source_level, Some(1));
        assert_eq!(session.word_index, 0);
        assert!(session.bonus_words.contains(&"BALL".to_string()));
        // Needy words from other levels are excluded by construction.
        assert!(session.bonus_words.iter().all(|w| {
            session.tracker.get(w).map(|p| p.level) == Some(1)
        }));
    }

    #[test]
    fn level_bonus_completion_advances_to_next_level() {
        let mut session = fresh_session();
        let total = session.levels.words(1).len();
        session.split_at(2);
        for _ in 0..total {
            session.next_word();
        }
        assert_eq!(session.mode, GameMode::Bonus);
        let bonus_len = session.bonus_words.len();
        for _ in 0..bonus_len {
            session.next_word();
        }
        assert_eq!(session.mode, GameMode::Regular);
        assert_eq!(session.current_level, 2);
        assert_eq!(session.word_index, 0);
        assert!(session.bonus_words.is_empty());
        assert_eq!(session.bonus_source_level, None);
    }

    #[test]
    fn bonus_from_top_level_wraps_to_level_one() {
        let mut session = fresh_session();
        let top = session.level_count();
        session.switch_to_level(top);
        session.split_at(2);
        let total = session.levels.words(top).len();
        for _ in 0..total {
            session.next_word();
        }
        assert_eq!(session.mode, GameMode::Bonus);
        let bonus_len = session.bonus_words.len();
        for _ in 0..bonus_len {
            session.next_word();
        }
        assert_eq!(session.mode, GameMode::Regular);
        assert_eq!(session.current_level, 1);
    }

    #[test]
    fn session_start_bonus_runs_when_words_need_work() {
        let mut tracker = PerformanceTracker::in_memory();
        tracker.record_tool_usage("HOUSE", 1, 8000);
        tracker.record_tool_usage("ANIMAL", 2, 8000);
        let session = session_with_tracker(tracker);
        assert_eq!(session.mode, GameMode::SessionStartBonus);
        assert_eq!(session.bonus_words.len(), 2);
        assert_eq!(session.word.original_word, session.bonus_words[0]);
    }

    #[test]
    fn session_start_bonus_returns_to_regular_level_one() {
        let mut tracker = PerformanceTracker::in_memory();
        tracker.record_tool_usage("HOUSE", 1, 8000);
        let mut session = session_with_tracker(tracker);
        assert_eq!(session.mode, GameMode::SessionStartBonus);
        session.next_word();
        assert_eq!(session.mode, GameMode::Regular);
        assert_eq!(session.current_level, 1);
        assert_eq!(session.word_index, 0);
        assert_eq!(session.word.original_word, "BALL");
    }

    #[test]
    fn bonus_attempts_keep_the_words_original_level() {
        let mut tracker = PerformanceTracker::in_memory();
        tracker.record_tool_usage("ANIMAL", 2, 8000);
        let mut session = session_with_tracker(tracker);
        assert_eq!(session.mode, GameMode::SessionStartBonus);
        session.next_word();
        assert_eq!(session.tracker.get("ANIMAL").unwrap().level, 2);
    }

    #[test]
    fn switch_to_level_abandons_bonus() {
        let mut tracker = PerformanceTracker::in_memory();
        tracker.record_tool_usage("HOUSE", 1, 8000);
        let mut session = session_with_tracker(tracker);
        assert_eq!(session.mode, GameMode::SessionStartBonus);
        session.switch_to_level(3);
        assert_eq!(session.mode, GameMode::Regular);
        assert_eq!(session.current_level, 3);
        assert_eq!(session.word_index, 0);
        assert!(session.bonus_words.is_empty());
        // Abandoned word was not recorded as an attempt.
        assert_eq!(session.tracker.get("HOUSE").unwrap().total_attempts, 1);
    }

    #[test]
    fn switch_to_same_regular_level_is_noop() {
        let mut session = fresh_session();
        session.next_word();
        session.next_word();
        let index = session.word_index;
        session.switch_to_level(1);
        assert_eq!(session.word_index, index);
    }

    #[test]
    fn switch_to_level_clamps_out_of_range() {
        let mut session = fresh_session();
        session.switch_to_level(99);
        assert_eq!(session.current_level, session.level_count());
    }

    #[test]
    fn level_info_tracks_active_list() {
        let session = fresh_session();
        let info = session.level_info();
        assert_eq!(info.level, 1);
        assert_eq!(info.word_index, 0);
        assert_eq!(info.total_words, session.levels.words(1).len());
        assert_eq!(info.current_word, "BALL");
        assert_eq!(session.bonus_progress(), None);
    }

    #[test]
    fn bonus_progress_reports_remaining_words() {
        let mut tracker = PerformanceTracker::in_memory();
        tracker.record_tool_usage("HOUSE", 1, 8000);
        tracker.record_tool_usage("TREE", 1, 8000);
        let session = session_with_tracker(tracker);
        let progress = session.bonus_progress().unwrap();
        assert_eq!(progress.total, 2);
        assert_eq!(progress.completed, 0);
        assert_eq!(progress.remaining, 2);
    }
}
