use crate::engine::mastery::{MASTERY_STREAK, MasteryStatus, WordPerformance};

/// Cap on the warm-up round shown at session start.
pub const SESSION_BONUS_LIMIT: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BonusProgress {
    pub completed: usize,
    pub total: usize,
    pub remaining: usize,
}

pub fn needs_work(performance: &WordPerformance) -> bool {
    performance.mastery_status != MasteryStatus::Mastered
        || performance.consecutive_successes < MASTERY_STREAK
}

/// Words to warm up on at session start: everything still needing work,
/// most-struggled first (lowest streak, stable order on ties), capped at
/// [`SESSION_BONUS_LIMIT`].
pub fn session_start_bonus_words(records: &[WordPerformance]) -> Vec<String> {
    let mut needing_work: Vec<&WordPerformance> =
        records.iter().filter(|p| needs_work(p)).collect();
    needing_work.sort_by_key(|p| p.consecutive_successes);
    needing_work
        .into_iter()
        .take(SESSION_BONUS_LIMIT)
        .map(|p| p.word.clone())
        .collect()
}

/// Words from one level still needing work, lowest streak first; ties go to
/// the most recently attempted word to keep momentum on what was just
/// struggled with.
pub fn level_bonus_words(records: &[WordPerformance], level: u8) -> Vec<String> {
    let mut needing_work: Vec<&WordPerformance> = records
        .iter()
        .filter(|p| p.level == level && needs_work(p))
        .collect();
    needing_work.sort_by(|a, b| {
        a.consecutive_successes
            .cmp(&b.consecutive_successes)
            .then(b.last_attempt_time.cmp(&a.last_attempt_time))
    });
    needing_work.into_iter().map(|p| p.word.clone()).collect()
}

pub fn should_show_session_start_bonus(records: &[WordPerformance]) -> bool {
    records.iter().any(needs_work)
}

pub fn should_show_level_bonus(records: &[WordPerformance], level: u8) -> bool {
    records.iter().any(|p| p.level == level && needs_work(p))
}

pub fn bonus_progress(bonus_words: &[String], current_index: usize) -> BonusProgress {
    BonusProgress {
        completed: current_index,
        total: bonus_words.len(),
        remaining: bonus_words.len().saturating_sub(current_index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record(word: &str, level: u8, streak: u32, minutes_ago: i64) -> WordPerformance {
        WordPerformance {
            word: word.to_string(),
            level,
            last_attempt_time: Utc::now() - Duration::minutes(minutes_ago),
            time_to_complete_ms: 3000,
            used_tools: false,
            consecutive_successes: streak,
            total_attempts: streak.max(1),
            mastery_status: if streak >= MASTERY_STREAK {
                MasteryStatus::Mastered
            } else {
                MasteryStatus::Learning
            },
        }
    }

    #[test]
    fn mastered_words_do_not_need_work() {
        assert!(!needs_work(&record("TREE", 1, 3, 0)));
        assert!(needs_work(&record("TREE", 1, 2, 0)));
        assert!(needs_work(&record("TREE", 1, 0, 0)));
    }

    #[test]
    fn session_bonus_sorts_most_struggled_first() {
        let records = vec![
            record("SMILE", 1, 2, 0),
            record("BALL", 1, 0, 0),
            record("TREE", 1, 1, 0),
            record("HOUSE", 1, 3, 0),
        ];
        let words = session_start_bonus_words(&records);
        assert_eq!(words, vec!["BALL", "TREE", "SMILE"]);
    }

    #[test]
    fn session_bonus_truncates_to_ten() {
        let records: Vec<WordPerformance> = (0..15)
            .map(|i| record(&format!("WORD{i}"), 1, (i % 3) as u32, 0))
            .collect();
        let words = session_start_bonus_words(&records);
        assert_eq!(words.len(), SESSION_BONUS_LIMIT);
        // Ascending by streak across the cap.
        assert!(words.iter().take(5).all(|w| {
            let i: usize = w.trim_start_matches("WORD").parse().unwrap();
            i % 3 == 0
        }));
    }

    #[test]
    fn session_bonus_tie_break_is_stable() {
        let records = vec![
            record("FIRST", 1, 1, 0),
            record("SECOND", 2, 1, 0),
            record("THIRD", 1, 1, 0),
        ];
        let words = session_start_bonus_words(&records);
        assert_eq!(words, vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn level_bonus_filters_to_level() {
        let records = vec![
            record("BALL", 1, 0, 0),
            record("ANIMAL", 2, 0, 0),
            record("TREE", 1, 1, 0),
        ];
        let words = level_bonus_words(&records, 1);
        assert_eq!(words, vec!["BALL", "TREE"]);
        assert_eq!(level_bonus_words(&records, 3), Vec::<String>::new());
    }

    #[test]
    fn level_bonus_ties_prefer_most_recent_attempt() {
        let records = vec![
            record("OLDER", 1, 1, 60),
            record("NEWER", 1, 1, 5),
            record("WORST", 1, 0, 120),
        ];
        let words = level_bonus_words(&records, 1);
        assert_eq!(words, vec!["WORST", "NEWER", "OLDER"]);
    }

    #[test]
    fn should_show_flags_track_needing_work() {
        assert!(!should_show_session_start_bonus(&[]));
        assert!(!should_show_session_start_bonus(&[record("A", 1, 3, 0)]));
        assert!(should_show_session_start_bonus(&[record("A", 1, 1, 0)]));

        let records = vec![record("A", 1, 3, 0), record("B", 2, 0, 0)];
        assert!(!should_show_level_bonus(&records, 1));
        assert!(should_show_level_bonus(&records, 2));
    }

    #[test]
    fn bonus_progress_counts_remaining() {
        let words = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let progress = bonus_progress(&words, 1);
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.remaining, 2);
    }
}
