use std::io::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackEvent {
    WordAdvanced,
    LevelSwitched,
    BonusStarted,
    BonusComplete,
    ToolUsed,
    WordMastered,
}

impl FeedbackEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackEvent::WordAdvanced => "word_advanced",
            FeedbackEvent::LevelSwitched => "level_switched",
            FeedbackEvent::BonusStarted => "bonus_started",
            FeedbackEvent::BonusComplete => "bonus_complete",
            FeedbackEvent::ToolUsed => "tool_used",
            FeedbackEvent::WordMastered => "word_mastered",
        }
    }
}

/// Fire-and-forget feedback sink. Implementations must never let a playback
/// failure escape into the game.
pub trait Feedback {
    fn notify(&self, event: FeedbackEvent);
}

/// Silent sink for tests and headless runs.
pub struct NullFeedback;

impl Feedback for NullFeedback {
    fn notify(&self, _event: FeedbackEvent) {}
}

/// Terminal-bell sink: rings on the milestone events, stays quiet on the
/// chatty ones. Write errors are swallowed.
pub struct BellFeedback;

impl Feedback for BellFeedback {
    fn notify(&self, event: FeedbackEvent) {
        let ring = matches!(
            event,
            FeedbackEvent::BonusComplete | FeedbackEvent::WordMastered | FeedbackEvent::LevelSwitched
        );
        if ring {
            let mut stdout = std::io::stdout();
            let _ = stdout.write_all(b"\x07");
            let _ = stdout.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_are_stable() {
        assert_eq!(FeedbackEvent::WordAdvanced.as_str(), "word_advanced");
        assert_eq!(FeedbackEvent::BonusComplete.as_str(), "bonus_complete");
    }

    #[test]
    fn null_feedback_accepts_everything() {
        let feedback = NullFeedback;
        feedback.notify(FeedbackEvent::ToolUsed);
        feedback.notify(FeedbackEvent::WordMastered);
    }
}
