use std::path::PathBuf;

use crate::config::Config;
use crate::engine::mastery::PerformanceTracker;
use crate::feedback::{BellFeedback, Feedback, NullFeedback};
use crate::levels::WordLevels;
use crate::session::game::GameSession;
use crate::store::json_store::JsonStore;
use crate::store::{MemoryStore, PerformanceStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Play,
    LevelSelect,
}

/// UI-side state: the game session plus a boundary cursor the player moves
/// between letters. All game semantics live in [`GameSession`]; the app only
/// translates key presses into session calls.
pub struct App {
    pub screen: AppScreen,
    pub session: GameSession,
    pub config: Config,
    pub cursor: usize,
    pub level_selected: usize,
    pub confirm_clear: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, data_dir: Option<PathBuf>) -> Self {
        let store: Box<dyn PerformanceStore> = match data_dir {
            Some(dir) => match JsonStore::with_base_dir(dir) {
                Ok(store) => Box::new(store),
                Err(_) => Box::new(MemoryStore::default()),
            },
            None => match JsonStore::new() {
                Ok(store) => Box::new(store),
                Err(_) => Box::new(MemoryStore::default()),
            },
        };
        let mut tracker = PerformanceTracker::new(store);
        tracker.success_threshold_ms = config.success_threshold_ms;

        let feedback: Box<dyn Feedback> = if config.sound {
            Box::new(BellFeedback)
        } else {
            Box::new(NullFeedback)
        };

        let session = GameSession::new(WordLevels::load(), tracker, feedback, config.start_level);

        Self {
            screen: AppScreen::Play,
            session,
            config,
            cursor: 1,
            level_selected: 0,
            confirm_clear: false,
            should_quit: false,
        }
    }

    fn max_cursor(&self) -> usize {
        self.session.word.letter_count().saturating_sub(1).max(1)
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.clamp(1, self.max_cursor());
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.clamp_cursor();
    }

    pub fn cursor_right(&mut self) {
        self.cursor += 1;
        self.clamp_cursor();
    }

    pub fn split_at_cursor(&mut self) {
        if self.session.can_split_at(self.cursor) {
            self.session.split_at(self.cursor);
        }
    }

    /// Merge the two groups meeting at the cursor boundary, if there are
    /// two groups there to merge.
    pub fn merge_at_cursor(&mut self) {
        if let Some(gap) = self.gap_at_cursor() {
            self.session.merge_adjacent(gap);
        }
    }

    /// Gap index of the group boundary sitting exactly at the cursor.
    pub fn gap_at_cursor(&self) -> Option<usize> {
        let mut boundary = 0;
        for (i, group) in self.session.word.letter_groups.iter().enumerate() {
            boundary += group.letters.len();
            if boundary == self.cursor {
                return (i + 1 < self.session.word.letter_groups.len()).then_some(i);
            }
            if boundary > self.cursor {
                return None;
            }
        }
        None
    }

    pub fn separate_all(&mut self) {
        self.session.separate_all();
    }

    pub fn collapse_all(&mut self) {
        self.session.collapse_all();
    }

    pub fn next_word(&mut self) {
        self.session.next_word();
        self.cursor = 1;
        self.clamp_cursor();
    }

    pub fn open_level_select(&mut self) {
        self.level_selected = (self.session.current_level - 1) as usize;
        self.screen = AppScreen::LevelSelect;
    }

    pub fn level_select_prev(&mut self) {
        self.level_selected = self.level_selected.saturating_sub(1);
    }

    pub fn level_select_next(&mut self) {
        let last = (self.session.level_count() - 1) as usize;
        self.level_selected = (self.level_selected + 1).min(last);
    }

    pub fn choose_level(&mut self) {
        self.session.switch_to_level(self.level_selected as u8 + 1);
        self.cursor = 1;
        self.clamp_cursor();
        self.screen = AppScreen::Play;
    }

    pub fn switch_to_level(&mut self, level: u8) {
        self.session.switch_to_level(level);
        self.cursor = 1;
        self.clamp_cursor();
    }

    /// First press arms the confirmation, second press wipes the stored
    /// performance history.
    pub fn request_clear_history(&mut self) {
        if self.confirm_clear {
            self.session.clear_history();
            self.confirm_clear = false;
        } else {
            self.confirm_clear = true;
        }
    }

    pub fn cancel_clear_history(&mut self) {
        self.confirm_clear = false;
    }
}
