use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::mastery::{MASTERY_STREAK, MasteryInfo, MasteryStatus};
use crate::session::game::{GameMode, GameSession};

/// One-line progress readout: active list position, bonus banner when a
/// bonus round is running, and the current word's mastery badge.
pub struct StatusBar<'a> {
    pub session: &'a GameSession,
}

impl<'a> StatusBar<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self { session }
    }

    fn progress_span(&self) -> Span<'static> {
        let info = self.session.level_info();
        let bonus_style = Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD);
        let progress = self.session.bonus_progress().unwrap_or_default();
        match self.session.mode {
            GameMode::Regular => Span::raw(format!(
                "level {} · word {}/{}",
                info.level,
                info.word_index + 1,
                info.total_words
            )),
            GameMode::Bonus => Span::styled(
                format!(
                    "bonus round (level {}) · {} of {}",
                    self.session.bonus_source_level.unwrap_or(info.level),
                    progress.completed + 1,
                    progress.total
                ),
                bonus_style,
            ),
            GameMode::SessionStartBonus => Span::styled(
                format!(
                    "warm-up round · {} of {}",
                    progress.completed + 1,
                    progress.total
                ),
                bonus_style,
            ),
        }
    }

    fn badge_span(info: &MasteryInfo) -> Span<'static> {
        match info.status {
            MasteryStatus::New => Span::styled("new", Style::default().fg(Color::DarkGray)),
            MasteryStatus::Learning => Span::styled(
                format!("learning {}/{}", info.consecutive_successes, MASTERY_STREAK),
                Style::default().fg(Color::Yellow),
            ),
            MasteryStatus::Mastered => Span::styled(
                "★ mastered",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let info = self.session.mastery_info(&self.session.current_word());
        let line = Line::from(vec![
            self.progress_span(),
            Span::raw("  "),
            Self::badge_span(&info),
        ]);
        Paragraph::new(line)
            .block(Block::bordered().title(" progress "))
            .render(area, buf);
    }
}
