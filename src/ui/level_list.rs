use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Widget};

use crate::engine::mastery::{MasteryStatus, PerformanceTracker};
use crate::levels::WordLevels;

/// Level picker: one row per level with a first-word preview and how many of
/// its practiced words are mastered so far.
pub struct LevelList<'a> {
    pub levels: &'a WordLevels,
    pub tracker: &'a PerformanceTracker,
    pub selected: usize,
}

impl<'a> LevelList<'a> {
    pub fn new(levels: &'a WordLevels, tracker: &'a PerformanceTracker, selected: usize) -> Self {
        Self {
            levels,
            tracker,
            selected,
        }
    }

    fn row(&self, level: u8) -> Line<'static> {
        let words = self.levels.words(level);
        let records = self.tracker.records_for_level(level);
        let mastered = records
            .iter()
            .filter(|p| p.mastery_status == MasteryStatus::Mastered)
            .count();
        Line::from(vec![
            Span::styled(
                format!("level {level:>2}  "),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{} words, e.g. {}  ", words.len(), words[0])),
            Span::styled(
                format!("{mastered}/{} mastered", words.len()),
                Style::default().fg(Color::Green),
            ),
        ])
    }
}

impl Widget for LevelList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = (1..=self.levels.count())
            .map(|level| {
                let item = ListItem::new(self.row(level));
                if (level - 1) as usize == self.selected {
                    item.style(
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    item
                }
            })
            .collect();
        List::new(items)
            .block(Block::bordered().title(" choose a level "))
            .render(area, buf);
    }
}
