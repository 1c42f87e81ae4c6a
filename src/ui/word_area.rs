use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::letter_groups::WordState;

/// Renders the current word as its letter groups with a boundary cursor.
/// Grouped runs are underlined; gaps between groups show a dot; the cursor
/// boundary is highlighted whether or not it is currently split there.
pub struct WordArea<'a> {
    pub word: &'a WordState,
    pub cursor: usize,
}

impl<'a> WordArea<'a> {
    pub fn new(word: &'a WordState, cursor: usize) -> Self {
        Self { word, cursor }
    }

    fn line(&self) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let group_boundaries: Vec<usize> = self
            .word
            .letter_groups
            .iter()
            .scan(0, |acc, g| {
                *acc += g.letters.len();
                Some(*acc)
            })
            .collect();

        let mut position = 0;
        for group in &self.word.letter_groups {
            let letter_style = if group.is_grouped {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::White)
            };
            for letter in &group.letters {
                if position > 0 {
                    spans.push(self.boundary_span(position, &group_boundaries));
                }
                spans.push(Span::styled(letter.to_string(), letter_style));
                position += 1;
            }
        }
        Line::from(spans)
    }

    fn boundary_span(&self, boundary: usize, group_boundaries: &[usize]) -> Span<'static> {
        let is_gap = group_boundaries.contains(&boundary);
        let symbol = if is_gap { " · " } else { " " };
        let mut style = if is_gap {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        if boundary == self.cursor {
            style = style.fg(Color::Cyan).add_modifier(Modifier::REVERSED);
        }
        Span::styled(symbol.to_string(), style)
    }
}

impl Widget for WordArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(" word ");
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let line = self.line();
        let width = line.width() as u16;
        let x_offset = inner.width.saturating_sub(width) / 2;
        let y_offset = inner.height / 2;
        let centered = Rect {
            x: inner.x + x_offset,
            y: inner.y + y_offset,
            width: inner.width.saturating_sub(x_offset),
            height: 1,
        };
        Paragraph::new(line).render(centered, buf);
    }
}
