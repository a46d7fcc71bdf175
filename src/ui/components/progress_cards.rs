use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::Lesson;
use crate::progress::MAX_STARS;
use crate::store::schema::ProgressRecord;
use crate::ui::theme::Theme;

/// Lessons tab: one card per lesson with its status and stars.
pub struct ProgressCards<'a> {
    pub lessons: &'a [Lesson],
    pub progress: &'a ProgressRecord,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> ProgressCards<'a> {
    pub fn new(
        lessons: &'a [Lesson],
        progress: &'a ProgressRecord,
        selected: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            lessons,
            progress,
            selected,
            theme,
        }
    }
}

pub fn star_string(stars: u8) -> String {
    let filled = stars.min(MAX_STARS) as usize;
    let mut out = "\u{2b50}".repeat(filled);
    out.push_str(&"\u{2606}".repeat(MAX_STARS as usize - filled));
    out
}

impl Widget for ProgressCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.lessons
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(area);

        for (i, lesson) in self.lessons.iter().enumerate() {
            let Some(&row) = rows.get(i) else { break };
            let is_selected = i == self.selected;
            let completed = self.progress.is_completed(i);
            let unlocked = self.progress.is_unlocked(i);

            let status = if completed {
                Span::styled("Completed", Style::default().fg(colors.success()))
            } else if unlocked {
                Span::styled("Ready", Style::default().fg(colors.accent()))
            } else {
                Span::styled("Locked", Style::default().fg(colors.text_pending()))
            };

            let line = Line::from(vec![
                Span::styled(
                    format!("{} {}  ", lesson.emoji, lesson.title),
                    Style::default()
                        .fg(if unlocked { colors.fg() } else { colors.text_pending() })
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    star_string(self.progress.stars_for(i)),
                    Style::default().fg(colors.warning()),
                ),
                Span::raw("  "),
                status,
            ]);

            let block = Block::bordered()
                .border_style(Style::default().fg(if is_selected {
                    colors.border_focused()
                } else {
                    colors.border()
                }))
                .style(Style::default().bg(colors.bg()));
            Paragraph::new(line).block(block).render(row, buf);
        }
    }
}
