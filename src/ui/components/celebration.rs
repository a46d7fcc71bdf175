use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::Lesson;
use crate::session::lesson::Completion;
use crate::session::stats::accuracy_percent;
use crate::ui::theme::Theme;

/// Shown inside the lesson screen once the last exercise is done.
pub struct Celebration<'a> {
    pub lesson: &'a Lesson,
    pub completion: &'a Completion,
    pub best_streak: u64,
    pub theme: &'a Theme,
}

impl<'a> Celebration<'a> {
    pub fn new(
        lesson: &'a Lesson,
        completion: &'a Completion,
        best_streak: u64,
        theme: &'a Theme,
    ) -> Self {
        Self {
            lesson,
            completion,
            best_streak,
            theme,
        }
    }
}

impl Widget for Celebration<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let done = self.completion;
        let accuracy = accuracy_percent(done.correct_keystrokes, done.total_keystrokes);

        let block = Block::bordered()
            .title(" Lesson Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let headline = vec![
            Line::from(Span::styled(
                "\u{1f389} Amazing work! \u{1f389}",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "You finished {} {}",
                    self.lesson.emoji, self.lesson.title
                ),
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(headline)
            .alignment(Alignment::Center)
            .render(layout[1], buf);

        let acc_color = if accuracy >= 90 {
            colors.success()
        } else if accuracy >= 75 {
            colors.warning()
        } else {
            colors.error()
        };
        let numbers = vec![
            Line::from(vec![
                Span::styled("Accuracy:    ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{accuracy}%"),
                    Style::default().fg(acc_color).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Keys typed:  ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{}", done.total_keystrokes),
                    Style::default().fg(colors.fg()),
                ),
                Span::styled(
                    format!("  ({} correct)", done.correct_keystrokes),
                    Style::default().fg(colors.text_pending()),
                ),
            ]),
            Line::from(vec![
                Span::styled("Best streak: ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{}", self.best_streak),
                    Style::default().fg(colors.accent()),
                ),
            ]),
        ];
        Paragraph::new(numbers)
            .alignment(Alignment::Center)
            .render(layout[2], buf);

        Paragraph::new(Line::from(Span::styled(
            "[Enter/Space] See your progress  [Esc] Lessons",
            Style::default().fg(colors.accent()),
        )))
        .alignment(Alignment::Center)
        .render(layout[4], buf);
    }
}
