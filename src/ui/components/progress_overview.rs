use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::progress::Rating;
use crate::store::schema::ProgressRecord;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::theme::Theme;

/// Overview tab: headline numbers, journey bar, rating and achievements.
pub struct ProgressOverview<'a> {
    pub progress: &'a ProgressRecord,
    pub lesson_count: usize,
    pub theme: &'a Theme,
}

impl<'a> ProgressOverview<'a> {
    pub fn new(progress: &'a ProgressRecord, lesson_count: usize, theme: &'a Theme) -> Self {
        Self {
            progress,
            lesson_count,
            theme,
        }
    }
}

impl Widget for ProgressOverview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let record = self.progress;
        let done = record.completed_lessons.len();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(0),
            ])
            .split(area);

        let stat = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(label, Style::default().fg(colors.fg())),
                Span::styled(
                    value,
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        };
        let numbers = vec![
            stat("Lessons done:  ", format!("{done} / {}", self.lesson_count)),
            stat("Accuracy:      ", format!("{}%", record.overall_accuracy())),
            stat("Keys typed:    ", format!("{}", record.stats.total_keystrokes)),
            stat("Milestone:     ", record.milestone().to_string()),
        ];
        let block = Block::bordered()
            .title(" Your Journey ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        Paragraph::new(numbers).block(block).render(layout[0], buf);

        let ratio = if self.lesson_count == 0 {
            0.0
        } else {
            done as f64 / self.lesson_count as f64
        };
        ProgressBar::new("Journey", ratio, self.theme).render(layout[1], buf);

        let rating = record.rating();
        let rating_color = match rating {
            Rating::Excellent => colors.success(),
            Rating::Great => colors.accent(),
            Rating::KeepGoing => colors.warning(),
        };
        let rating_lines = vec![
            Line::from(Span::styled(
                rating.label(),
                Style::default()
                    .fg(rating_color)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                rating.encouragement(),
                Style::default().fg(colors.fg()),
            )),
        ];
        Paragraph::new(rating_lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(layout[2], buf);

        let achievement_lines: Vec<Line> = record
            .achievements(self.lesson_count)
            .into_iter()
            .map(|(achievement, earned)| {
                let style = if earned {
                    Style::default().fg(colors.success())
                } else {
                    Style::default().fg(colors.text_pending())
                };
                let mark = if earned { achievement.emoji() } else { "\u{1f512}" };
                Line::from(vec![
                    Span::styled(format!("{mark} {}", achievement.title()), style),
                    Span::styled(
                        format!("  {}", achievement.description()),
                        Style::default().fg(colors.text_pending()),
                    ),
                ])
            })
            .collect();
        let block = Block::bordered()
            .title(" Achievements ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        Paragraph::new(achievement_lines)
            .block(block)
            .render(layout[3], buf);
    }
}
