use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::stats::SessionStats;
use crate::ui::theme::Theme;

/// Running numbers for the current lesson, with a badge line for streaks and
/// high accuracy.
pub struct StatsPanel<'a> {
    stats: &'a SessionStats,
    elapsed_secs: f64,
    theme: &'a Theme,
}

impl<'a> StatsPanel<'a> {
    pub fn new(stats: &'a SessionStats, elapsed_secs: f64, theme: &'a Theme) -> Self {
        Self {
            stats,
            elapsed_secs,
            theme,
        }
    }
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let stats = self.stats;
        let accuracy = stats.accuracy();

        let acc_color = if accuracy >= 90 {
            colors.success()
        } else if accuracy >= 75 {
            colors.warning()
        } else {
            colors.error()
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Accuracy: ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{accuracy}%"),
                    Style::default().fg(acc_color).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Streak:   ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{}", stats.streak),
                    Style::default().fg(colors.accent()),
                ),
                Span::styled(
                    format!("  (best {})", stats.best_streak),
                    Style::default().fg(colors.text_pending()),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Keys:     ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{}/{}", stats.correct, stats.total),
                    Style::default().fg(colors.fg()),
                ),
            ]),
            Line::from(vec![
                Span::styled("Time:     ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{:.0}s", self.elapsed_secs),
                    Style::default().fg(colors.fg()),
                ),
            ]),
            Line::from(""),
        ];

        if stats.on_a_roll() {
            lines.push(Line::from(Span::styled(
                "\u{1f525} On a roll!",
                Style::default().fg(colors.warning()).add_modifier(Modifier::BOLD),
            )));
        }
        if stats.sharp_aim() {
            lines.push(Line::from(Span::styled(
                "\u{1f3af} Sharp aim!",
                Style::default().fg(colors.success()).add_modifier(Modifier::BOLD),
            )));
        }

        let block = Block::bordered()
            .title(" Your Stats ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
