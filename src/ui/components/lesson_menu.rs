use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::Lesson;
use crate::store::schema::ProgressRecord;
use crate::ui::theme::Theme;

/// Welcome screen: title plus the lesson list, locked lessons dimmed.
pub struct LessonMenu<'a> {
    pub lessons: &'a [Lesson],
    pub progress: &'a ProgressRecord,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> LessonMenu<'a> {
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

fn status_marker(progress: &ProgressRecord, index: usize) -> &'static str {
    if progress.is_completed(index) {
        "\u{2705}"
    } else if progress.is_unlocked(index) {
        "\u{25b6}\u{fe0f}"
    } else {
        "\u{1f512}"
    }
}

impl Widget for &LessonMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "\u{2328}\u{fe0f}  KeyQuest",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Learn to type, one key at a time!",
                Style::default().fg(colors.fg()),
            )),
            Line::from(Span::styled(
                format!(
                    "{} of {} lessons done",
                    self.progress.completed_lessons.len(),
                    self.lessons.len()
                ),
                Style::default().fg(colors.text_pending()),
            )),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.lessons
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, lesson) in self.lessons.iter().enumerate() {
            let is_selected = i == self.selected;
            let unlocked = self.progress.is_unlocked(i);
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(
                " {indicator} {marker} {num}. {emoji} {title}",
                marker = status_marker(self.progress, i),
                num = i + 1,
                emoji = lesson.emoji,
                title = lesson.title,
            );
            let desc_text = if lesson.preview.is_empty() {
                format!("       {}", lesson.description)
            } else {
                format!("       {}  ({})", lesson.description, lesson.preview)
            };

            let label_color = if !unlocked {
                colors.text_pending()
            } else if is_selected {
                colors.accent()
            } else {
                colors.fg()
            };

            let lines = vec![
                Line::from(Span::styled(
                    label_text,
                    Style::default()
                        .fg(label_color)
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                )),
                Line::from(Span::styled(
                    desc_text,
                    Style::default().fg(colors.text_pending()),
                )),
            ];

            if i < menu_layout.len() {
                Paragraph::new(lines).render(menu_layout[i], buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_markers() {
        let mut progress = ProgressRecord::default();
        progress.completed_lessons = vec![0];
        assert_eq!(status_marker(&progress, 0), "\u{2705}");
        assert_eq!(status_marker(&progress, 1), "\u{25b6}\u{fe0f}");
        assert_eq!(status_marker(&progress, 2), "\u{1f512}");
    }
}
