use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::lesson::{LessonSession, Phase};
use crate::session::matcher::display_char;
use crate::ui::theme::Theme;

/// Where a character sits relative to the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CharState {
    Typed,
    Current,
    Upcoming,
}

/// The exercise line: typed characters, the one to press now, and the rest.
pub struct ExerciseDisplay<'a> {
    session: &'a LessonSession,
    theme: &'a Theme,
}

impl<'a> ExerciseDisplay<'a> {
    pub fn new(session: &'a LessonSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

fn char_states(len: usize, cursor: usize, at_boundary: bool) -> Vec<CharState> {
    (0..len)
        .map(|i| {
            if i < cursor || at_boundary {
                CharState::Typed
            } else if i == cursor {
                CharState::Current
            } else {
                CharState::Upcoming
            }
        })
        .collect()
}

impl Widget for ExerciseDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let session = self.session;
        let exercise = session.current_exercise();
        let at_boundary = session.phase() != Phase::InExercise;

        let mut spans: Vec<Span> = Vec::with_capacity(exercise.len() * 2);
        for (&ch, state) in exercise
            .iter()
            .zip(char_states(exercise.len(), session.char_index(), at_boundary))
        {
            let style = match state {
                CharState::Typed => Style::default()
                    .fg(colors.text_correct())
                    .add_modifier(Modifier::BOLD),
                CharState::Current => Style::default()
                    .fg(colors.text_cursor_fg())
                    .bg(if session.is_shaking() {
                        colors.text_incorrect()
                    } else {
                        colors.text_cursor_bg()
                    })
                    .add_modifier(Modifier::BOLD),
                CharState::Upcoming => Style::default().fg(colors.text_pending()),
            };
            spans.push(Span::styled(display_char(ch).to_string(), style));
            spans.push(Span::raw(" "));
        }

        let title = format!(
            " Exercise {} of {} ",
            session.exercise_index() + 1,
            session.exercise_count()
        );
        let border = if session.is_shaking() {
            colors.error()
        } else if at_boundary {
            colors.success()
        } else {
            colors.border_focused()
        };
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        // Nudge the line sideways while shaking.
        let mut text_area = inner;
        if session.is_shaking() && text_area.width > 2 {
            text_area.x += 1;
            text_area.width -= 2;
        }
        let top_pad = text_area.height.saturating_sub(1) / 2;
        text_area.y += top_pad;
        text_area.height -= top_pad;

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(text_area, buf);
    }
}
