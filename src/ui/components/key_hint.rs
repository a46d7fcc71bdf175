use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::keyboard::finger::qwerty_finger;
use crate::session::feedback::{Feedback, Tone};
use crate::session::matcher::{is_uppercase_expected, key_hint};
use crate::ui::theme::Theme;

/// "Press: Shift + a" plus the finger to use, and the latest feedback message
/// underneath.
pub struct KeyHint<'a> {
    expected: Option<char>,
    feedback: Option<&'a Feedback>,
    theme: &'a Theme,
}

impl<'a> KeyHint<'a> {
    pub fn new(expected: Option<char>, feedback: Option<&'a Feedback>, theme: &'a Theme) -> Self {
        Self {
            expected,
            feedback,
            theme,
        }
    }
}

impl Widget for KeyHint<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let mut lines = Vec::new();

        if let Some(expected) = self.expected {
            let mut spans = vec![
                Span::styled("Press: ", Style::default().fg(colors.fg())),
                Span::styled(
                    key_hint(expected),
                    Style::default()
                        .fg(colors.focused_key())
                        .add_modifier(Modifier::BOLD),
                ),
            ];
            if is_uppercase_expected(expected) {
                spans.push(Span::styled(
                    "  \u{21e7} Shift",
                    Style::default().fg(colors.warning()),
                ));
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(Span::styled(
                qwerty_finger(expected).describe(),
                Style::default().fg(colors.text_pending()),
            )));
        } else {
            lines.push(Line::from(""));
            lines.push(Line::from(""));
        }

        if let Some(feedback) = self.feedback {
            let color = match feedback.tone {
                Tone::Cheer => colors.success(),
                Tone::Nudge => colors.warning(),
            };
            lines.push(Line::from(Span::styled(
                feedback.message.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(colors.bg()))
            .render(area, buf);
    }
}
