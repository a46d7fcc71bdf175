use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::keyboard::finger::{self, Finger, Hand};
use crate::ui::theme::Theme;

/// QWERTY keyboard with the lesson's keys tinted by finger and the next key
/// lit up.
pub struct KeyboardDiagram<'a> {
    pub next_key: Option<char>,
    pub target_keys: &'a [char],
    pub theme: &'a Theme,
}

impl<'a> KeyboardDiagram<'a> {
    pub fn new(next_key: Option<char>, target_keys: &'a [char], theme: &'a Theme) -> Self {
        Self {
            next_key,
            target_keys,
            theme,
        }
    }

    fn is_next(&self, key: char) -> bool {
        self.next_key.map(|c| c.to_ascii_lowercase()) == Some(key)
    }

    fn is_target(&self, key: char) -> bool {
        self.target_keys
            .iter()
            .any(|c| c.to_ascii_lowercase() == key)
    }
}

const ROWS: &[&[char]] = &[
    &['1', '2', '3', '4', '5', '6', '7', '8', '9', '0', '-', '='],
    &['q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p', '[', ']'],
    &['a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l', ';', '\''],
    &['z', 'x', 'c', 'v', 'b', 'n', 'm', ',', '.', '/'],
];

const KEY_WIDTH: u16 = 5;
const ROW_OFFSETS: &[u16] = &[0, 2, 3, 5];

fn finger_color(ch: char) -> Color {
    let assignment = finger::qwerty_finger(ch);
    match (assignment.hand, assignment.finger) {
        (Hand::Left, Finger::Pinky) => Color::Rgb(180, 100, 100),
        (Hand::Left, Finger::Ring) => Color::Rgb(180, 140, 80),
        (Hand::Left, Finger::Middle) => Color::Rgb(120, 160, 80),
        (Hand::Left, Finger::Index) => Color::Rgb(80, 140, 180),
        (Hand::Right, Finger::Index) => Color::Rgb(100, 140, 200),
        (Hand::Right, Finger::Middle) => Color::Rgb(120, 160, 80),
        (Hand::Right, Finger::Ring) => Color::Rgb(180, 140, 80),
        (Hand::Right, Finger::Pinky) => Color::Rgb(180, 100, 100),
        _ => Color::Rgb(120, 120, 120),
    }
}

impl Widget for KeyboardDiagram<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Keyboard ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 4 || inner.width < 40 {
            return;
        }

        let key_style = |is_next: bool, is_target: bool, key: char| {
            if is_next {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.focused_key())
                    .add_modifier(Modifier::BOLD)
            } else if is_target {
                Style::default().fg(colors.fg()).bg(finger_color(key))
            } else {
                Style::default().fg(colors.text_pending()).bg(colors.bg())
            }
        };

        for (row_idx, row) in ROWS.iter().enumerate() {
            let y = inner.y + row_idx as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let offset = ROW_OFFSETS.get(row_idx).copied().unwrap_or(0);

            for (col_idx, &key) in row.iter().enumerate() {
                let x = inner.x + offset + col_idx as u16 * KEY_WIDTH;
                if x + KEY_WIDTH > inner.x + inner.width {
                    break;
                }
                let style = key_style(self.is_next(key), self.is_target(key), key);
                buf.set_string(x, y, format!("[ {key} ]"), style);
            }
        }

        let space_y = inner.y + ROWS.len() as u16;
        if space_y < inner.y + inner.height {
            let label = "[        space        ]";
            let x = inner.x + ROW_OFFSETS[3] + 2 * KEY_WIDTH;
            if x + label.len() as u16 <= inner.x + inner.width {
                let style = key_style(self.is_next(' '), self.is_target(' '), ' ');
                buf.set_string(x, space_y, label, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_key_matches_capitals() {
        let theme = Theme::default();
        let diagram = KeyboardDiagram::new(Some('F'), &[], &theme);
        assert!(diagram.is_next('f'));
        assert!(!diagram.is_next('j'));
    }

    #[test]
    fn test_target_membership() {
        let theme = Theme::default();
        let keys = ['a', 's', ' '];
        let diagram = KeyboardDiagram::new(None, &keys, &theme);
        assert!(diagram.is_target('a'));
        assert!(diagram.is_target(' '));
        assert!(!diagram.is_target('q'));
    }

    #[test]
    fn test_render_small_area_is_noop() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        KeyboardDiagram::new(Some('a'), &['a'], &theme).render(area, &mut buf);
    }
}
