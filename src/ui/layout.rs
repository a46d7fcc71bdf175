use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::ui::theme::Theme;

const STATS_MIN_WIDTH: u16 = 100;
const PANELS_MIN_WIDTH: u16 = 60;
const PROGRESS_MIN_HEIGHT: u16 = 16;
const KEYBOARD_MIN_HEIGHT: u16 = 24;

/// Areas of the lesson screen. The keyboard, the progress bar and the stats
/// sidebar are only laid out when the terminal has room for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LessonLayout {
    pub header: Rect,
    /// Everything between header and footer left of the sidebar.
    pub stage: Rect,
    pub exercise: Rect,
    pub hint: Rect,
    pub progress: Option<Rect>,
    pub keyboard: Option<Rect>,
    pub stats: Option<Rect>,
    pub footer: Rect,
}

impl LessonLayout {
    pub fn new(area: Rect) -> Self {
        let [header, middle, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(2),
        ])
        .areas(area);

        let (stage, stats) = if area.width >= STATS_MIN_WIDTH {
            let [stage, stats] =
                Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)])
                    .areas(middle);
            (stage, Some(stats))
        } else {
            (middle, None)
        };

        let roomy = area.width >= PANELS_MIN_WIDTH;
        let show_progress = roomy && area.height >= PROGRESS_MIN_HEIGHT;
        let show_keyboard = roomy && area.height >= KEYBOARD_MIN_HEIGHT;

        let mut constraints = vec![Constraint::Min(5), Constraint::Length(3)];
        if show_progress {
            constraints.push(Constraint::Length(3));
        }
        if show_keyboard {
            constraints.push(Constraint::Length(7));
        }
        let rows = Layout::vertical(constraints).split(stage);
        let mut panels = rows.iter().copied().skip(2);
        let progress = if show_progress { panels.next() } else { None };
        let keyboard = if show_keyboard { panels.next() } else { None };

        Self {
            header,
            stage,
            exercise: rows[0],
            hint: rows[1],
            progress,
            keyboard,
            stats,
            footer,
        }
    }
}

/// Header, optional tab row, body and footer of the welcome and progress screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub tabs: Option<Rect>,
    pub body: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, with_tabs: bool) -> Self {
        let [header, tabs, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(u16::from(with_tabs)),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .areas(area);

        Self {
            header,
            tabs: with_tabs.then_some(tabs),
            body,
            footer,
        }
    }

    /// A full-height column in the middle of the body, `percent` of its width
    /// but at least `min_width` columns.
    pub fn column(&self, percent: u16, min_width: u16) -> Rect {
        let scaled = u32::from(self.body.width) * u32::from(percent.min(100)) / 100;
        let width = u16::try_from(scaled).unwrap_or(u16::MAX).max(min_width);
        centered(self.body, width, self.body.height)
    }
}

/// A `width` x `height` box in the middle of `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Lays footer hints out as lines no wider than `width`, highlighting the
/// bracketed key of each hint. A hint wider than a whole line gets its own.
pub fn hint_lines(hints: &[&str], width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let colors = &theme.colors;
    let key_style = Style::default()
        .fg(colors.accent())
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(colors.text_pending());
    let width = usize::from(width);

    let mut lines = Vec::new();
    if width == 0 {
        return lines;
    }
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let (key, label) = split_hint(hint);
        let mut pieces = Vec::with_capacity(2);
        if !key.is_empty() {
            pieces.push(Span::styled(key.to_string(), key_style));
        }
        if !label.is_empty() {
            pieces.push(Span::styled(label.to_string(), label_style));
        }
        let hint_width: usize = pieces.iter().map(Span::width).sum();

        if !spans.is_empty() && used + 3 + hint_width > width {
            lines.push(Line::from(std::mem::take(&mut spans)));
            used = 0;
        }
        let gap = if spans.is_empty() { "  " } else { "   " };
        used += gap.len() + hint_width;
        spans.push(Span::raw(gap));
        spans.extend(pieces);
    }

    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

fn split_hint(hint: &str) -> (&str, &str) {
    match hint.find(']') {
        Some(end) if hint.starts_with('[') => hint.split_at(end + 1),
        _ => ("", hint),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_layout_drops_panels_when_small() {
        let wide = LessonLayout::new(Rect::new(0, 0, 120, 40));
        assert!(wide.stats.is_some());
        assert!(wide.progress.is_some());
        assert!(wide.keyboard.is_some());
        assert!(wide.stage.width < 120);

        let medium = LessonLayout::new(Rect::new(0, 0, 80, 20));
        assert!(medium.stats.is_none());
        assert!(medium.progress.is_some());
        assert!(medium.keyboard.is_none());
        assert_eq!(medium.stage.width, 80);

        let narrow = LessonLayout::new(Rect::new(0, 0, 40, 40));
        assert_eq!(
            (narrow.stats, narrow.progress, narrow.keyboard),
            (None, None, None)
        );
        assert_eq!(narrow.hint.y, narrow.exercise.bottom());
    }

    #[test]
    fn test_lesson_layout_panels_stack_below_hint() {
        let layout = LessonLayout::new(Rect::new(0, 0, 100, 30));
        let progress = layout.progress.unwrap();
        let keyboard = layout.keyboard.unwrap();
        assert_eq!(progress.y, layout.hint.bottom());
        assert_eq!(keyboard.y, progress.bottom());
        assert_eq!(keyboard.height, 7);
        assert!(keyboard.bottom() <= layout.footer.y);
    }

    #[test]
    fn test_screen_layout_tab_row() {
        let area = Rect::new(0, 0, 80, 24);
        let plain = ScreenLayout::new(area, false);
        assert!(plain.tabs.is_none());
        assert_eq!(plain.body.y, 1);

        let tabbed = ScreenLayout::new(area, true);
        assert_eq!(tabbed.tabs, Some(Rect::new(0, 1, 80, 1)));
        assert_eq!(tabbed.body.y, 2);
        assert_eq!(tabbed.footer, Rect::new(0, 22, 80, 2));
    }

    #[test]
    fn test_column_respects_min_width() {
        let screen = ScreenLayout::new(Rect::new(0, 0, 200, 30), false);
        assert_eq!(screen.column(50, 64).width, 100);
        assert_eq!(screen.column(20, 64).width, 64);

        let tiny = ScreenLayout::new(Rect::new(0, 0, 50, 30), false);
        assert_eq!(tiny.column(60, 64), tiny.body);
    }

    #[test]
    fn test_centered_stays_inside() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered(area, 60, 12), area);
        assert_eq!(
            centered(Rect::new(0, 0, 100, 40), 50, 20),
            Rect::new(25, 10, 50, 20)
        );
    }

    #[test]
    fn test_hint_lines_wrap_and_highlight_keys() {
        let theme = Theme::default();
        let lines = hint_lines(&["[Esc] Back", "[Enter] Go", "[q] Quit"], 26, &theme);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].width(), 25);
        assert_eq!(lines[0].spans[1].content, "[Esc]");
        assert_eq!(lines[0].spans[1].style.fg, Some(theme.colors.accent()));
        assert_eq!(lines[0].spans[2].content, " Back");
        assert_eq!(lines[1].width(), 10);

        assert!(hint_lines(&["[q] Quit"], 0, &theme).is_empty());
    }

    #[test]
    fn test_hint_without_key_is_plain_label() {
        let theme = Theme::default();
        let lines = hint_lines(&["\u{1f512} Locked", "", "[q] Quit"], 80, &theme);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans[1].content, "\u{1f512} Locked");
        assert_eq!(
            lines[0].spans[1].style.fg,
            Some(theme.colors.text_pending())
        );
        // The padlock is two columns wide.
        assert_eq!(lines[0].width(), 2 + 9 + 3 + 8);
    }
}
