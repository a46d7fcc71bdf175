use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

/// What the keyboard reported, reduced to the distinctions scoring cares about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// A printable character, plus Enter as `'\n'` and Tab as `'\t'`.
    Char(char),
    /// Any other non-modifier key (arrows, function keys, ...).
    Named(String),
    /// A modifier pressed on its own, e.g. "Shift".
    Modifier(String),
    /// The terminal delivered an event without a usable key.
    Empty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: Key, shift: bool) -> Self {
        Self { key, shift }
    }

    pub fn char(ch: char) -> Self {
        Self::new(Key::Char(ch), false)
    }

    pub fn shifted(ch: char) -> Self {
        Self::new(Key::Char(ch), true)
    }

    pub fn shift_alone() -> Self {
        Self::new(Key::Modifier("Shift".to_string()), true)
    }
}

fn modifier_name(code: ModifierKeyCode) -> &'static str {
    use ModifierKeyCode::*;

    match code {
        LeftShift | RightShift => "Shift",
        LeftControl | RightControl => "Control",
        LeftAlt | RightAlt => "Alt",
        LeftSuper | RightSuper => "Super",
        LeftHyper | RightHyper => "Hyper",
        LeftMeta | RightMeta => "Meta",
        IsoLevel3Shift | IsoLevel5Shift => "AltGraph",
    }
}

impl From<&KeyEvent> for KeyPress {
    fn from(event: &KeyEvent) -> Self {
        let shift = event.modifiers.contains(KeyModifiers::SHIFT);
        let key = match event.code {
            KeyCode::Char(ch) => Key::Char(ch),
            KeyCode::Enter => Key::Char('\n'),
            KeyCode::Tab | KeyCode::BackTab => Key::Char('\t'),
            KeyCode::Modifier(code) => Key::Modifier(modifier_name(code).to_string()),
            KeyCode::Null => Key::Empty,
            other => Key::Named(format!("{other:?}")),
        };
        Self { key, shift }
    }
}
