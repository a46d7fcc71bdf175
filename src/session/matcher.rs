use crate::session::input::{Key, KeyPress};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Not a keystroke at all (a modifier on its own, or nothing).
    Ignored,
    /// The expected character was produced; `consumed` is what gets recorded.
    Hit { consumed: char },
    Miss,
}

impl Verdict {
    pub fn is_scored(self) -> bool {
        !matches!(self, Verdict::Ignored)
    }
}

/// Capital letters may be typed either as the shifted glyph the terminal
/// delivers, or as the lowercase letter with Shift held.
pub fn is_uppercase_expected(expected: char) -> bool {
    expected.is_ascii_uppercase()
}

pub fn evaluate(expected: char, press: &KeyPress) -> Verdict {
    let observed = match &press.key {
        Key::Modifier(_) | Key::Empty => return Verdict::Ignored,
        Key::Named(_) => return Verdict::Miss,
        Key::Char(ch) => *ch,
    };

    if observed == expected {
        return Verdict::Hit { consumed: observed };
    }

    if is_uppercase_expected(expected)
        && press.shift
        && observed.to_ascii_lowercase() == expected.to_ascii_lowercase()
    {
        return Verdict::Hit { consumed: expected };
    }

    Verdict::Miss
}

pub fn key_label(ch: char) -> String {
    match ch {
        ' ' => "Space".to_string(),
        '\n' => "Enter".to_string(),
        '\t' => "Tab".to_string(),
        _ => ch.to_uppercase().to_string(),
    }
}

/// What to tell the learner to press next.
pub fn key_hint(expected: char) -> String {
    if is_uppercase_expected(expected) {
        format!("Shift + {}", expected.to_ascii_lowercase())
    } else {
        key_label(expected)
    }
}

/// How a character is drawn in the exercise line.
pub fn display_char(ch: char) -> char {
    match ch {
        ' ' => '\u{2423}',  // ␣
        '\n' => '\u{21b5}', // ↵
        '\t' => '\u{2192}', // →
        _ => ch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercase_accepts_delivered_capital() {
        assert_eq!(
            evaluate('A', &KeyPress::char('A')),
            Verdict::Hit { consumed: 'A' }
        );
    }

    #[test]
    fn test_uppercase_accepts_lowercase_with_shift() {
        assert_eq!(
            evaluate('A', &KeyPress::shifted('a')),
            Verdict::Hit { consumed: 'A' }
        );
    }

    #[test]
    fn test_uppercase_rejects_lowercase_without_shift() {
        assert_eq!(evaluate('A', &KeyPress::char('a')), Verdict::Miss);
    }

    #[test]
    fn test_lowercase_requires_exact_match() {
        assert_eq!(evaluate('a', &KeyPress::shifted('A')), Verdict::Miss);
        assert_eq!(
            evaluate('a', &KeyPress::char('a')),
            Verdict::Hit { consumed: 'a' }
        );
    }

    #[test]
    fn test_symbols_have_no_shift_inference() {
        // ':' is Shift+';' on a real keyboard but must still match exactly.
        assert_eq!(evaluate(':', &KeyPress::shifted(';')), Verdict::Miss);
        assert_eq!(evaluate('1', &KeyPress::shifted('!')), Verdict::Miss);
        assert_eq!(
            evaluate(';', &KeyPress::char(';')),
            Verdict::Hit { consumed: ';' }
        );
    }

    #[test]
    fn test_shift_alone_is_ignored() {
        assert_eq!(evaluate('A', &KeyPress::shift_alone()), Verdict::Ignored);
        assert_eq!(evaluate('a', &KeyPress::shift_alone()), Verdict::Ignored);
        assert!(!Verdict::Ignored.is_scored());
    }

    #[test]
    fn test_empty_key_is_ignored() {
        let press = KeyPress::new(Key::Empty, false);
        assert_eq!(evaluate('a', &press), Verdict::Ignored);
    }

    #[test]
    fn test_named_key_is_a_miss() {
        let press = KeyPress::new(Key::Named("Left".to_string()), false);
        assert_eq!(evaluate('a', &press), Verdict::Miss);
    }

    #[test]
    fn test_space_and_enter_match() {
        assert_eq!(
            evaluate(' ', &KeyPress::char(' ')),
            Verdict::Hit { consumed: ' ' }
        );
        assert_eq!(
            evaluate('\n', &KeyPress::char('\n')),
            Verdict::Hit { consumed: '\n' }
        );
    }

    #[test]
    fn test_key_hints() {
        assert_eq!(key_hint('Q'), "Shift + q");
        assert_eq!(key_hint(' '), "Space");
        assert_eq!(key_hint('\n'), "Enter");
        assert_eq!(key_hint('f'), "F");
        assert_eq!(key_hint(';'), ";");
    }
}
