use crate::session::matcher::{is_uppercase_expected, key_label};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Cheer,
    Nudge,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub tone: Tone,
    pub message: String,
}

impl Feedback {
    pub fn hit(expected: char) -> Self {
        let message = if is_uppercase_expected(expected) {
            "Perfect! Great use of shift! \u{1f389}".to_string()
        } else {
            "Great job! \u{1f389}".to_string()
        };
        Self {
            tone: Tone::Cheer,
            message,
        }
    }

    pub fn miss(expected: char) -> Self {
        let message = if is_uppercase_expected(expected) {
            format!(
                "Try holding Shift + \"{}\". Capital letters need the shift key!",
                expected.to_ascii_lowercase()
            )
        } else {
            let label = key_label(expected);
            format!("Almost! Try \"{label}\" next. {label} is your friend!")
        };
        Self {
            tone: Tone::Nudge,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capital_miss_mentions_shift() {
        let fb = Feedback::miss('T');
        assert_eq!(fb.tone, Tone::Nudge);
        assert!(fb.message.contains("Shift + \"t\""));
    }

    #[test]
    fn test_space_miss_names_the_key() {
        let fb = Feedback::miss(' ');
        assert!(fb.message.contains("Space"));
    }

    #[test]
    fn test_hit_cheers() {
        assert_eq!(Feedback::hit('a').tone, Tone::Cheer);
        assert!(Feedback::hit('A').message.contains("shift"));
    }
}
