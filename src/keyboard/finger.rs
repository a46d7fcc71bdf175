#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger {
    Pinky,
    Ring,
    Middle,
    Index,
    Thumb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FingerAssignment {
    pub hand: Hand,
    pub finger: Finger,
}

impl FingerAssignment {
    pub fn new(hand: Hand, finger: Finger) -> Self {
        Self { hand, finger }
    }

    /// A short instruction a young typist can follow.
    pub fn describe(&self) -> String {
        if self.finger == Finger::Thumb {
            return "Use your thumbs!".to_string();
        }
        let hand = match self.hand {
            Hand::Left => "left",
            Hand::Right => "right",
        };
        let finger = match self.finger {
            Finger::Pinky => "pinky",
            Finger::Ring => "ring finger",
            Finger::Middle => "middle finger",
            Finger::Index => "pointer finger",
            Finger::Thumb => "thumb",
        };
        format!("Use your {hand} {finger}!")
    }
}

/// Standard touch-typing finger for a key on a QWERTY keyboard. Capitals use
/// the same finger as their lowercase letter.
pub fn qwerty_finger(ch: char) -> FingerAssignment {
    use Finger::*;
    use Hand::*;

    match ch.to_ascii_lowercase() {
        'q' | 'a' | 'z' | '1' | '`' => FingerAssignment::new(Left, Pinky),
        'w' | 's' | 'x' | '2' => FingerAssignment::new(Left, Ring),
        'e' | 'd' | 'c' | '3' => FingerAssignment::new(Left, Middle),
        'r' | 'f' | 'v' | 't' | 'g' | 'b' | '4' | '5' => FingerAssignment::new(Left, Index),
        'y' | 'h' | 'n' | 'u' | 'j' | 'm' | '6' | '7' => FingerAssignment::new(Right, Index),
        'i' | 'k' | ',' | '8' => FingerAssignment::new(Right, Middle),
        'o' | 'l' | '.' | '9' => FingerAssignment::new(Right, Ring),
        'p' | ';' | '/' | '0' | '-' | '=' | '[' | ']' | '\'' | '\\' | '\n' => {
            FingerAssignment::new(Right, Pinky)
        }
        '\t' => FingerAssignment::new(Left, Pinky),
        ' ' => FingerAssignment::new(Right, Thumb),
        _ => FingerAssignment::new(Right, Index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_row_fingers() {
        assert_eq!(qwerty_finger('a'), FingerAssignment::new(Hand::Left, Finger::Pinky));
        assert_eq!(qwerty_finger('f'), FingerAssignment::new(Hand::Left, Finger::Index));
        assert_eq!(qwerty_finger('j'), FingerAssignment::new(Hand::Right, Finger::Index));
        assert_eq!(qwerty_finger(';'), FingerAssignment::new(Hand::Right, Finger::Pinky));
    }

    #[test]
    fn test_capital_uses_lowercase_finger() {
        assert_eq!(qwerty_finger('K'), qwerty_finger('k'));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(qwerty_finger(' ').describe(), "Use your thumbs!");
        assert_eq!(qwerty_finger('d').describe(), "Use your left middle finger!");
    }
}
