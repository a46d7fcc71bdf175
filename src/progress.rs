use crate::session::lesson::Completion;
use crate::session::stats::accuracy_percent;
use crate::store::schema::ProgressRecord;

pub const MAX_STARS: u8 = 3;

impl ProgressRecord {
    pub fn record_start(&mut self, lesson_index: usize) {
        self.current_lesson = lesson_index;
    }

    /// Merge a finished lesson into the running totals.
    ///
    /// Practising a lesson again adds its keystrokes and counts as another
    /// completion; only the completed-lesson list stays duplicate free.
    pub fn record_completion(&mut self, done: &Completion) {
        if !self.completed_lessons.contains(&done.lesson_index) {
            self.completed_lessons.push(done.lesson_index);
        }
        self.stats.total_keystrokes += done.total_keystrokes;
        self.stats.correct_keystrokes += done.correct_keystrokes;
        self.stats.lessons_completed += 1;
    }

    /// Start the whole journey over.
    pub fn restart(&mut self) {
        *self = ProgressRecord::default();
    }

    /// Mark one lesson as not completed. Aggregate totals are not tracked per
    /// lesson, so they stay as they are. Returns false if it was not completed.
    pub fn reset_lesson(&mut self, lesson_index: usize) -> bool {
        let before = self.completed_lessons.len();
        self.completed_lessons.retain(|&id| id != lesson_index);
        self.completed_lessons.len() != before
    }

    /// Drop duplicate ids a hand-edited or older record may contain.
    pub fn normalize(&mut self) {
        let mut seen = Vec::with_capacity(self.completed_lessons.len());
        self.completed_lessons.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(*id);
                true
            }
        });
        // A hand-edited record may claim more correct keys than keys typed.
        self.stats.correct_keystrokes = self
            .stats
            .correct_keystrokes
            .min(self.stats.total_keystrokes);
    }

    pub fn is_completed(&self, lesson_index: usize) -> bool {
        self.completed_lessons.contains(&lesson_index)
    }

    /// The first lesson is always open; after that a lesson opens once the
    /// one before it is done. Completed lessons stay open for practice.
    pub fn is_unlocked(&self, lesson_index: usize) -> bool {
        lesson_index == 0
            || self.is_completed(lesson_index)
            || self.is_completed(lesson_index - 1)
    }

    pub fn overall_accuracy(&self) -> u32 {
        accuracy_percent(self.stats.correct_keystrokes, self.stats.total_keystrokes)
    }

    /// Stars shown on a lesson card.
    ///
    /// Derived from the overall accuracy across all lessons, so every
    /// completed lesson shows the same rating.
    pub fn stars_for(&self, lesson_index: usize) -> u8 {
        if !self.is_completed(lesson_index) {
            return 0;
        }
        match self.overall_accuracy() {
            a if a >= 90 => 3,
            a if a >= 75 => 2,
            _ => 1,
        }
    }

    pub fn milestone(&self) -> &'static str {
        match self.stats.total_keystrokes {
            k if k >= 500 => "Typing Master!",
            k if k >= 100 => "Growing Fast!",
            _ => "Just Getting Started!",
        }
    }

    pub fn rating(&self) -> Rating {
        match self.overall_accuracy() {
            a if a >= 90 => Rating::Excellent,
            a if a >= 75 => Rating::Great,
            _ => Rating::KeepGoing,
        }
    }

    pub fn achievements(&self, lesson_count: usize) -> Vec<(Achievement, bool)> {
        Achievement::ALL
            .iter()
            .map(|&a| (a, a.is_earned(self, lesson_count)))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rating {
    Excellent,
    Great,
    KeepGoing,
}

impl Rating {
    pub fn label(self) -> &'static str {
        match self {
            Rating::Excellent => "EXCELLENT!",
            Rating::Great => "GREAT!",
            Rating::KeepGoing => "KEEP GOING!",
        }
    }

    pub fn encouragement(self) -> &'static str {
        match self {
            Rating::Excellent => {
                "You're doing amazing! Practice makes perfect - keep those fingers dancing!"
            }
            Rating::Great => {
                "Great progress! You're getting faster every day. Just a little more practice!"
            }
            Rating::KeepGoing => {
                "Every keystroke makes you better! Mistakes are part of learning!"
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Achievement {
    FirstSteps,
    RisingStar,
    TypingRoyalty,
    PerfectAim,
    SpeedDemon,
    UltimateTypist,
}

impl Achievement {
    pub const ALL: [Achievement; 6] = [
        Achievement::FirstSteps,
        Achievement::RisingStar,
        Achievement::TypingRoyalty,
        Achievement::PerfectAim,
        Achievement::SpeedDemon,
        Achievement::UltimateTypist,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Achievement::FirstSteps => "First Steps",
            Achievement::RisingStar => "Rising Star",
            Achievement::TypingRoyalty => "Typing Royalty",
            Achievement::PerfectAim => "Perfect Aim",
            Achievement::SpeedDemon => "Speed Demon",
            Achievement::UltimateTypist => "Ultimate Typist",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Achievement::FirstSteps => "Complete your first lesson",
            Achievement::RisingStar => "Complete 3 lessons",
            Achievement::TypingRoyalty => "Complete all lessons",
            Achievement::PerfectAim => "Get 90%+ accuracy",
            Achievement::SpeedDemon => "Type 500+ keystrokes",
            Achievement::UltimateTypist => "Master everything!",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Achievement::FirstSteps => "\u{1f331}",
            Achievement::RisingStar => "\u{1f31f}",
            Achievement::TypingRoyalty => "\u{1f451}",
            Achievement::PerfectAim => "\u{1f3af}",
            Achievement::SpeedDemon => "\u{26a1}",
            Achievement::UltimateTypist => "\u{1f3c6}",
        }
    }

    pub fn is_earned(self, record: &ProgressRecord, lesson_count: usize) -> bool {
        let lessons = record.stats.lessons_completed;
        let all = lesson_count as u64;
        let accuracy = record.overall_accuracy();
        match self {
            Achievement::FirstSteps => lessons >= 1,
            Achievement::RisingStar => lessons >= 3,
            Achievement::TypingRoyalty => lessons >= all,
            Achievement::PerfectAim => accuracy >= 90,
            Achievement::SpeedDemon => record.stats.total_keystrokes >= 500,
            Achievement::UltimateTypist => accuracy >= 95 && lessons >= all,
        }
    }
}
