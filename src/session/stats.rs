/// Streak length that earns a celebration line.
pub const STREAK_CELEBRATION: u64 = 5;
/// Accuracy (percent) that earns a celebration line.
pub const ACCURACY_CELEBRATION: u32 = 90;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub correct: u64,
    pub total: u64,
    pub streak: u64,
    pub best_streak: u64,
}

impl SessionStats {
    pub fn record_attempt(&mut self) {
        self.total += 1;
    }

    pub fn record_hit(&mut self) {
        self.correct += 1;
        self.streak += 1;
        self.best_streak = self.best_streak.max(self.streak);
    }

    pub fn record_miss(&mut self) {
        self.streak = 0;
    }

    pub fn accuracy(&self) -> u32 {
        accuracy_percent(self.correct, self.total)
    }

    pub fn on_a_roll(&self) -> bool {
        self.streak >= STREAK_CELEBRATION
    }

    pub fn sharp_aim(&self) -> bool {
        self.accuracy() >= ACCURACY_CELEBRATION
    }
}

/// Whole-number percentage, 0 when nothing has been typed.
pub fn accuracy_percent(correct: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u32
}

/// Fraction of the lesson done, counting the partial current exercise.
///
/// An empty exercise counts as finished, and a lesson without exercises as
/// fully done, so this never divides by zero.
pub fn progress_fraction(
    exercise_index: usize,
    char_index: usize,
    exercise_len: usize,
    exercise_count: usize,
) -> f64 {
    if exercise_count == 0 {
        return 1.0;
    }
    let within = if exercise_len == 0 {
        1.0
    } else {
        char_index as f64 / exercise_len as f64
    };
    ((exercise_index as f64 + within) / exercise_count as f64).clamp(0.0, 1.0)
}
