use std::time::{Duration, Instant};

use tracing::debug;

use crate::catalog::{Catalog, Lesson, LessonError};
use crate::session::feedback::Feedback;
use crate::session::input::KeyPress;
use crate::session::matcher::{self, Verdict};
use crate::session::stats::{self, SessionStats};
use crate::session::timer::Deferred;

/// Delays that give feedback time to show before state moves on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub advance: Duration,
    pub shake: Duration,
    pub feedback: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            advance: Duration::from_millis(800),
            shake: Duration::from_millis(500),
            feedback: Duration::from_millis(2500),
        }
    }
}

/// Final totals of a finished lesson, reported exactly once per session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    pub lesson_index: usize,
    pub total_keystrokes: u64,
    pub correct_keystrokes: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    InExercise,
    /// The exercise is finished; the advance is waiting on its timer.
    ExerciseBoundary,
    Complete(Completion),
}

/// What a single key press did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Ignored,
    Hit,
    Miss,
    Completed(Completion),
}

/// Advance away from the exercise at `from_exercise`. Stale once the
/// session has moved past it.
#[derive(Clone, Copy, Debug)]
struct Advance {
    from_exercise: usize,
}

pub struct LessonSession {
    lesson_index: usize,
    exercises: Vec<Vec<char>>,
    exercise_index: usize,
    char_index: usize,
    typed: Vec<char>,
    stats: SessionStats,
    phase: Phase,
    timing: Timing,
    advance: Deferred<Advance>,
    shake: Deferred<()>,
    feedback: Option<Feedback>,
    feedback_clear: Deferred<()>,
    started_at: Instant,
    finished_at: Option<Instant>,
}

impl LessonSession {
    pub fn start(
        catalog: &Catalog,
        lesson_index: usize,
        timing: Timing,
        now: Instant,
    ) -> Result<Self, LessonError> {
        let lesson = catalog.get(lesson_index)?;
        Self::new(lesson_index, lesson, timing, now)
    }

    pub fn new(
        lesson_index: usize,
        lesson: &Lesson,
        timing: Timing,
        now: Instant,
    ) -> Result<Self, LessonError> {
        if lesson.exercises.is_empty() {
            return Err(LessonError::NoExercises {
                index: lesson_index,
            });
        }

        let mut session = Self {
            lesson_index,
            exercises: lesson.exercises.iter().map(|e| e.chars().collect()).collect(),
            exercise_index: 0,
            char_index: 0,
            typed: Vec::new(),
            stats: SessionStats::default(),
            phase: Phase::InExercise,
            timing,
            advance: Deferred::new(),
            shake: Deferred::new(),
            feedback: None,
            feedback_clear: Deferred::new(),
            started_at: now,
            finished_at: None,
        };
        session.enter_exercise(now);
        Ok(session)
    }

    pub fn handle_key(&mut self, press: &KeyPress, now: Instant) -> Step {
        // A key that arrives while an advance is pending belongs to whatever
        // comes next, so settle the advance before looking at it.
        if self.phase == Phase::ExerciseBoundary
            && let Some(done) = self.settle_boundary(now)
        {
            return Step::Completed(done);
        }

        if self.phase != Phase::InExercise {
            return Step::Ignored;
        }
        let Some(expected) = self.expected_char() else {
            return Step::Ignored;
        };

        let verdict = matcher::evaluate(expected, press);
        if !verdict.is_scored() {
            return Step::Ignored;
        }
        self.stats.record_attempt();

        match verdict {
            Verdict::Hit { consumed } => {
                self.stats.record_hit();
                self.typed.push(consumed);
                self.char_index += 1;
                self.show_feedback(Feedback::hit(expected), now);

                if self.char_index == self.current_exercise().len() {
                    self.phase = Phase::ExerciseBoundary;
                    self.advance.schedule(
                        now,
                        self.timing.advance,
                        Advance {
                            from_exercise: self.exercise_index,
                        },
                    );
                }
                Step::Hit
            }
            Verdict::Miss => {
                self.stats.record_miss();
                self.shake.schedule(now, self.timing.shake, ());
                self.show_feedback(Feedback::miss(expected), now);
                Step::Miss
            }
            Verdict::Ignored => Step::Ignored,
        }
    }

    /// Fires whatever timers are due. Returns the completion if this tick
    /// finished the lesson.
    pub fn tick(&mut self, now: Instant) -> Option<Completion> {
        self.shake.take_due(now);
        if self.feedback_clear.take_due(now).is_some() {
            self.feedback = None;
        }

        while let Some(advance) = self.advance.take_due(now) {
            if let Some(done) = self.apply_advance(advance, now) {
                return Some(done);
            }
        }
        None
    }

    /// Stops all pending transitions. Nothing from an abandoned session is
    /// reported anywhere.
    pub fn abandon(mut self) -> SessionStats {
        self.advance.cancel();
        self.shake.cancel();
        self.feedback_clear.cancel();
        self.stats
    }

    fn settle_boundary(&mut self, now: Instant) -> Option<Completion> {
        while let Some(advance) = self.advance.fire_now() {
            if let Some(done) = self.apply_advance(advance, now) {
                return Some(done);
            }
        }
        None
    }

    fn apply_advance(&mut self, advance: Advance, now: Instant) -> Option<Completion> {
        if self.phase != Phase::ExerciseBoundary || advance.from_exercise != self.exercise_index {
            return None;
        }

        self.exercise_index += 1;
        self.char_index = 0;
        self.typed.clear();

        if self.exercise_index == self.exercises.len() {
            let done = Completion {
                lesson_index: self.lesson_index,
                total_keystrokes: self.stats.total,
                correct_keystrokes: self.stats.correct,
            };
            self.phase = Phase::Complete(done);
            self.finished_at = Some(now);
            debug!(lesson = self.lesson_index, ?done, "lesson complete");
            return Some(done);
        }

        self.enter_exercise(now);
        None
    }

    fn enter_exercise(&mut self, now: Instant) {
        if self.current_exercise().is_empty() {
            // Nothing to type: finished as soon as it starts.
            self.phase = Phase::ExerciseBoundary;
            self.advance.schedule(
                now,
                Duration::ZERO,
                Advance {
                    from_exercise: self.exercise_index,
                },
            );
        } else {
            self.phase = Phase::InExercise;
        }
    }

    fn show_feedback(&mut self, feedback: Feedback, now: Instant) {
        self.feedback = Some(feedback);
        self.feedback_clear.schedule(now, self.timing.feedback, ());
    }

    pub fn lesson_index(&self) -> usize {
        self.lesson_index
    }

    pub fn exercise_index(&self) -> usize {
        self.exercise_index
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    /// Empty once the lesson is complete.
    pub fn current_exercise(&self) -> &[char] {
        self.exercises
            .get(self.exercise_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn expected_char(&self) -> Option<char> {
        self.current_exercise().get(self.char_index).copied()
    }

    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, Phase::Complete(_))
    }

    pub fn completion(&self) -> Option<Completion> {
        match self.phase {
            Phase::Complete(done) => Some(done),
            _ => None,
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_pending()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn progress(&self) -> f64 {
        stats::progress_fraction(
            self.exercise_index,
            self.char_index,
            self.current_exercise().len(),
            self.exercises.len(),
        )
    }

    pub fn elapsed_secs(&self) -> f64 {
        match self.finished_at {
            Some(end) => end.duration_since(self.started_at).as_secs_f64(),
            None => self.started_at.elapsed().as_secs_f64(),
        }
    }
}
