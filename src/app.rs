use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};

use crate::catalog::{Catalog, LessonError};
use crate::config::Config;
use crate::session::input::KeyPress;
use crate::session::lesson::{Completion, LessonSession, Step};
use crate::store::schema::ProgressRecord;
use crate::store::{KvStore, load_progress, save_progress};
use crate::ui::components::sparkles::Sparkles;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Welcome,
    Lesson,
    Progress,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressTab {
    Overview,
    Lessons,
}

/// A destructive action waiting for a yes/no.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirm {
    RestartJourney,
    ResetLesson(usize),
}

pub struct App {
    pub screen: AppScreen,
    pub catalog: Catalog,
    pub progress: ProgressRecord,
    pub session: Option<LessonSession>,
    pub welcome_selected: usize,
    pub progress_tab: ProgressTab,
    pub progress_selected: usize,
    pub confirm: Option<Confirm>,
    pub sparkles: Sparkles,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
    store: Box<dyn KvStore>,
    rng: SmallRng,
}

impl App {
    /// Loads saved progress. The initial load is never written back.
    pub fn new(config: Config, catalog: Catalog, store: Box<dyn KvStore>) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let progress = load_progress(store.as_ref());
        info!(
            completed = progress.completed_lessons.len(),
            keystrokes = progress.stats.total_keystrokes,
            "progress loaded"
        );

        let welcome_selected = progress.current_lesson.min(catalog.len().saturating_sub(1));

        Self {
            screen: AppScreen::Welcome,
            catalog,
            progress,
            session: None,
            welcome_selected,
            progress_tab: ProgressTab::Overview,
            progress_selected: 0,
            confirm: None,
            sparkles: Sparkles::default(),
            theme,
            config,
            should_quit: false,
            store,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn start_lesson(&mut self, lesson_index: usize, now: Instant) -> Result<(), LessonError> {
        let session =
            LessonSession::start(&self.catalog, lesson_index, self.config.timing(), now)?;
        info!(lesson = lesson_index, "lesson started");

        if let Some(previous) = self.session.take() {
            previous.abandon();
        }
        self.session = Some(session);
        self.sparkles.clear();
        self.progress.record_start(lesson_index);
        self.persist();
        self.screen = AppScreen::Lesson;
        Ok(())
    }

    /// Routes a key press to the running lesson, whatever else is on screen.
    pub fn lesson_key(&mut self, press: &KeyPress, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.handle_key(press, now) {
            Step::Hit => self.sparkles.burst(&mut self.rng, 6, now),
            Step::Completed(done) => self.complete_lesson(&done, now),
            Step::Miss | Step::Ignored => {}
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.sparkles.tick(now);
        let done = self.session.as_mut().and_then(|s| s.tick(now));
        if let Some(done) = done {
            self.complete_lesson(&done, now);
        }
    }

    /// Folds a finished lesson into the progress record and saves it. The
    /// lesson screen stays up to show the celebration.
    pub fn complete_lesson(&mut self, done: &Completion, now: Instant) {
        debug_assert!(done.correct_keystrokes <= done.total_keystrokes);
        info!(
            lesson = done.lesson_index,
            total = done.total_keystrokes,
            correct = done.correct_keystrokes,
            "lesson completed"
        );
        self.progress.record_completion(done);
        self.persist();
        self.sparkles.burst(&mut self.rng, 40, now);
    }

    /// Drops the current lesson. An unfinished session leaves no trace in the
    /// saved progress.
    pub fn leave_lesson(&mut self) {
        if let Some(session) = self.session.take() {
            let finished = session.is_complete();
            let lesson = session.lesson_index();
            let stats = session.abandon();
            if !finished {
                info!(lesson, typed = stats.total, "lesson abandoned");
            }
        }
        self.sparkles.clear();
    }

    pub fn go_to_welcome(&mut self) {
        self.leave_lesson();
        self.confirm = None;
        self.screen = AppScreen::Welcome;
    }

    pub fn go_to_progress(&mut self) {
        self.leave_lesson();
        self.confirm = None;
        self.progress_tab = ProgressTab::Overview;
        self.progress_selected = self.progress.current_lesson.min(self.catalog.len().saturating_sub(1));
        self.screen = AppScreen::Progress;
    }

    pub fn request(&mut self, confirm: Confirm) {
        self.confirm = Some(confirm);
    }

    pub fn accept_confirm(&mut self) {
        match self.confirm.take() {
            Some(Confirm::RestartJourney) => self.restart_journey(),
            Some(Confirm::ResetLesson(index)) => self.reset_lesson(index),
            None => {}
        }
    }

    pub fn cancel_confirm(&mut self) {
        self.confirm = None;
    }

    pub fn restart_journey(&mut self) {
        info!("journey restarted");
        self.progress.restart();
        self.welcome_selected = 0;
        self.progress_selected = 0;
        self.persist();
    }

    pub fn reset_lesson(&mut self, lesson_index: usize) {
        if self.progress.reset_lesson(lesson_index) {
            info!(lesson = lesson_index, "lesson reset");
            self.persist();
        }
    }

    /// Playable lessons are the first one plus anything the record unlocks.
    pub fn can_start(&self, lesson_index: usize) -> bool {
        lesson_index < self.catalog.len() && self.progress.is_unlocked(lesson_index)
    }

    pub fn select_next(selected: &mut usize, count: usize) {
        if count > 0 {
            *selected = (*selected + 1) % count;
        }
    }

    pub fn select_prev(selected: &mut usize, count: usize) {
        if count > 0 {
            *selected = if *selected == 0 { count - 1 } else { *selected - 1 };
        }
    }

    /// Write-through save. A failure is logged and otherwise ignored; the
    /// in-memory record stays authoritative and the next save catches up.
    fn persist(&self) {
        if let Err(err) = save_progress(self.store.as_ref(), &self.progress) {
            warn!(%err, "failed to save progress");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::store::Result as StoreResult;
    use crate::store::memory::MemoryStore;
    use crate::store::schema::PROGRESS_KEY;

    /// Lets a test keep looking at the store after handing it to the app.
    struct Shared(Rc<MemoryStore>);

    impl KvStore for Shared {
        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> StoreResult<()> {
            self.0.remove(key)
        }
        fn clear(&self) -> StoreResult<()> {
            self.0.clear()
        }
    }

    fn make_app() -> (Rc<MemoryStore>, App) {
        let store = Rc::new(MemoryStore::new());
        let app = App::new(
            Config::default(),
            Catalog::builtin().unwrap(),
            Box::new(Shared(Rc::clone(&store))),
        );
        (store, app)
    }

    fn type_text(app: &mut App, text: &str, now: &mut Instant) {
        for ch in text.chars() {
            app.lesson_key(&KeyPress::char(ch), *now);
            *now += app.config.timing().advance;
            app.tick(*now);
        }
    }

    #[test]
    fn test_initial_load_does_not_save() {
        let (store, app) = make_app();
        assert_eq!(app.screen, AppScreen::Welcome);
        assert!(store.is_empty());
    }

    #[test]
    fn test_start_lesson_records_and_persists() {
        let (store, mut app) = make_app();
        app.start_lesson(2, Instant::now()).unwrap();
        assert_eq!(app.screen, AppScreen::Lesson);
        assert_eq!(app.progress.current_lesson, 2);
        let saved = store.get(PROGRESS_KEY).unwrap().unwrap();
        assert!(saved.contains("\"currentLesson\":2"));
    }

    #[test]
    fn test_start_out_of_range_lesson_fails_fast() {
        let (store, mut app) = make_app();
        let err = app.start_lesson(42, Instant::now()).unwrap_err();
        assert_eq!(err, LessonError::OutOfRange { index: 42, count: 6 });
        assert_eq!(app.screen, AppScreen::Welcome);
        assert!(app.session.is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_finishing_a_lesson_updates_progress_once() {
        let (store, mut app) = make_app();
        let mut now = Instant::now();
        app.start_lesson(0, now).unwrap();
        let exercises = app.catalog.lessons()[0].exercises.clone();
        let expected_keys: u64 = exercises.iter().map(|e| e.chars().count() as u64).sum();

        for exercise in &exercises {
            type_text(&mut app, exercise, &mut now);
        }

        let session = app.session.as_ref().unwrap();
        assert!(session.is_complete());
        assert_eq!(app.progress.completed_lessons, vec![0]);
        assert_eq!(app.progress.stats.total_keystrokes, expected_keys);
        assert_eq!(app.progress.stats.correct_keystrokes, expected_keys);
        assert_eq!(app.progress.stats.lessons_completed, 1);

        // Further ticks and keys do not report the lesson again.
        now += app.config.timing().advance;
        app.tick(now);
        app.lesson_key(&KeyPress::char('a'), now);
        assert_eq!(app.progress.stats.lessons_completed, 1);

        let reloaded = load_progress(store.as_ref());
        assert_eq!(reloaded, app.progress);
    }

    #[test]
    fn test_leaving_early_saves_no_session_stats() {
        let (_store, mut app) = make_app();
        let mut now = Instant::now();
        app.start_lesson(1, now).unwrap();
        type_text(&mut app, "asdf", &mut now);
        app.go_to_welcome();
        assert!(app.session.is_none());
        assert_eq!(app.progress.stats.total_keystrokes, 0);
        assert!(app.progress.completed_lessons.is_empty());
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let (store, mut app) = make_app();
        store.set_failing(true);
        app.start_lesson(3, Instant::now()).unwrap();
        assert_eq!(app.progress.current_lesson, 3);
        store.set_failing(false);
        assert_eq!(store.get(PROGRESS_KEY).unwrap(), None);
    }

    #[test]
    fn test_confirmed_restart_clears_progress() {
        let (store, mut app) = make_app();
        app.progress.completed_lessons = vec![0, 1];
        app.progress.stats.lessons_completed = 2;
        app.request(Confirm::RestartJourney);
        app.accept_confirm();
        assert_eq!(app.progress, ProgressRecord::default());
        assert_eq!(load_progress(store.as_ref()), ProgressRecord::default());
        assert!(app.confirm.is_none());
    }

    #[test]
    fn test_cancelled_reset_changes_nothing() {
        let (_store, mut app) = make_app();
        app.progress.completed_lessons = vec![0, 1];
        app.request(Confirm::ResetLesson(1));
        app.cancel_confirm();
        assert_eq!(app.progress.completed_lessons, vec![0, 1]);
    }

    #[test]
    fn test_confirmed_reset_removes_only_that_lesson() {
        let (_store, mut app) = make_app();
        app.progress.completed_lessons = vec![0, 1, 2];
        app.request(Confirm::ResetLesson(1));
        app.accept_confirm();
        assert_eq!(app.progress.completed_lessons, vec![0, 2]);
    }

    #[test]
    fn test_can_start_respects_unlocking() {
        let (_store, mut app) = make_app();
        assert!(app.can_start(0));
        assert!(!app.can_start(1));
        app.progress.completed_lessons = vec![0];
        assert!(app.can_start(1));
        assert!(!app.can_start(6));
    }

    #[test]
    fn test_selection_wraps() {
        let mut selected = 0;
        App::select_prev(&mut selected, 6);
        assert_eq!(selected, 5);
        App::select_next(&mut selected, 6);
        assert_eq!(selected, 0);
    }
}
