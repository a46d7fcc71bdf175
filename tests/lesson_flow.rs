use std::fs;
use std::time::{Duration, Instant};

use tempfile::TempDir;

use keyquest::app::{App, AppScreen, Confirm};
use keyquest::catalog::Catalog;
use keyquest::config::Config;
use keyquest::session::input::KeyPress;
use keyquest::session::lesson::{Completion, LessonSession, Phase, Step, Timing};
use keyquest::store::file_store::FileStore;
use keyquest::store::schema::{PROGRESS_KEY, ProgressRecord};
use keyquest::store::{KvStore, load_progress};

const TWO_EXERCISES: &str = r#"
[[lessons]]
id = 0
title = "Tiny"
instructions = "Type a, then s"
exercises = ["a", "s"]
target_keys = "as"

[[lessons]]
id = 1
title = "Caps"
instructions = "Capital A"
exercises = ["Ab"]
target_keys = "ab"
"#;

fn timing() -> Timing {
    Timing::default()
}

fn app_in(dir: &TempDir) -> App {
    let store = FileStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    App::new(Config::default(), Catalog::builtin().unwrap(), Box::new(store))
}

fn press_for(ch: char) -> KeyPress {
    if ch.is_ascii_uppercase() {
        KeyPress::shifted(ch)
    } else {
        KeyPress::char(ch)
    }
}

#[test]
fn two_exercise_lesson_advances_then_completes() {
    let catalog = Catalog::from_toml(TWO_EXERCISES).unwrap();
    let start = Instant::now();
    let mut session = LessonSession::start(&catalog, 0, timing(), start).unwrap();

    assert_eq!(session.handle_key(&KeyPress::char('a'), start), Step::Hit);
    assert_eq!(session.phase(), Phase::ExerciseBoundary);
    assert_eq!(session.tick(start + timing().advance), None);
    assert_eq!(session.exercise_index(), 1);
    assert_eq!(session.char_index(), 0);

    let later = start + timing().advance + Duration::from_millis(10);
    assert_eq!(session.handle_key(&KeyPress::char('s'), later), Step::Hit);
    let done = session.tick(later + timing().advance);
    assert_eq!(
        done,
        Some(Completion {
            lesson_index: 0,
            total_keystrokes: 2,
            correct_keystrokes: 2,
        })
    );
    assert_eq!(session.tick(later + timing().advance * 2), None);
}

#[test]
fn shift_then_capital_counts_once() {
    let catalog = Catalog::from_toml(TWO_EXERCISES).unwrap();
    let now = Instant::now();
    let mut session = LessonSession::start(&catalog, 1, timing(), now).unwrap();

    assert_eq!(session.handle_key(&KeyPress::shift_alone(), now), Step::Ignored);
    assert_eq!(session.stats().total, 0);
    assert_eq!(session.char_index(), 0);

    assert_eq!(session.handle_key(&KeyPress::shifted('a'), now), Step::Hit);
    assert_eq!(session.typed(), &['A']);
    assert_eq!(session.stats().total, 1);
    assert_eq!(session.stats().correct, 1);
}

#[test]
fn mismatch_keeps_cursor_and_shakes() {
    let catalog = Catalog::from_toml(TWO_EXERCISES).unwrap();
    let now = Instant::now();
    let mut session = LessonSession::start(&catalog, 1, timing(), now).unwrap();
    session.handle_key(&KeyPress::shifted('a'), now);

    assert_eq!(session.handle_key(&KeyPress::char('c'), now), Step::Miss);
    assert_eq!(session.char_index(), 1);
    assert_eq!(session.stats().streak, 0);
    assert!(session.is_shaking());
    session.tick(now + timing().shake);
    assert!(!session.is_shaking());
}

#[test]
fn completed_lesson_survives_restart_of_the_app() {
    let dir = TempDir::new().unwrap();
    let mut now = Instant::now();

    {
        let mut app = app_in(&dir);
        app.start_lesson(0, now).unwrap();
        let exercises = app.catalog.lessons()[0].exercises.clone();
        for exercise in &exercises {
            for ch in exercise.chars() {
                app.lesson_key(&press_for(ch), now);
                now += Duration::from_millis(50);
                app.tick(now);
            }
            now += app.config.timing().advance;
            app.tick(now);
        }
        assert!(app.session.as_ref().unwrap().is_complete());
        app.go_to_progress();
        assert_eq!(app.screen, AppScreen::Progress);
    }

    let app = app_in(&dir);
    assert_eq!(app.progress.completed_lessons, vec![0]);
    assert_eq!(app.progress.stats.lessons_completed, 1);
    assert!(app.progress.stats.correct_keystrokes <= app.progress.stats.total_keystrokes);
    assert!(app.can_start(1));
    assert!(!app.can_start(2));
}

#[test]
fn saved_record_uses_camel_case_keys() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    app.start_lesson(0, Instant::now()).unwrap();

    let raw = fs::read_to_string(dir.path().join(format!("{PROGRESS_KEY}.json"))).unwrap();
    assert!(raw.contains("\"completedLessons\""));
    assert!(raw.contains("\"currentLesson\""));
    assert!(raw.contains("\"totalKeystrokes\""));
}

#[test]
fn malformed_saved_progress_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    store.set(PROGRESS_KEY, "{ not json").unwrap();
    assert_eq!(load_progress(&store), ProgressRecord::default());

    let app = app_in(&dir);
    assert_eq!(app.progress, ProgressRecord::default());
    // Loading alone never rewrites the file.
    assert_eq!(store.get(PROGRESS_KEY).unwrap().as_deref(), Some("{ not json"));
}

#[test]
fn reset_and_restart_are_persisted() {
    let dir = TempDir::new().unwrap();
    {
        let store = FileStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let record = r#"{"completedLessons":[0,1,2],"currentLesson":3,
            "stats":{"totalKeystrokes":120,"correctKeystrokes":100,"lessonsCompleted":3}}"#;
        store.set(PROGRESS_KEY, record).unwrap();
    }

    let mut app = app_in(&dir);
    app.request(Confirm::ResetLesson(1));
    app.accept_confirm();
    assert_eq!(app_in(&dir).progress.completed_lessons, vec![0, 2]);
    assert_eq!(app_in(&dir).progress.stats.total_keystrokes, 120);

    app.request(Confirm::RestartJourney);
    app.accept_confirm();
    assert_eq!(app_in(&dir).progress, ProgressRecord::default());
}

#[test]
fn leaving_mid_lesson_reports_nothing() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    let now = Instant::now();
    app.start_lesson(0, now).unwrap();
    app.lesson_key(&KeyPress::char('a'), now);
    app.go_to_welcome();

    // Timers of the dropped session can no longer fire.
    app.tick(now + Duration::from_secs(10));
    let reloaded = app_in(&dir);
    assert!(reloaded.progress.completed_lessons.is_empty());
    assert_eq!(reloaded.progress.stats.total_keystrokes, 0);
    assert_eq!(reloaded.progress.current_lesson, 0);
}
