use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use keyquest::app::{App, AppScreen, Confirm, ProgressTab};
use keyquest::catalog::Catalog;
use keyquest::config::Config;
use keyquest::event::{AppEvent, EventHandler, KeyCapture};
use keyquest::session::input::KeyPress;
use keyquest::store::file_store::FileStore;
use keyquest::ui::components::celebration::Celebration;
use keyquest::ui::components::confirm_dialog::ConfirmDialog;
use keyquest::ui::components::exercise_display::ExerciseDisplay;
use keyquest::ui::components::key_hint::KeyHint;
use keyquest::ui::components::keyboard_diagram::KeyboardDiagram;
use keyquest::ui::components::lesson_menu::LessonMenu;
use keyquest::ui::components::progress_bar::ProgressBar;
use keyquest::ui::components::progress_cards::ProgressCards;
use keyquest::ui::components::progress_overview::ProgressOverview;
use keyquest::ui::components::sparkles::SparkleLayer;
use keyquest::ui::components::stats_panel::StatsPanel;
use keyquest::ui::layout::{LessonLayout, ScreenLayout, hint_lines};
use keyquest::ui::theme::Theme;

const LOG_FILE: &str = "keyquest.log";
const LOG_ENV: &str = "KEYQUEST_LOG";

#[derive(Parser)]
#[command(name = "keyquest", version, about = "A friendly typing adventure for young learners")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Open this lesson right away (0-based id)")]
    lesson: Option<usize>,

    #[arg(long, help = "Directory for saved progress and the log file")]
    data_dir: Option<PathBuf>,

    #[arg(long, help = "Erase all progress before starting")]
    reset: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = Config::config_path();
    let (mut config, config_err) = Config::load_or_default_from(&config_path);
    if !config_path.exists() {
        // Best effort; a read-only config dir just means no file to edit.
        let _ = config.save();
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    let data_dir = config.data_dir();
    init_logging(&data_dir);

    if let Some(err) = config_err {
        warn!(%err, path = %config_path.display(), "ignoring unreadable config");
    }

    if Theme::load(&config.theme).is_none() {
        warn!(theme = %config.theme, available = ?Theme::available_themes(), "unknown theme, using default");
    }

    let catalog = Catalog::builtin()?;
    if let Some(index) = cli.lesson {
        catalog.get(index)?;
    }

    let store = FileStore::with_base_dir(data_dir.clone())
        .with_context(|| format!("cannot use data directory {}", data_dir.display()))?;
    let mut app = App::new(config, catalog, Box::new(store));

    if cli.reset {
        app.restart_journey();
    }
    if let Some(index) = cli.lesson {
        app.start_lesson(index, Instant::now())?;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(50));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("bye");
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Logs go to a file; the terminal belongs to the UI. If the file cannot be
/// opened the app runs without logging.
fn init_logging(data_dir: &Path) {
    if fs::create_dir_all(data_dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE))
    else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    let mut capture: Option<KeyCapture> = None;

    loop {
        sync_capture(app, &mut capture);
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.tick(Instant::now()),
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Holds the keyboard for exactly as long as a lesson is being typed.
fn sync_capture(app: &App, capture: &mut Option<KeyCapture>) {
    let typing = app
        .session
        .as_ref()
        .is_some_and(|session| !session.is_complete());
    match (typing, capture.is_some()) {
        (true, false) => {
            let guard = KeyCapture::acquire();
            if !guard.is_enhanced() {
                info!("terminal does not report lone modifier keys");
            }
            *capture = Some(guard);
        }
        (false, true) => *capture = None,
        _ => {}
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only process Press events; Repeat and Release would inflate the count.
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.confirm.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.accept_confirm(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_confirm(),
            _ => {}
        }
        return;
    }

    match app.screen {
        AppScreen::Welcome => handle_welcome_key(app, key),
        AppScreen::Lesson => handle_lesson_key(app, key),
        AppScreen::Progress => handle_progress_key(app, key),
    }
}

fn handle_welcome_key(app: &mut App, key: KeyEvent) {
    let count = app.catalog.len();
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('p') => app.go_to_progress(),
        KeyCode::Up | KeyCode::Char('k') => App::select_prev(&mut app.welcome_selected, count),
        KeyCode::Down | KeyCode::Char('j') => App::select_next(&mut app.welcome_selected, count),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let index = app.welcome_selected;
            open_lesson(app, index);
        }
        KeyCode::Char(ch @ '1'..='9') => {
            let index = ch as usize - '1' as usize;
            if index < count {
                app.welcome_selected = index;
                open_lesson(app, index);
            }
        }
        _ => {}
    }
}

fn open_lesson(app: &mut App, index: usize) {
    if !app.can_start(index) {
        return;
    }
    if let Err(err) = app.start_lesson(index, Instant::now()) {
        warn!(%err, "could not start lesson");
    }
}

fn handle_lesson_key(app: &mut App, key: KeyEvent) {
    let finished = app.session.as_ref().is_none_or(|s| s.is_complete());

    if finished {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => app.go_to_progress(),
            KeyCode::Esc => app.go_to_welcome(),
            _ => {}
        }
        return;
    }

    if key.code == KeyCode::Esc {
        app.go_to_welcome();
        return;
    }

    app.lesson_key(&KeyPress::from(&key), Instant::now());
}

fn handle_progress_key(app: &mut App, key: KeyEvent) {
    let count = app.catalog.len();
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('b') => app.go_to_welcome(),
        KeyCode::Tab | KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
            app.progress_tab = match app.progress_tab {
                ProgressTab::Overview => ProgressTab::Lessons,
                ProgressTab::Lessons => ProgressTab::Overview,
            };
        }
        KeyCode::Char('1') => app.progress_tab = ProgressTab::Overview,
        KeyCode::Char('2') => app.progress_tab = ProgressTab::Lessons,
        KeyCode::Char('r') => app.request(Confirm::RestartJourney),
        _ if app.progress_tab == ProgressTab::Lessons => match key.code {
            KeyCode::Up | KeyCode::Char('k') => App::select_prev(&mut app.progress_selected, count),
            KeyCode::Down | KeyCode::Char('j') => {
                App::select_next(&mut app.progress_selected, count)
            }
            KeyCode::Enter => {
                let index = app.progress_selected;
                open_lesson(app, index);
            }
            KeyCode::Char('x') if app.progress.is_completed(app.progress_selected) => {
                let index = app.progress_selected;
                app.request(Confirm::ResetLesson(index));
            }
            _ => {}
        },
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Welcome => render_welcome(frame, app),
        AppScreen::Lesson => render_lesson(frame, app),
        AppScreen::Progress => render_progress(frame, app),
    }

    if let Some(confirm) = app.confirm {
        let message = match confirm {
            Confirm::RestartJourney => {
                "Start the whole journey over? All progress will be erased.".to_string()
            }
            Confirm::ResetLesson(index) => {
                let title = app
                    .catalog
                    .get(index)
                    .map(|l| l.title.as_str())
                    .unwrap_or("this lesson");
                format!("Reset \"{title}\" so you can play it fresh?")
            }
        };
        frame.render_widget(ConfirmDialog::new(&message, app.theme), area);
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, title: &str, info: &str, area: Rect) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {info}"),
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, hints: &[&str], area: Rect) {
    frame.render_widget(Paragraph::new(hint_lines(hints, area.width, app.theme)), area);
}

fn render_welcome(frame: &mut ratatui::Frame, app: &App) {
    let screen = ScreenLayout::new(frame.area(), false);

    let info = format!(
        "{} keys typed | {}% accuracy",
        app.progress.stats.total_keystrokes,
        app.progress.overall_accuracy()
    );
    render_header(frame, app, "KeyQuest", &info, screen.header);

    let menu = LessonMenu::new(
        app.catalog.lessons(),
        &app.progress,
        app.welcome_selected,
        app.theme,
    );
    frame.render_widget(&menu, screen.column(60, 64));

    let mut hints = vec!["[\u{2191}\u{2193}] Choose", "[Enter] Play", "[p] Progress", "[q] Quit"];
    if !app.can_start(app.welcome_selected) {
        hints.insert(0, "\u{1f512} Finish the lesson before to unlock");
    }
    render_footer(frame, app, &hints, screen.footer);
}

fn render_lesson(frame: &mut ratatui::Frame, app: &App) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let Ok(lesson) = app.catalog.get(session.lesson_index()) else {
        return;
    };
    let layout = LessonLayout::new(frame.area());
    let now = Instant::now();

    let title = format!("{} {}", lesson.emoji, lesson.title);
    render_header(frame, app, &title, &lesson.instructions, layout.header);

    if let Some(stats) = layout.stats {
        frame.render_widget(
            StatsPanel::new(session.stats(), session.elapsed_secs(), app.theme),
            stats,
        );
    }

    if let Some(done) = session.completion() {
        let celebration = Celebration::new(lesson, &done, session.stats().best_streak, app.theme);
        frame.render_widget(celebration, layout.stage);
        frame.render_widget(SparkleLayer::new(&app.sparkles, app.theme, now), layout.stage);
        render_footer(
            frame,
            app,
            &["[Enter/Space] Continue", "[Esc] Lessons"],
            layout.footer,
        );
        return;
    }

    frame.render_widget(ExerciseDisplay::new(session, app.theme), layout.exercise);
    frame.render_widget(SparkleLayer::new(&app.sparkles, app.theme, now), layout.exercise);
    frame.render_widget(
        KeyHint::new(session.expected_char(), session.feedback(), app.theme),
        layout.hint,
    );
    if let Some(area) = layout.progress {
        frame.render_widget(
            ProgressBar::new("Lesson Progress", session.progress(), app.theme),
            area,
        );
    }
    if let Some(area) = layout.keyboard {
        frame.render_widget(
            KeyboardDiagram::new(session.expected_char(), &lesson.target_keys, app.theme),
            area,
        );
    }

    render_footer(frame, app, &["[Esc] Back to lessons"], layout.footer);
}

fn render_progress(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let screen = ScreenLayout::new(frame.area(), true);

    render_header(frame, app, "Your Progress", app.progress.milestone(), screen.header);

    let tab_style = |active: bool| {
        if active {
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(colors.text_pending())
        }
    };
    let tabs = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled("[1] Overview", tab_style(app.progress_tab == ProgressTab::Overview)),
        Span::raw("   "),
        Span::styled("[2] Lessons", tab_style(app.progress_tab == ProgressTab::Lessons)),
    ]));
    if let Some(area) = screen.tabs {
        frame.render_widget(tabs, area);
    }

    let content = screen.column(80, 64);
    match app.progress_tab {
        ProgressTab::Overview => frame.render_widget(
            ProgressOverview::new(&app.progress, app.catalog.len(), app.theme),
            content,
        ),
        ProgressTab::Lessons => frame.render_widget(
            ProgressCards::new(
                app.catalog.lessons(),
                &app.progress,
                app.progress_selected,
                app.theme,
            ),
            content,
        ),
    }

    let hints: &[&str] = match app.progress_tab {
        ProgressTab::Overview => &["[Tab] Lessons", "[r] Restart journey", "[Esc] Back"],
        ProgressTab::Lessons => &[
            "[\u{2191}\u{2193}] Choose",
            "[Enter] Play",
            "[x] Reset lesson",
            "[Tab] Overview",
            "[r] Restart journey",
            "[Esc] Back",
        ],
    };
    render_footer(frame, app, hints, screen.footer);
}
