pub mod celebration;
pub mod confirm_dialog;
pub mod exercise_display;
pub mod key_hint;
pub mod keyboard_diagram;
pub mod lesson_menu;
pub mod progress_bar;
pub mod progress_cards;
pub mod progress_overview;
pub mod sparkles;
pub mod stats_panel;
