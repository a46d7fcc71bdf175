// The binary in main.rs drives the terminal; everything it needs lives here so
// integration tests and criterion benches can reach it as `keyquest::*`.

pub mod app;
pub mod catalog;
pub mod config;
pub mod event;
pub mod keyboard;
pub mod progress;
pub mod session;
pub mod store;
pub mod ui;
