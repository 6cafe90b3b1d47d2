pub mod export;
pub mod format;
pub mod loader;
pub mod models;
pub mod tui;
