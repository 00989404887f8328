//! Terminal user interface for the SARA_OS HUD using Ratatui

pub mod hud;
mod terminal;
mod theme;

pub use terminal::{Tui, init_terminal, restore_terminal};
