//! HUD theme
//!
//! Palette follows the SARA_OS look: phosphor green grid, amber for SARA,
//! red for faults.

use ratatui::style::{Color, Modifier, Style};
use saraos_core::EntryKind;

/// Base phosphor green
pub const GRID: Color = Color::Rgb(80, 200, 120);

/// SARA accent - warm amber
pub const AMBER: Color = Color::Rgb(240, 200, 80);

/// Fault indicator - alert red
pub const ALERT: Color = Color::Rgb(230, 90, 90);

/// Muted text - for secondary information
pub const MUTED: Color = Color::Rgb(90, 110, 95);

/// Border color - dim green
pub const BORDER: Color = Color::Rgb(40, 90, 55);

/// Header/title style
pub fn title() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border() -> Style {
    Style::default().fg(BORDER)
}

/// Active border style
pub fn border_active() -> Style {
    Style::default().fg(AMBER)
}

/// Footer/help text style
pub fn footer() -> Style {
    Style::default().fg(MUTED)
}

/// Key hint style for help text
pub fn key_hint() -> Style {
    Style::default().fg(GRID)
}

/// Timestamp prefix style
pub fn timestamp() -> Style {
    Style::default().fg(MUTED)
}

/// Loading pulse style
pub fn pulse() -> Style {
    Style::default().fg(AMBER)
}

/// The one mapping from entry kind to presentation. The core never sees
/// styles; everything rendering-specific ends here.
pub fn entry_style(kind: EntryKind) -> Style {
    match kind {
        EntryKind::System => Style::default().fg(GRID),
        EntryKind::User => Style::default().fg(Color::White),
        EntryKind::Ai => Style::default().fg(AMBER),
        EntryKind::Error => Style::default().fg(ALERT).add_modifier(Modifier::BOLD),
    }
}

/// Source tag style, bold variant of the entry style
pub fn source_style(kind: EntryKind) -> Style {
    entry_style(kind).add_modifier(Modifier::BOLD)
}
