//! SARA_OS HUD screen
//!
//! Ratatui-based interactive chat interface:
//! - state.rs: HUD state (conversation plus input/scroll bookkeeping)
//! - ui.rs: rendering
//! - input.rs: input handling and slash commands
//! - runner.rs: coordinates the components

mod input;
mod runner;
mod state;
mod ui;

pub use runner::{HudResult, run_hud};
pub use state::HudState;
