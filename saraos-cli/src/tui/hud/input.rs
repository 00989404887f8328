//! HUD input handling

use super::state::HudState;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Input action result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// No action needed
    None,
    /// Submit the current input
    Submit,
    /// Execute a slash command
    Command(String),
    /// Exit the HUD
    Exit,
    /// Scroll up
    ScrollUp,
    /// Scroll down
    ScrollDown,
    /// Scroll to top
    ScrollTop,
    /// Scroll to bottom
    ScrollBottom,
}

/// Handle keyboard input and update state. While a call is in flight only
/// the exit chord is honored; the in-flight call itself is never canceled.
pub fn handle_input(state: &mut HudState, event: Event) -> InputAction {
    if state.is_processing() {
        if let Event::Key(key) = event
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && key.code == KeyCode::Char('q')
        {
            return InputAction::Exit;
        }
        return InputAction::None;
    }

    match event {
        Event::Key(key) => handle_key(state, key),
        Event::Resize(_, _) => InputAction::None,
        _ => InputAction::None,
    }
}

fn handle_key(state: &mut HudState, key: KeyEvent) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
        return InputAction::Exit;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.input.clear();
        state.cursor_pos = 0;
        return InputAction::None;
    }

    match key.code {
        KeyCode::Enter => {
            if state.input.is_empty() {
                return InputAction::None;
            }
            if state.is_command() {
                let cmd = state.take_input();
                return InputAction::Command(cmd);
            }
            InputAction::Submit
        }
        KeyCode::Esc => {
            if !state.input.is_empty() {
                state.input.clear();
                state.cursor_pos = 0;
            }
            InputAction::None
        }
        KeyCode::Backspace => {
            state.delete_char();
            InputAction::None
        }
        KeyCode::Delete => {
            state.delete_char_forward();
            InputAction::None
        }
        KeyCode::Left => {
            state.move_cursor_left();
            InputAction::None
        }
        KeyCode::Right => {
            state.move_cursor_right();
            InputAction::None
        }
        KeyCode::Home => {
            state.move_cursor_home();
            InputAction::None
        }
        KeyCode::End => {
            state.move_cursor_end();
            InputAction::None
        }
        KeyCode::Up | KeyCode::PageUp => InputAction::ScrollUp,
        KeyCode::Down | KeyCode::PageDown => InputAction::ScrollDown,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::ScrollTop
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::ScrollBottom
        }
        KeyCode::Char(c) => {
            state.insert_char(c);
            InputAction::None
        }

        _ => InputAction::None,
    }
}

/// Parsed slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HudCommand {
    None,
    ShowHelp,
    Probe,
    Exit,
    Unknown(String),
}

/// Parse a slash command line
pub fn parse_command(input: &str) -> HudCommand {
    let cmd = input.trim_start_matches('/');
    let name = cmd.split_whitespace().next().unwrap_or("").to_ascii_lowercase();

    match name.as_str() {
        "" => HudCommand::None,
        "help" | "?" => HudCommand::ShowHelp,
        "link" | "probe" => HudCommand::Probe,
        "exit" | "quit" | "bye" => HudCommand::Exit,
        _ => HudCommand::Unknown(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn enter_submits_non_empty_input() {
        let mut state = HudState::new();
        assert_eq!(handle_input(&mut state, key(KeyCode::Enter)), InputAction::None);

        state.insert_char('x');
        assert_eq!(handle_input(&mut state, key(KeyCode::Enter)), InputAction::Submit);
    }

    #[test]
    fn enter_on_slash_input_yields_command() {
        let mut state = HudState::new();
        for c in "/help".chars() {
            state.insert_char(c);
        }
        assert_eq!(
            handle_input(&mut state, key(KeyCode::Enter)),
            InputAction::Command("/help".into())
        );
        assert!(state.input.is_empty());
    }

    #[test]
    fn typing_is_ignored_while_processing() {
        let mut state = HudState::new();
        state.conversation.submit("busy").expect("command issued");

        assert_eq!(handle_input(&mut state, key(KeyCode::Char('a'))), InputAction::None);
        assert!(state.input.is_empty());
        assert_eq!(handle_input(&mut state, ctrl('q')), InputAction::Exit);
    }

    #[test]
    fn ctrl_c_clears_input() {
        let mut state = HudState::new();
        for c in "draft".chars() {
            state.insert_char(c);
        }
        assert_eq!(handle_input(&mut state, ctrl('c')), InputAction::None);
        assert!(state.input.is_empty());
        assert_eq!(state.cursor_pos, 0);
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("/help"), HudCommand::ShowHelp);
        assert_eq!(parse_command("/?"), HudCommand::ShowHelp);
        assert_eq!(parse_command("/link"), HudCommand::Probe);
        assert_eq!(parse_command("/exit"), HudCommand::Exit);
        assert_eq!(parse_command("/QUIT"), HudCommand::Exit);
        assert_eq!(parse_command("/"), HudCommand::None);
        assert_eq!(parse_command("/warp"), HudCommand::Unknown("warp".into()));
    }
}
