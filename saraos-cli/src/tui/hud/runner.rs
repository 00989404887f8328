//! HUD runner - main event loop coordinator

use super::input::{HudCommand, InputAction, handle_input, parse_command};
use super::state::HudState;
use super::ui::HudUI;
use crate::tui::{init_terminal, restore_terminal};
use crossterm::event;
use saraos_core::conversation::source;
use saraos_core::{ChatOutcome, ClientError, LogEntry, Uplink};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const HELP_TEXT: &str = r#"Available commands:
  /help  - Show this help
  /link  - Check backend health
  /exit  - Close the HUD"#;

/// Result of a HUD session
pub enum HudResult {
    Exit,
}

/// A settled network call delivered back to the event loop
enum SettleEvent {
    Chat(Result<ChatOutcome, ClientError>),
    Probe(Result<String, ClientError>),
}

/// Run the HUD until the user exits
pub async fn run_hud<U>(client: Arc<U>) -> Result<HudResult, Box<dyn Error>>
where
    U: Uplink + 'static,
{
    let mut terminal = init_terminal()?;
    let mut state = HudState::new();

    let result = run_hud_loop(&mut terminal, &mut state, client).await;

    restore_terminal()?;
    result
}

/// Internal event loop
async fn run_hud_loop<U>(
    terminal: &mut crate::tui::Tui,
    state: &mut HudState,
    client: Arc<U>,
) -> Result<HudResult, Box<dyn Error>>
where
    U: Uplink + 'static,
{
    let (settle_tx, mut settle_rx) = mpsc::channel::<SettleEvent>(4);

    loop {
        terminal.draw(|frame| {
            HudUI::render(frame, state);
        })?;

        while let Ok(event) = settle_rx.try_recv() {
            apply_settlement(state, event);
        }

        let timeout = if state.is_processing() {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(50)
        };

        if event::poll(timeout)? {
            let event = event::read()?;
            match handle_input(state, event) {
                InputAction::Exit => {
                    return Ok(HudResult::Exit);
                }

                InputAction::Submit => {
                    let input = state.take_input();
                    dispatch_submit(state, &input, &client, &settle_tx);
                }

                InputAction::Command(cmd) => match parse_command(&cmd) {
                    HudCommand::Exit => return Ok(HudResult::Exit),
                    other => dispatch_command(state, other, &client, &settle_tx),
                },

                InputAction::ScrollUp => state.scroll_up(),
                InputAction::ScrollDown => state.scroll_down(u16::MAX - 1),
                InputAction::ScrollTop => state.scroll_offset = 0,
                InputAction::ScrollBottom => state.scroll_to_bottom(),
                InputAction::None => {}
            }
        } else if state.is_processing() {
            state.tick_pulse();
        }
    }
}

/// Submit user input: the conversation appends the user entry and closes
/// the gate before the call is spawned; a rejected submission spawns
/// nothing.
fn dispatch_submit<U>(
    state: &mut HudState,
    input: &str,
    client: &Arc<U>,
    tx: &mpsc::Sender<SettleEvent>,
) where
    U: Uplink + 'static,
{
    let Some(command) = state.conversation.submit(input) else {
        return;
    };
    state.scroll_to_bottom();

    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = client.send(&command.message).await;
        let _ = tx.send(SettleEvent::Chat(outcome)).await;
    });
}

/// Execute a parsed slash command
fn dispatch_command<U>(
    state: &mut HudState,
    command: HudCommand,
    client: &Arc<U>,
    tx: &mpsc::Sender<SettleEvent>,
) where
    U: Uplink + 'static,
{
    match command {
        HudCommand::None | HudCommand::Exit => {}

        HudCommand::ShowHelp => {
            state.conversation.append(LogEntry::system(source::SYS, HELP_TEXT));
            state.scroll_to_bottom();
        }

        HudCommand::Probe => {
            if !state.conversation.begin_probe() {
                return;
            }
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = client.probe().await;
                let _ = tx.send(SettleEvent::Probe(outcome)).await;
            });
        }

        HudCommand::Unknown(name) => {
            state.conversation.append(LogEntry::system(
                source::SYS,
                format!("UNKNOWN COMMAND: {name}. Type /help for available commands."),
            ));
            state.scroll_to_bottom();
        }
    }
}

/// Fold a settled call back into the conversation
fn apply_settlement(state: &mut HudState, event: SettleEvent) {
    match event {
        SettleEvent::Chat(outcome) => state.conversation.settle(outcome),
        SettleEvent::Probe(outcome) => state.conversation.settle_probe(outcome),
    }
    state.scroll_to_bottom();
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use saraos_core::{EntryKind, LINK_DOWN_MESSAGE, Status};

    /// Scripted uplink standing in for the backend
    struct ScriptedUplink {
        send_result: fn() -> Result<ChatOutcome, ClientError>,
        probe_result: fn() -> Result<String, ClientError>,
    }

    impl ScriptedUplink {
        fn replying(send_result: fn() -> Result<ChatOutcome, ClientError>) -> Arc<Self> {
            Arc::new(Self {
                send_result,
                probe_result: || Ok("Sara Backend Online".into()),
            })
        }
    }

    #[async_trait]
    impl Uplink for ScriptedUplink {
        async fn send(&self, _message: &str) -> Result<ChatOutcome, ClientError> {
            (self.send_result)()
        }

        async fn probe(&self) -> Result<String, ClientError> {
            (self.probe_result)()
        }
    }

    async fn drive_submit(
        state: &mut HudState,
        input: &str,
        client: Arc<ScriptedUplink>,
    ) -> Option<SettleEvent> {
        let (tx, mut rx) = mpsc::channel(4);
        dispatch_submit(state, input, &client, &tx);
        drop(tx);
        rx.recv().await
    }

    #[tokio::test]
    async fn reply_flow_appends_user_then_ai_entry() {
        let mut state = HudState::new();
        let client = ScriptedUplink::replying(|| Ok(ChatOutcome::Reply("All systems nominal.".into())));

        let event = drive_submit(&mut state, "status", client)
            .await
            .expect("call settles");

        // User entry is in place and the gate closed before settlement
        let entries = state.conversation.entries();
        assert_eq!(entries.last().unwrap().kind, EntryKind::User);
        assert_eq!(entries.last().unwrap().message, "status");
        assert!(state.is_processing());

        apply_settlement(&mut state, event);
        let last = state.conversation.entries().last().unwrap();
        assert_eq!(last.kind, EntryKind::Ai);
        assert_eq!(last.message, "All systems nominal.");
        assert_eq!(state.conversation.status(), Status::Idle);
    }

    #[tokio::test]
    async fn transport_failure_flow_appends_sentinel() {
        let mut state = HudState::new();
        let client =
            ScriptedUplink::replying(|| Err(ClientError::invalid_response("connection refused")));

        let event = drive_submit(&mut state, "x", client)
            .await
            .expect("call settles");
        apply_settlement(&mut state, event);

        let last = state.conversation.entries().last().unwrap();
        assert_eq!(last.kind, EntryKind::Error);
        assert_eq!(last.message, LINK_DOWN_MESSAGE);
        assert_eq!(state.conversation.status(), Status::Idle);
    }

    #[tokio::test]
    async fn blank_submit_spawns_nothing() {
        let mut state = HudState::new();
        let client = ScriptedUplink::replying(|| Ok(ChatOutcome::Reply("unused".into())));
        let before = state.conversation.entries().len();

        let event = drive_submit(&mut state, "   ", client).await;
        assert!(event.is_none());
        assert_eq!(state.conversation.entries().len(), before);
        assert_eq!(state.conversation.status(), Status::Idle);
    }

    #[tokio::test]
    async fn second_submit_while_processing_spawns_nothing() {
        let mut state = HudState::new();
        let client = ScriptedUplink::replying(|| Ok(ChatOutcome::Reply("first".into())));

        let (tx, mut rx) = mpsc::channel(4);
        dispatch_submit(&mut state, "one", &client, &tx);
        dispatch_submit(&mut state, "two", &client, &tx);
        drop(tx);

        let mut settled = 0;
        while let Some(event) = rx.recv().await {
            apply_settlement(&mut state, event);
            settled += 1;
        }
        assert_eq!(settled, 1);

        // One user entry for "one", one reply; "two" never entered the log
        let messages: Vec<&str> = state
            .conversation
            .entries()
            .iter()
            .map(|e| e.message.as_str())
            .collect();
        assert!(messages.contains(&"one"));
        assert!(!messages.contains(&"two"));
    }

    #[tokio::test]
    async fn probe_command_reports_link_status() {
        let mut state = HudState::new();
        let client = ScriptedUplink::replying(|| Ok(ChatOutcome::Empty));

        let (tx, mut rx) = mpsc::channel(4);
        dispatch_command(&mut state, HudCommand::Probe, &client, &tx);
        assert!(state.is_processing());
        drop(tx);

        let event = rx.recv().await.expect("probe settles");
        apply_settlement(&mut state, event);

        let last = state.conversation.entries().last().unwrap();
        assert_eq!(last.kind, EntryKind::System);
        assert_eq!(last.message, "LINK OK: Sara Backend Online");
        assert_eq!(state.conversation.status(), Status::Idle);
    }

    #[tokio::test]
    async fn help_command_appends_system_entry() {
        let mut state = HudState::new();
        let client = ScriptedUplink::replying(|| Ok(ChatOutcome::Empty));
        let (tx, _rx) = mpsc::channel(4);

        dispatch_command(&mut state, HudCommand::ShowHelp, &client, &tx);

        let last = state.conversation.entries().last().unwrap();
        assert_eq!(last.kind, EntryKind::System);
        assert!(last.message.contains("/link"));
        assert_eq!(state.conversation.status(), Status::Idle);
    }
}
