//! HUD rendering

use super::state::HudState;
use crate::tui::theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

const PULSE_FRAMES: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Main HUD renderer
pub struct HudUI;

impl HudUI {
    /// Render the complete HUD
    pub fn render(frame: &mut Frame, state: &HudState) {
        let area = frame.area();

        // Layout: header, log, input, help bar
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header bar
                Constraint::Min(5),    // Log area
                Constraint::Length(3), // Input area
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        Self::render_header(frame, chunks[0], state);
        Self::render_log(frame, chunks[1], state);
        Self::render_input(frame, chunks[2], state);
        Self::render_help_bar(frame, chunks[3], state);
    }

    /// Header bar with title and link status
    fn render_header(frame: &mut Frame, area: Rect, state: &HudState) {
        let status = if state.is_processing() {
            Span::styled(
                format!(" {} PROCESSING ", PULSE_FRAMES[state.pulse_frame]),
                theme::pulse(),
            )
        } else {
            Span::styled(" IDLE ", Style::default().fg(theme::GRID))
        };

        let header_line = Line::from(vec![
            Span::styled(" ⛊ SARA_OS ", theme::title()),
            Span::styled("v1.0 (CLOUD) ", Style::default().fg(theme::MUTED)),
            Span::styled("│", Style::default().fg(theme::MUTED)),
            status,
        ]);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme::border());

        let para = Paragraph::new(header_line).block(block);
        frame.render_widget(para, area);
    }

    /// Conversation log area
    fn render_log(frame: &mut Frame, area: Rect, state: &HudState) {
        let inner_height = area.height.saturating_sub(2) as usize;

        let mut lines: Vec<Line> = Vec::new();
        for entry in state.conversation.entries() {
            let stamp = entry.timestamp.format("[%H:%M:%S] ").to_string();
            let tag = format!("[{}] ", entry.source);
            let style = theme::entry_style(entry.kind);

            let content_lines: Vec<&str> = entry.message.lines().collect();
            let first = content_lines.first().copied().unwrap_or("");
            let indent = " ".repeat(stamp.len() + tag.len());

            lines.push(Line::from(vec![
                Span::styled(stamp, theme::timestamp()),
                Span::styled(tag, theme::source_style(entry.kind)),
                Span::styled(first.to_string(), style),
            ]));
            for line in content_lines.iter().skip(1) {
                lines.push(Line::from(Span::styled(
                    format!("{indent}{line}"),
                    style,
                )));
            }
        }

        // Pulse line while the call is in flight
        if state.is_processing() {
            lines.push(Line::from(Span::styled(
                format!(
                    "[SARA] {} ACCESSING CLOUD BRAIN...",
                    PULSE_FRAMES[state.pulse_frame]
                ),
                theme::pulse(),
            )));
        }

        let scroll = clamp_scroll(lines.len(), inner_height, state.scroll_offset);

        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(theme::border());

        let para = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));

        frame.render_widget(para, area);
    }

    /// Input line
    fn render_input(frame: &mut Frame, area: Rect, state: &HudState) {
        let input_style = if state.is_processing() {
            Style::default().fg(theme::MUTED)
        } else {
            Style::default().fg(theme::GRID)
        };

        let display_input = if state.is_processing() {
            "AWAITING RESPONSE...".to_string()
        } else if state.input.is_empty() {
            "UPLINK ESTABLISHED. AWAITING INPUT...".to_string()
        } else {
            // Inline cursor indicator
            let mut chars: Vec<char> = state.input.chars().collect();
            if state.cursor_pos >= chars.len() {
                chars.push('_');
            } else {
                chars.insert(state.cursor_pos, '|');
            }
            chars.into_iter().collect()
        };

        let input_line = Line::from(vec![
            Span::styled("> ", theme::title()),
            Span::styled(display_input, input_style),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if state.is_processing() {
                theme::border()
            } else {
                theme::border_active()
            })
            .title(if state.is_command() {
                " Command "
            } else {
                " Uplink "
            });

        let para = Paragraph::new(input_line).block(block);
        frame.render_widget(para, area);
    }

    /// Help bar
    fn render_help_bar(frame: &mut Frame, area: Rect, state: &HudState) {
        let help_text = if state.is_processing() {
            Line::from(Span::styled(" Processing... ", theme::pulse()))
        } else {
            Line::from(vec![
                Span::styled(" Enter", theme::key_hint()),
                Span::styled(": Send │ ", theme::footer()),
                Span::styled("/help", theme::key_hint()),
                Span::styled(": Commands │ ", theme::footer()),
                Span::styled("PageUp/Down", theme::key_hint()),
                Span::styled(": Scroll │ ", theme::footer()),
                Span::styled("Ctrl+Q", theme::key_hint()),
                Span::styled(": Exit ", theme::footer()),
            ])
        };

        let para = Paragraph::new(help_text);
        frame.render_widget(para, area);
    }
}

/// Clamp the scroll offset to the content height. `u16::MAX` is the
/// scroll-to-bottom sentinel; logs longer than `u16` can address pin to
/// the deepest reachable offset instead of wrapping.
fn clamp_scroll(total_lines: usize, inner_height: usize, offset: u16) -> u16 {
    let max_scroll =
        u16::try_from(total_lines.saturating_sub(inner_height)).unwrap_or(u16::MAX);
    if offset == u16::MAX {
        max_scroll
    } else {
        offset.min(max_scroll)
    }
}
