//! HUD state management

use saraos_core::Conversation;

/// HUD session state: the conversation store plus view-only bookkeeping
/// (input buffer, cursor, scroll, spinner). The conversation owns every
/// behavioral invariant; nothing here touches the network.
pub struct HudState {
    /// Conversation log and single-flight gate
    pub conversation: Conversation,
    /// Current input buffer
    pub input: String,
    /// Cursor position in input, counted in characters
    pub cursor_pos: usize,
    /// Scroll offset for the log area
    pub scroll_offset: u16,
    /// Pulse animation frame
    pub pulse_frame: usize,
}

impl Default for HudState {
    fn default() -> Self {
        Self::new()
    }
}

impl HudState {
    pub fn new() -> Self {
        Self {
            conversation: Conversation::new(),
            input: String::new(),
            cursor_pos: 0,
            scroll_offset: 0,
            pulse_frame: 0,
        }
    }

    pub fn is_processing(&self) -> bool {
        self.conversation.is_processing()
    }

    /// Get the current input and clear it
    pub fn take_input(&mut self) -> String {
        self.cursor_pos = 0;
        std::mem::take(&mut self.input)
    }

    /// Byte offset of the cursor; the buffer may hold multibyte characters
    fn cursor_byte_offset(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_pos)
            .map(|(offset, _)| offset)
            .unwrap_or(self.input.len())
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert character at cursor position
    pub fn insert_char(&mut self, c: char) {
        let offset = self.cursor_byte_offset();
        self.input.insert(offset, c);
        self.cursor_pos += 1;
    }

    /// Delete character before cursor (backspace)
    pub fn delete_char(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            let offset = self.cursor_byte_offset();
            self.input.remove(offset);
        }
    }

    /// Delete character at cursor (delete key)
    pub fn delete_char_forward(&mut self) {
        if self.cursor_pos < self.char_count() {
            let offset = self.cursor_byte_offset();
            self.input.remove(offset);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_pos < self.char_count() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_pos = self.char_count();
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self, max_scroll: u16) {
        if self.scroll_offset < max_scroll {
            self.scroll_offset += 1;
        }
    }

    /// Scroll to bottom of the log; clamped to content height at render.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = u16::MAX;
    }

    /// Advance the pulse animation while a call is in flight
    pub fn tick_pulse(&mut self) {
        if self.is_processing() {
            self.pulse_frame = (self.pulse_frame + 1) % 4;
        }
    }

    /// Check if input is a slash command
    pub fn is_command(&self) -> bool {
        self.input.starts_with('/')
    }
}
