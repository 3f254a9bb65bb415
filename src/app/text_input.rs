use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Working text of a field: content plus a character-indexed cursor.
///
/// Editing goes through [`TextInput::apply_key`] / [`TextInput::apply_paste`],
/// which never touch `self` and instead return the proposed next value. The
/// owner decides whether to accept it, which keeps the field fully controlled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    content: String,
    cursor_index: usize,
}

impl TextInput {
    /// Creates a new empty text input
    pub fn new() -> Self {
        Self {
            content: String::new(),
            cursor_index: 0,
        }
    }

    /// Creates a text input with initial content and the cursor at the end
    pub fn with_content(content: String) -> Self {
        let cursor_index = content.chars().count();
        Self {
            content,
            cursor_index,
        }
    }

    /// Inserts a character at the cursor
    pub fn add_char(&mut self, character: char) {
        let insert_index = char_to_byte_index(&self.content, self.cursor_index);
        self.content.insert(insert_index, character);
        self.cursor_index = self.cursor_index.saturating_add(1);
    }

    /// Inserts a string at the cursor
    pub fn insert_str(&mut self, text: &str) {
        let insert_index = char_to_byte_index(&self.content, self.cursor_index);
        self.content.insert_str(insert_index, text);
        self.cursor_index = self.cursor_index.saturating_add(text.chars().count());
    }

    /// Removes the character before the cursor (backspace)
    pub fn remove_char(&mut self) {
        if self.cursor_index == 0 {
            return;
        }
        let end_index = char_to_byte_index(&self.content, self.cursor_index);
        let start_index = char_to_byte_index(&self.content, self.cursor_index.saturating_sub(1));
        if start_index < end_index {
            self.content.replace_range(start_index..end_index, "");
            self.cursor_index = self.cursor_index.saturating_sub(1);
        }
    }

    /// Removes the character at the cursor (delete)
    pub fn delete_char(&mut self) {
        let length = self.content.chars().count();
        if self.cursor_index >= length {
            return;
        }
        let start_index = char_to_byte_index(&self.content, self.cursor_index);
        let end_index = char_to_byte_index(&self.content, self.cursor_index.saturating_add(1));
        if start_index < end_index {
            self.content.replace_range(start_index..end_index, "");
        }
    }

    pub fn move_left(&mut self) {
        self.cursor_index = self.cursor_index.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        let length = self.content.chars().count();
        if self.cursor_index < length {
            self.cursor_index += 1;
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor_index = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor_index = self.content.chars().count();
    }

    /// Gets the current content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns cursor position in characters
    pub fn cursor_position(&self) -> usize {
        self.cursor_index
    }

    /// Checks if the input is exactly empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Computes the value a key press would produce.
    ///
    /// Returns `None` when the key is not an edit (so the caller can route it
    /// elsewhere) and `Some` with the proposed value otherwise, including
    /// cursor-only moves. Enter is never an edit for single-line fields; for
    /// multi-line fields `Alt+Enter` inserts a newline.
    #[must_use]
    pub fn apply_key(&self, key: KeyEvent, single_line: bool) -> Option<TextInput> {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        let mut next = self.clone();
        match key.code {
            KeyCode::Char(character) if !control => next.add_char(character),
            KeyCode::Enter if !single_line && key.modifiers.contains(KeyModifiers::ALT) => {
                next.add_char('\n');
            }
            KeyCode::Backspace => next.remove_char(),
            KeyCode::Delete => next.delete_char(),
            KeyCode::Left => next.move_left(),
            KeyCode::Right => next.move_right(),
            KeyCode::Home => next.move_to_start(),
            KeyCode::End => next.move_to_end(),
            _ => return None,
        }
        Some(next)
    }

    /// Computes the value a paste would produce. Line breaks are dropped for
    /// single-line fields; an empty result means the paste is not an edit.
    #[must_use]
    pub fn apply_paste(&self, pasted: &str, single_line: bool) -> Option<TextInput> {
        let text = if single_line {
            pasted.replace(['\n', '\r'], "")
        } else {
            pasted.replace('\r', "")
        };
        if text.is_empty() {
            return None;
        }
        let mut next = self.clone();
        next.insert_str(&text);
        Some(next)
    }
}

fn char_to_byte_index(value: &str, char_index: usize) -> usize {
    value
        .char_indices()
        .nth(char_index)
        .map_or_else(|| value.len(), |(index, _)| index)
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for TextInput {
    fn from(content: String) -> Self {
        Self::with_content(content)
    }
}

impl From<&str> for TextInput {
    fn from(content: &str) -> Self {
        Self::with_content(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_with_content_places_cursor_at_end() {
        let input = TextInput::from("héllo");
        assert_eq!(input.cursor_position(), 5);
    }

    #[test]
    fn test_insert_and_remove_multibyte() {
        let mut input = TextInput::from("añb");
        input.move_left();
        input.remove_char();
        assert_eq!(input.content(), "ab");
        input.add_char('ü');
        assert_eq!(input.content(), "aüb");
        input.move_to_start();
        input.delete_char();
        assert_eq!(input.content(), "üb");
    }

    #[test]
    fn test_blank_vs_empty() {
        assert!(TextInput::new().is_blank());
        assert!(TextInput::new().is_empty());
        let spaces = TextInput::from("  \t");
        assert!(spaces.is_blank());
        assert!(!spaces.is_empty());
        assert!(!TextInput::from(" a ").is_blank());
    }

    #[test]
    fn test_apply_key_leaves_original_untouched() {
        let input = TextInput::from("Buy");
        let next = input.apply_key(key(KeyCode::Char('s')), true);
        assert_eq!(input.content(), "Buy");
        assert_eq!(next.map(|value| value.content().to_string()), Some("Buys".to_string()));
    }

    #[test]
    fn test_apply_key_ignores_non_edits() {
        let input = TextInput::from("x");
        assert!(input.apply_key(key(KeyCode::Enter), true).is_none());
        assert!(input.apply_key(key(KeyCode::Esc), true).is_none());
        assert!(input.apply_key(key(KeyCode::Tab), true).is_none());
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(input.apply_key(ctrl_c, true).is_none());
    }

    #[test]
    fn test_alt_enter_inserts_newline_only_when_multiline() {
        let input = TextInput::from("a");
        let alt_enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT);
        assert!(input.apply_key(alt_enter, true).is_none());
        let next = input.apply_key(alt_enter, false);
        assert_eq!(next.map(|value| value.content().to_string()), Some("a\n".to_string()));
    }

    #[test]
    fn test_apply_paste_strips_newlines_for_single_line() {
        let input = TextInput::from("Buy ");
        let next = input.apply_paste("milk\r\nand eggs", true);
        assert_eq!(
            next.map(|value| value.content().to_string()),
            Some("Buy milkand eggs".to_string())
        );
        assert!(input.apply_paste("\n", true).is_none());
    }
}
