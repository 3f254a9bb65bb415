use crossterm::event::{KeyCode, KeyEvent};

/// Action chosen on the discard prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardAction {
    Cancel,
    ConfirmDiscard,
}

impl DiscardAction {
    fn toggled(self) -> Self {
        match self {
            DiscardAction::Cancel => DiscardAction::ConfirmDiscard,
            DiscardAction::ConfirmDiscard => DiscardAction::Cancel,
        }
    }
}

/// Visibility and highlighted choice of the "discard unsaved changes" prompt.
///
/// Belongs to exactly one sheet controller and is dropped with it.
#[derive(Debug, Clone)]
pub struct DiscardGuard {
    visible: bool,
    selected: DiscardAction,
}

impl DiscardGuard {
    pub fn new() -> Self {
        Self {
            visible: false,
            selected: DiscardAction::Cancel,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn selected(&self) -> DiscardAction {
        self.selected
    }

    /// Shows the prompt with the non-destructive choice highlighted
    pub fn show(&mut self) {
        self.visible = true;
        self.selected = DiscardAction::Cancel;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn toggle_selection(&mut self) {
        self.selected = self.selected.toggled();
    }

    /// Maps a key press on the visible prompt to an action. Selection keys
    /// are consumed here and yield `None`.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DiscardAction> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Some(DiscardAction::Cancel),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('y') | KeyCode::Char('Y') => {
                Some(DiscardAction::ConfirmDiscard)
            }
            KeyCode::Enter => Some(self.selected),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_selection();
                None
            }
            _ => None,
        }
    }
}

impl Default for DiscardGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_show_resets_selection_to_cancel() {
        let mut guard = DiscardGuard::new();
        guard.show();
        guard.toggle_selection();
        assert_eq!(guard.selected(), DiscardAction::ConfirmDiscard);
        guard.hide();
        guard.show();
        assert!(guard.is_visible());
        assert_eq!(guard.selected(), DiscardAction::Cancel);
    }

    #[test]
    fn test_enter_applies_selected_choice() {
        let mut guard = DiscardGuard::new();
        guard.show();
        assert_eq!(guard.handle_key(key(KeyCode::Enter)), Some(DiscardAction::Cancel));
        assert_eq!(guard.handle_key(key(KeyCode::Right)), None);
        assert_eq!(
            guard.handle_key(key(KeyCode::Enter)),
            Some(DiscardAction::ConfirmDiscard)
        );
    }

    #[test]
    fn test_shortcut_keys() {
        let mut guard = DiscardGuard::new();
        assert_eq!(guard.handle_key(key(KeyCode::Esc)), Some(DiscardAction::Cancel));
        assert_eq!(guard.handle_key(key(KeyCode::Char('n'))), Some(DiscardAction::Cancel));
        assert_eq!(
            guard.handle_key(key(KeyCode::Char('d'))),
            Some(DiscardAction::ConfirmDiscard)
        );
        assert_eq!(guard.handle_key(key(KeyCode::Char('x'))), None);
    }
}
