mod discard;
mod host;
mod sheet;
mod sheet_state;
mod text_input;
mod types;

pub use discard::{DiscardAction, DiscardGuard};
pub use host::HostEvent;
pub use sheet::{ChangeListener, ConfirmCallback, DismissCallback, TextFieldSheet};
pub use sheet_state::{DEFAULT_ANIMATION, SheetState, SheetValue};
pub use text_input::TextInput;
pub use types::*;

use crate::config::{Config, DiscardPromptConfig, SheetConfig};
use std::sync::mpsc::{Receiver, Sender, channel};

/// Demo host: owns the draft and mounts the sheet while it is open
pub struct App {
    pub should_quit: bool,
    pub draft: String,
    pub sheet: Option<TextFieldSheet>,
    pub sheet_config: SheetConfig,
    pub discard_prompt: DiscardPromptConfig,
    pub status_toast: Option<StatusToast>,
    pub needs_redraw: bool,
    confirmed_this_cycle: bool,
    events_tx: Sender<HostEvent>,
    events_rx: Receiver<HostEvent>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl App {
    pub fn new(config: &Config) -> Self {
        let (events_tx, events_rx) = channel();
        Self {
            should_quit: false,
            draft: String::new(),
            sheet: None,
            sheet_config: config.sheet.clone(),
            discard_prompt: config.discard_prompt.clone(),
            status_toast: None,
            needs_redraw: true,
            confirmed_this_cycle: false,
            events_tx,
            events_rx,
        }
    }

    pub fn with_draft(mut self, draft: impl Into<String>) -> Self {
        self.draft = draft.into();
        self
    }

    pub fn with_discard_guard(mut self, enabled: bool) -> Self {
        self.sheet_config.discard_guard = enabled;
        self
    }
}
