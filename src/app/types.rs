use std::time::Duration;

use crate::app::sheet_state::DEFAULT_ANIMATION;

/// Where a non-confirm dismiss attempt came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissSource {
    /// Drag down on the sheet handle
    Swipe,
    /// Click on the dimmed area outside the sheet
    ScrimTap,
    /// Esc
    Back,
}

/// Presentation state of the sheet as seen by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetVisibility {
    Closed,
    Open,
    Hiding,
}

/// Change notification emitted to subscribers of a sheet controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetChange {
    Text,
    Focus(bool),
    Visibility(SheetVisibility),
    DiscardPrompt(bool),
}

/// Static inputs of a text field sheet
#[derive(Debug, Clone)]
pub struct SheetOptions {
    pub seed: String,
    pub placeholder: String,
    pub confirm_label: String,
    pub single_line: bool,
    pub animation: Duration,
}

impl SheetOptions {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            placeholder: String::new(),
            confirm_label: "Save".to_string(),
            single_line: true,
            animation: DEFAULT_ANIMATION,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_confirm_label(mut self, confirm_label: impl Into<String>) -> Self {
        self.confirm_label = confirm_label.into();
        self
    }

    pub fn with_single_line(mut self, single_line: bool) -> Self {
        self.single_line = single_line;
        self
    }

    pub fn with_animation(mut self, animation: Duration) -> Self {
        self.animation = animation;
        self
    }
}

#[derive(Debug, Clone)]
pub struct StatusToast {
    pub message: String,
    pub created_at: std::time::Instant,
}

impl StatusToast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self, duration: std::time::Duration) -> bool {
        self.created_at.elapsed() >= duration
    }
}
