//! Text field sheet controller.
//!
//! Owns the working text, the sheet animation and the optional discard guard,
//! and decides when the host's `on_confirm` / `on_dismiss` callbacks fire:
//!
//! - confirm: release focus, `on_confirm(text)`, start hiding, and only once
//!   the hide has settled and the sheet is no longer visible, `on_dismiss()`.
//! - any other dismiss attempt: `on_dismiss()` right away, unless a discard
//!   guard is installed and the text differs from the seed, in which case the
//!   prompt is shown and the sheet stays open.
//!
//! `on_dismiss` fires at most once per controller. Callbacks are injected at
//! construction; a host whose dismiss callback changes builds a new controller.

use std::fmt;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use tracing::{debug, info};

use crate::app::discard::{DiscardAction, DiscardGuard};
use crate::app::sheet_state::{SheetState, SheetValue};
use crate::app::text_input::TextInput;
use crate::app::types::{DismissSource, SheetChange, SheetOptions, SheetVisibility};
use crate::ui::discard::DiscardPromptRenderer;
use crate::ui::sheet::SheetLayout;

pub type ConfirmCallback = Box<dyn FnMut(&str)>;
pub type DismissCallback = Box<dyn FnMut()>;
pub type ChangeListener = Box<dyn FnMut(&SheetChange)>;

/// Rows a drag on the handle must travel downwards to count as a swipe
const SWIPE_THRESHOLD_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

struct DiscardPrompt {
    guard: DiscardGuard,
    renderer: Box<dyn DiscardPromptRenderer>,
}

pub struct TextFieldSheet {
    options: SheetOptions,
    text: TextInput,
    sheet_state: SheetState,
    focused: bool,
    discard: Option<DiscardPrompt>,
    lifecycle: Lifecycle,
    confirmed: bool,
    dismissed: bool,
    drag_origin: Option<u16>,
    on_confirm: ConfirmCallback,
    on_dismiss: DismissCallback,
    listeners: Vec<ChangeListener>,
}

impl TextFieldSheet {
    /// Creates a sheet whose dismiss attempts always go straight to `on_dismiss`.
    pub fn open(
        options: SheetOptions,
        on_confirm: impl FnMut(&str) + 'static,
        on_dismiss: impl FnMut() + 'static,
    ) -> Self {
        let text = TextInput::from(options.seed.as_str());
        let sheet_state = SheetState::new(options.animation);
        Self {
            options,
            text,
            sheet_state,
            focused: false,
            discard: None,
            lifecycle: Lifecycle::Created,
            confirmed: false,
            dismissed: false,
            drag_origin: None,
            on_confirm: Box::new(on_confirm),
            on_dismiss: Box::new(on_dismiss),
            listeners: Vec::new(),
        }
    }

    /// Creates a sheet that asks before discarding edited text.
    pub fn open_with_discard_guard(
        options: SheetOptions,
        on_confirm: impl FnMut(&str) + 'static,
        on_dismiss: impl FnMut() + 'static,
        discard_prompt: impl DiscardPromptRenderer + 'static,
    ) -> Self {
        let mut sheet = Self::open(options, on_confirm, on_dismiss);
        sheet.discard = Some(DiscardPrompt {
            guard: DiscardGuard::new(),
            renderer: Box::new(discard_prompt),
        });
        sheet
    }

    /// Registers a listener notified after every observable state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&SheetChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }


    /// Runs once when the host mounts the sheet: grabs focus and starts the
    /// show animation. Later calls are ignored.
    pub fn on_mount(&mut self, now: Instant) {
        if self.lifecycle != Lifecycle::Created {
            return;
        }
        self.lifecycle = Lifecycle::Mounted;
        debug!(seed_len = self.options.seed.len(), "text field sheet mounted");

        // Drop any stale focus before requesting it for the field.
        self.set_focused(false);
        self.set_focused(true);

        self.sheet_state.show(now);
        self.emit(SheetChange::Visibility(self.visibility()));
    }

    /// Runs once when the host unmounts the sheet. No callback fires after this.
    pub fn on_unmount(&mut self) {
        if self.lifecycle != Lifecycle::Mounted {
            return;
        }
        self.lifecycle = Lifecycle::Unmounted;
        self.drag_origin = None;
        self.focused = false;
        if let Some(prompt) = &mut self.discard {
            prompt.guard.hide();
        }
        debug!("text field sheet unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }


    pub fn seed(&self) -> &str {
        &self.options.seed
    }

    pub fn text(&self) -> &str {
        self.text.content()
    }

    pub fn input(&self) -> &TextInput {
        &self.text
    }

    pub fn placeholder(&self) -> &str {
        &self.options.placeholder
    }

    pub fn confirm_label(&self) -> &str {
        &self.options.confirm_label
    }

    pub fn single_line(&self) -> bool {
        self.options.single_line
    }

    /// Working text differs from the seed
    pub fn is_dirty(&self) -> bool {
        self.text.content() != self.options.seed
    }

    /// Whether the confirm button is enabled
    pub fn can_confirm(&self) -> bool {
        !self.text.is_blank()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_placeholder_visible(&self) -> bool {
        self.text.is_empty()
    }

    pub fn visibility(&self) -> SheetVisibility {
        if !self.sheet_state.is_visible() {
            SheetVisibility::Closed
        } else if self.sheet_state.target_value() == SheetValue::Hidden {
            SheetVisibility::Hiding
        } else {
            SheetVisibility::Open
        }
    }

    /// 0.0 hidden, 1.0 expanded
    pub fn fraction(&self) -> f32 {
        self.sheet_state.fraction()
    }

    pub fn is_animating(&self) -> bool {
        self.sheet_state.is_animating()
    }

    pub fn has_discard_guard(&self) -> bool {
        self.discard.is_some()
    }

    pub fn is_discard_prompt_visible(&self) -> bool {
        self.discard
            .as_ref()
            .is_some_and(|prompt| prompt.guard.is_visible())
    }

    pub fn discard_selection(&self) -> Option<DiscardAction> {
        self.discard.as_ref().map(|prompt| prompt.guard.selected())
    }


    /// Accepts a new working value from the text field.
    pub fn on_value_change(&mut self, next: TextInput) {
        if !self.accepts_input() || next == self.text {
            return;
        }
        self.text = next;
        self.emit(SheetChange::Text);
    }

    /// Replaces the working text, cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.on_value_change(TextInput::from(text));
    }


    /// Confirm button activation. A no-op while the button is disabled, while
    /// the discard prompt is up, or after a previous confirm.
    pub fn confirm(&mut self, now: Instant) {
        if !self.is_interactive() || self.is_discard_prompt_visible() {
            return;
        }
        if !self.can_confirm() {
            debug!("confirm ignored, text is blank");
            return;
        }

        self.confirmed = true;
        self.drag_origin = None;
        self.set_focused(false);

        let text = self.text.content().to_string();
        info!(len = text.len(), "text field sheet confirmed");
        (self.on_confirm)(&text);

        self.sheet_state.hide(now);
        self.emit(SheetChange::Visibility(self.visibility()));
    }

    /// A dismiss attempt that did not come from the confirm button.
    pub fn request_dismiss(&mut self, source: DismissSource) {
        if !self.is_interactive() {
            return;
        }
        if self.is_discard_prompt_visible() {
            debug!(?source, "dismiss ignored, discard prompt already visible");
            return;
        }

        let dirty = self.is_dirty();
        match self.discard.as_mut() {
            Some(prompt) if dirty => {
                debug!(?source, "dismiss intercepted, showing discard prompt");
                prompt.guard.show();
                self.emit(SheetChange::DiscardPrompt(true));
            }
            Some(_) | None => {
                debug!(?source, dirty, "dismissing text field sheet");
                self.dismiss_now();
            }
        }
    }

    /// Hides the discard prompt and keeps editing.
    pub fn cancel_discard(&mut self) {
        let Some(prompt) = &mut self.discard else {
            return;
        };
        if !prompt.guard.is_visible() {
            return;
        }
        prompt.guard.hide();
        debug!("discard cancelled");
        self.emit(SheetChange::DiscardPrompt(false));
    }

    /// Hides the discard prompt and dismisses, dropping the working text.
    pub fn confirm_discard(&mut self) {
        let Some(prompt) = &mut self.discard else {
            return;
        };
        if !prompt.guard.is_visible() {
            return;
        }
        prompt.guard.hide();
        info!("working text discarded");
        self.emit(SheetChange::DiscardPrompt(false));
        self.dismiss_now();
    }


    /// Advances the sheet animation. A settled hide after confirm is what
    /// releases `on_dismiss`.
    pub fn tick(&mut self, now: Instant) {
        let Some(settled) = self.sheet_state.tick(now) else {
            return;
        };
        self.emit(SheetChange::Visibility(self.visibility()));
        if settled == SheetValue::Hidden {
            self.on_hide_finished();
        }
    }

    fn on_hide_finished(&mut self) {
        if self.lifecycle != Lifecycle::Mounted {
            debug!("hide finished after unmount, not dismissing");
            return;
        }
        if self.confirmed && !self.sheet_state.is_visible() {
            self.fire_dismiss();
        }
    }


    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if self.is_discard_prompt_visible() {
            let action = self
                .discard
                .as_mut()
                .and_then(|prompt| prompt.renderer.handle_key(key, &mut prompt.guard));
            match action {
                Some(DiscardAction::Cancel) => self.cancel_discard(),
                Some(DiscardAction::ConfirmDiscard) => self.confirm_discard(),
                None => self.emit(SheetChange::DiscardPrompt(true)),
            }
            return;
        }

        if !self.is_interactive() {
            return;
        }

        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Esc => self.request_dismiss(DismissSource::Back),
            KeyCode::Enter if self.options.single_line || !alt => self.confirm(now),
            _ if self.focused => {
                if let Some(next) = self.text.apply_key(key, self.options.single_line) {
                    self.on_value_change(next);
                }
            }
            _ => {}
        }
    }

    pub fn handle_paste(&mut self, pasted: &str) {
        if !self.accepts_input() || !self.focused {
            return;
        }
        if let Some(next) = self.text.apply_paste(pasted, self.options.single_line) {
            self.on_value_change(next);
        }
    }

    /// Mouse handling against the layout the sheet was last drawn with.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, layout: &SheetLayout, now: Instant) {
        if !self.is_interactive() || self.is_discard_prompt_visible() {
            return;
        }
        let position = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !layout.sheet.contains(position) {
                    self.request_dismiss(DismissSource::ScrimTap);
                } else if layout.handle.contains(position) {
                    self.drag_origin = Some(mouse.row);
                } else if layout.button.contains(position) {
                    self.confirm(now);
                } else if layout.field.contains(position) {
                    self.set_focused(true);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(origin) = self.drag_origin else {
                    return;
                };
                if mouse.row >= origin.saturating_add(SWIPE_THRESHOLD_ROWS) {
                    self.drag_origin = None;
                    self.request_dismiss(DismissSource::Swipe);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.drag_origin = None,
            _ => {}
        }
    }


    /// Draws the discard prompt through the injected renderer while it is visible.
    pub fn render_discard_prompt(&self, frame: &mut Frame, area: Rect) {
        if let Some(prompt) = self.discard.as_ref().filter(|prompt| prompt.guard.is_visible()) {
            prompt.renderer.render(frame, area, prompt.guard.selected());
        }
    }


    fn is_interactive(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted && !self.confirmed && !self.dismissed
    }

    fn accepts_input(&self) -> bool {
        self.is_interactive() && !self.is_discard_prompt_visible()
    }

    fn set_focused(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        self.emit(SheetChange::Focus(focused));
    }

    /// Dismiss without animation; the host tears the sheet down in response.
    fn dismiss_now(&mut self) {
        self.drag_origin = None;
        self.set_focused(false);
        self.sheet_state.snap_to(SheetValue::Hidden);
        self.emit(SheetChange::Visibility(self.visibility()));
        self.fire_dismiss();
    }

    fn fire_dismiss(&mut self) {
        if self.dismissed {
            return;
        }
        self.dismissed = true;
        debug!("firing on_dismiss");
        (self.on_dismiss)();
    }

    fn emit(&mut self, change: SheetChange) {
        for listener in &mut self.listeners {
            listener(&change);
        }
    }
}

impl fmt::Debug for TextFieldSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextFieldSheet")
            .field("seed", &self.options.seed)
            .field("text", &self.text.content())
            .field("visibility", &self.visibility())
            .field("focused", &self.focused)
            .field("discard_prompt", &self.is_discard_prompt_visible())
            .field("lifecycle", &self.lifecycle)
            .field("confirmed", &self.confirmed)
            .field("dismissed", &self.dismissed)
            .finish_non_exhaustive()
    }
}
