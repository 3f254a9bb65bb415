use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::app::types::{SheetOptions, StatusToast};
use crate::app::{App, TextFieldSheet};
use crate::ui::discard::DefaultDiscardPrompt;

const STATUS_TOAST_DURATION: Duration = Duration::from_secs(2);

/// Events the sheet callbacks post back to the host loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Confirmed(String),
    Dismissed,
    Redraw,
}

impl App {
    pub fn is_sheet_open(&self) -> bool {
        self.sheet.is_some()
    }

    /// Mounts a fresh sheet seeded with the current draft. Each open builds a
    /// new controller with its own callbacks.
    pub fn open_sheet(&mut self, now: Instant) {
        if self.sheet.is_some() {
            return;
        }

        let options = SheetOptions::new(self.draft.clone())
            .with_placeholder(self.sheet_config.placeholder.clone())
            .with_confirm_label(self.sheet_config.confirm_label.clone())
            .with_animation(self.sheet_config.animation());

        let confirm_tx = self.events_tx.clone();
        let on_confirm = move |text: &str| {
            let _ = confirm_tx.send(HostEvent::Confirmed(text.to_string()));
        };
        let dismiss_tx = self.events_tx.clone();
        let on_dismiss = move || {
            let _ = dismiss_tx.send(HostEvent::Dismissed);
        };

        let mut sheet = if self.sheet_config.discard_guard {
            TextFieldSheet::open_with_discard_guard(
                options,
                on_confirm,
                on_dismiss,
                DefaultDiscardPrompt::from(&self.discard_prompt),
            )
        } else {
            TextFieldSheet::open(options, on_confirm, on_dismiss)
        };

        let redraw_tx = self.events_tx.clone();
        sheet.subscribe(move |_| {
            let _ = redraw_tx.send(HostEvent::Redraw);
        });

        sheet.on_mount(now);
        info!(guarded = sheet.has_discard_guard(), "sheet opened");
        self.confirmed_this_cycle = false;
        self.sheet = Some(sheet);
        self.needs_redraw = true;
    }

    /// Advances animations and applies whatever the sheet reported.
    pub fn tick(&mut self, now: Instant) {
        if let Some(sheet) = &mut self.sheet {
            sheet.tick(now);
        }
        self.process_host_events();
        self.clear_expired_status_toast();
    }

    pub fn is_animating(&self) -> bool {
        self.sheet.as_ref().is_some_and(TextFieldSheet::is_animating)
    }

    /// Drains the callback channel.
    pub fn process_host_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                HostEvent::Confirmed(text) => {
                    debug!(len = text.len(), "draft updated");
                    self.draft = text;
                    self.confirmed_this_cycle = true;
                    self.show_status_toast("SAVED");
                }
                HostEvent::Dismissed => self.close_sheet(),
                HostEvent::Redraw => self.needs_redraw = true,
            }
        }
    }

    fn close_sheet(&mut self) {
        let Some(mut sheet) = self.sheet.take() else {
            return;
        };
        if !self.confirmed_this_cycle {
            if sheet.is_dirty() {
                self.show_status_toast("DISCARDED");
            } else {
                self.show_status_toast("CLOSED");
            }
        }
        sheet.on_unmount();
        self.confirmed_this_cycle = false;
        self.needs_redraw = true;
        info!("sheet closed");
    }

    pub fn show_status_toast(&mut self, message: impl Into<String>) {
        self.status_toast = Some(StatusToast::new(message));
        self.needs_redraw = true;
    }

    pub fn clear_expired_status_toast(&mut self) {
        if self
            .status_toast
            .as_ref()
            .is_some_and(|toast| toast.is_expired(STATUS_TOAST_DURATION))
        {
            self.status_toast = None;
            self.needs_redraw = true;
        }
    }
}
