//! A modal bottom sheet with a single-line text field and a confirm button,
//! with an optional "discard unsaved changes" prompt, for ratatui apps.
//!
//! The host keeps the draft. It builds a [`TextFieldSheet`] with the draft as
//! seed plus `on_confirm` / `on_dismiss` callbacks, calls
//! [`TextFieldSheet::on_mount`], forwards input and ticks, and draws it with
//! [`ui::sheet::render_sheet`]. When `on_dismiss` fires the host drops the
//! sheet.

// Defensive programming lints - prevent panics and unsafe patterns
#![deny(clippy::indexing_slicing)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::fallible_impl_from)]
#![warn(clippy::fn_params_excessive_bools)]
// Idiomatic Rust lints
#![warn(clippy::needless_return)]
#![warn(clippy::let_and_return)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::explicit_iter_loop)]

pub mod app;
pub mod config;
pub mod logging;
pub mod ui;

pub use app::{
    DiscardAction, DismissSource, SheetChange, SheetOptions, SheetVisibility, TextFieldSheet,
    TextInput,
};
pub use ui::discard::{DefaultDiscardPrompt, DiscardPromptRenderer};
