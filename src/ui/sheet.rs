use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{SheetVisibility, TextFieldSheet};
use crate::ui::components::{self, TextFieldProps};

/// Rows of a fully expanded sheet
pub const SHEET_HEIGHT: u16 = 6;

const HANDLE_ROW: u16 = 0;
const FIELD_ROW: u16 = 2;
const BUTTON_ROW: u16 = 4;
const HORIZONTAL_PADDING: u16 = 2;

/// Screen regions of the sheet at a given animation fraction.
///
/// The sheet keeps its full-height layout and slides below the bottom edge,
/// so rows that are off screen come out with zero height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub sheet: Rect,
    pub handle: Rect,
    pub field: Rect,
    pub button: Rect,
}

impl SheetLayout {
    pub fn new(area: Rect, fraction: f32, confirm_label: &str) -> Self {
        let height = SHEET_HEIGHT.min(area.height);
        let visible = visible_rows(height, fraction);
        let top = area.bottom().saturating_sub(visible);
        let sheet = Rect::new(area.x, top, area.width, visible);

        let row = |offset: u16, x: u16, width: u16| {
            Rect::new(x, top.saturating_add(offset), width, 1).intersection(sheet)
        };

        let inner_width = area.width.saturating_sub(HORIZONTAL_PADDING * 2);
        let button_width = (button_text(confirm_label).width() as u16).min(inner_width);
        let button_x = area.right().saturating_sub(HORIZONTAL_PADDING + button_width);

        Self {
            sheet,
            handle: row(HANDLE_ROW, area.x, area.width),
            field: row(FIELD_ROW, area.x + HORIZONTAL_PADDING, inner_width),
            button: row(BUTTON_ROW, button_x, button_width),
        }
    }

    /// Layout the sheet is drawn with for the current frame
    pub fn for_sheet(area: Rect, sheet: &TextFieldSheet) -> Self {
        Self::new(area, sheet.fraction(), sheet.confirm_label())
    }
}

fn visible_rows(height: u16, fraction: f32) -> u16 {
    let rows = (f32::from(height) * fraction.clamp(0.0, 1.0)).round();
    (rows as u16).min(height)
}

fn button_text(label: &str) -> String {
    format!("[ {} ]", label)
}

/// Renders the sheet, its scrim and, when shown, the discard prompt.
pub fn render_sheet(f: &mut Frame, sheet: &TextFieldSheet, area: Rect) {
    if sheet.visibility() == SheetVisibility::Closed {
        return;
    }

    // scrim
    f.render_widget(
        Block::default().style(Style::default().add_modifier(Modifier::DIM)),
        area,
    );

    let layout = SheetLayout::for_sheet(area, sheet);
    if layout.sheet.height == 0 {
        sheet.render_discard_prompt(f, area);
        return;
    }

    f.render_widget(Clear, layout.sheet);
    f.render_widget(
        Block::default()
            .borders(Borders::TOP)
            .title(" ━━━━ ")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(Color::Black)),
        layout.sheet,
    );

    if layout.field.height > 0 {
        components::render_text_field(
            f,
            layout.field,
            TextFieldProps::new(sheet.text(), sheet.placeholder())
                .with_single_line(sheet.single_line())
                .with_focus(sheet.is_focused())
                .with_cursor_position(sheet.input().cursor_position()),
        );
    }

    if layout.button.height > 0 {
        components::render_button(
            f,
            layout.button,
            &button_text(sheet.confirm_label()),
            sheet.can_confirm(),
        );
    }

    sheet.render_discard_prompt(f, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{DismissSource, SheetOptions};
    use crate::ui::discard::DefaultDiscardPrompt;
    use crate::ui::test_support::buffer_text;
    use color_eyre::Result;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::{Duration, Instant};

    fn mounted_sheet(seed: &str) -> TextFieldSheet {
        let start = Instant::now();
        let mut sheet = TextFieldSheet::open_with_discard_guard(
            SheetOptions::new(seed)
                .with_placeholder("New task")
                .with_confirm_label("Save")
                .with_animation(Duration::ZERO),
            |_: &str| {},
            || {},
            DefaultDiscardPrompt::default(),
        );
        sheet.on_mount(start);
        sheet.tick(start);
        sheet
    }

    #[test]
    fn test_layout_fully_expanded() {
        let layout = SheetLayout::new(Rect::new(0, 0, 40, 20), 1.0, "Save");
        assert_eq!(layout.sheet, Rect::new(0, 14, 40, 6));
        assert_eq!(layout.handle, Rect::new(0, 14, 40, 1));
        assert_eq!(layout.field, Rect::new(2, 16, 36, 1));
        assert_eq!(layout.button, Rect::new(30, 18, 8, 1));
    }

    #[test]
    fn test_layout_partially_hidden_clips_rows() {
        let layout = SheetLayout::new(Rect::new(0, 0, 40, 20), 0.5, "Save");
        assert_eq!(layout.sheet.height, 3);
        assert_eq!(layout.handle.y, 17);
        assert_eq!(layout.field.height, 1);
        assert_eq!(layout.button.height, 0);
    }

    #[test]
    fn test_layout_hidden_is_empty() {
        let layout = SheetLayout::new(Rect::new(0, 0, 40, 20), 0.0, "Save");
        assert_eq!(layout.sheet.height, 0);
        assert_eq!(layout.field.height, 0);
    }

    #[test]
    fn test_render_shows_placeholder_and_button() -> Result<()> {
        let sheet = mounted_sheet("");
        let mut terminal = Terminal::new(TestBackend::new(40, 20))?;
        terminal.draw(|f| render_sheet(f, &sheet, f.area()))?;

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("New task"));
        assert!(text.contains("[ Save ]"));
        Ok(())
    }

    #[test]
    fn test_render_shows_discard_prompt_when_dirty() -> Result<()> {
        let mut sheet = mounted_sheet("Buy milk");
        sheet.set_text("Buy eggs");
        sheet.request_dismiss(DismissSource::Back);

        let mut terminal = Terminal::new(TestBackend::new(80, 24))?;
        terminal.draw(|f| render_sheet(f, &sheet, f.area()))?;

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Buy eggs"));
        assert!(text.contains("Discard current task?"));
        Ok(())
    }

    #[test]
    fn test_closed_sheet_draws_nothing() -> Result<()> {
        let mut sheet = mounted_sheet("");
        sheet.request_dismiss(DismissSource::Back);

        let mut terminal = Terminal::new(TestBackend::new(40, 20))?;
        terminal.draw(|f| render_sheet(f, &sheet, f.area()))?;

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.trim().is_empty());
        Ok(())
    }
}
