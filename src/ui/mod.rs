pub mod components;
pub mod discard;
pub mod host;
pub mod sheet;
mod utils;

use crate::app::App;
use ratatui::Frame;

/// Draws the host surface and, while mounted, the sheet on top of it.
pub fn render(f: &mut Frame, app: &App) {
    host::render_host_view(f, app);

    if let Some(sheet) = &app.sheet {
        sheet::render_sheet(f, sheet, f.area());
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::buffer::Buffer;

    /// Buffer symbols, one line per row
    pub fn buffer_text(buffer: &Buffer) -> String {
        let width = usize::from(buffer.area.width).max(1);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::buffer_text;
    use color_eyre::Result;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Instant;

    #[test]
    fn test_open_sheet_draws_over_host() -> Result<()> {
        let now = Instant::now();
        let mut app = App::default().with_draft("Buy milk");
        app.open_sheet(now);
        app.tick(now + crate::app::DEFAULT_ANIMATION);

        let mut terminal = Terminal::new(TestBackend::new(60, 20))?;
        terminal.draw(|f| render(f, &app))?;
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("[ Save ]"));
        assert!(text.contains("Current draft"));
        Ok(())
    }
}
