use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{DiscardAction, DiscardGuard};
use crate::config::DiscardPromptConfig;
use crate::ui::utils::centered_rect;

/// The "discard unsaved changes" prompt.
///
/// Both methods are only called while the prompt is visible. `render` draws
/// it; `selected` is the highlighted action. `handle_key` decides what a key
/// press means: returning [`DiscardAction::Cancel`] keeps editing,
/// [`DiscardAction::ConfirmDiscard`] drops the text and closes the sheet, and
/// `None` leaves the prompt up. The default bindings come from
/// [`DiscardGuard::handle_key`] (`Esc`/`n` cancel, `d`/`y` discard, arrows to
/// move, `Enter` to apply).
pub trait DiscardPromptRenderer {
    fn render(&self, frame: &mut Frame, area: Rect, selected: DiscardAction);

    fn handle_key(&mut self, key: KeyEvent, guard: &mut DiscardGuard) -> Option<DiscardAction> {
        guard.handle_key(key)
    }
}

/// Centered confirmation modal
#[derive(Debug, Clone)]
pub struct DefaultDiscardPrompt {
    pub title: String,
    pub message: String,
    pub cancel_label: String,
    pub discard_label: String,
}

impl Default for DefaultDiscardPrompt {
    fn default() -> Self {
        Self::from(&DiscardPromptConfig::default())
    }
}

impl From<&DiscardPromptConfig> for DefaultDiscardPrompt {
    fn from(config: &DiscardPromptConfig) -> Self {
        Self {
            title: config.title.clone(),
            message: config.message.clone(),
            cancel_label: config.cancel_label.clone(),
            discard_label: config.discard_label.clone(),
        }
    }
}

impl DiscardPromptRenderer for DefaultDiscardPrompt {
    fn render(&self, f: &mut Frame, area: Rect, selected: DiscardAction) {
        let area = centered_rect(50, 30, area);
        f.render_widget(Clear, area);

        f.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(vec![
                    Span::styled(" ", Style::default()),
                    Span::styled(
                        self.title.as_str(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" ", Style::default()),
                ]))
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
            area,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let Some([content_area, buttons_area]) =
            chunks.get(0..2).and_then(|s| <&[_; 2]>::try_from(s).ok())
        else {
            return;
        };

        f.render_widget(
            Paragraph::new(self.message.as_str())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            *content_area,
        );

        let buttons = Line::from(vec![
            Span::styled(
                format!("  {}  ", self.cancel_label),
                choice_style(selected == DiscardAction::Cancel),
            ),
            Span::styled("    ", Style::default()),
            Span::styled(
                format!("  {}  ", self.discard_label),
                choice_style(selected == DiscardAction::ConfirmDiscard),
            ),
        ]);

        f.render_widget(
            Paragraph::new(buttons).alignment(Alignment::Center),
            *buttons_area,
        );
    }
}

fn choice_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::buffer_text;
    use color_eyre::Result;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_default_prompt_renders_title_and_actions() -> Result<()> {
        let prompt = DefaultDiscardPrompt::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 24))?;
        terminal.draw(|f| prompt.render(f, f.area(), DiscardAction::Cancel))?;

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Discard current task?"));
        assert!(text.contains("Cancel"));
        assert!(text.contains("Discard"));
        Ok(())
    }

    #[test]
    fn test_selected_choice_is_highlighted() -> Result<()> {
        let prompt = DefaultDiscardPrompt::default();
        let mut terminal = Terminal::new(TestBackend::new(80, 24))?;
        terminal.draw(|f| prompt.render(f, f.area(), DiscardAction::ConfirmDiscard))?;

        let buffer = terminal.backend().buffer();
        let highlighted: String = buffer
            .content()
            .iter()
            .filter(|cell| cell.bg == Color::Cyan)
            .map(|cell| cell.symbol())
            .collect();
        assert_eq!(highlighted.trim(), "Discard");
        Ok(())
    }
}
