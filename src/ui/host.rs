use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::ui::components::{self, KeyHint};

const EDIT_BUTTON: &str = "[ ✎ edit ]";

/// Screen regions of the host surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostLayout {
    pub header: Rect,
    pub body: Rect,
    pub edit_button: Rect,
    pub footer: Rect,
}

impl HostLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Body
                Constraint::Length(3), // Footer
            ])
            .split(area);

        let header = chunks.first().copied().unwrap_or_default();
        let body = chunks.get(1).copied().unwrap_or_default();
        let footer = chunks.get(2).copied().unwrap_or_default();

        let button_width = (EDIT_BUTTON.chars().count() as u16).min(body.width);
        let edit_button = Rect::new(
            body.right().saturating_sub(button_width + 2),
            body.bottom().saturating_sub(2),
            button_width,
            1,
        )
        .intersection(body);

        Self {
            header,
            body,
            edit_button,
            footer,
        }
    }
}

pub fn render_host_view(f: &mut Frame, app: &App) {
    let layout = HostLayout::new(f.area());
    render_header(f, layout.header);
    render_body(f, app, layout.body);
    render_edit_button(f, app, layout.edit_button);
    render_footer(f, app, layout.footer);

    if let Some(toast) = &app.status_toast {
        let toast_area = Rect::new(
            layout.header.x + 1,
            layout.header.y + 1,
            layout.header.width.saturating_sub(2),
            1,
        )
        .intersection(layout.header);
        components::render_toast(f, toast_area, &toast.message);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(
                "Sheet",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ", Style::default().fg(Color::DarkGray)),
            Span::styled("Draft", Style::default().fg(Color::Cyan)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Left),
        area,
    );
}

fn render_body(f: &mut Frame, app: &App, area: Rect) {
    let line = if app.draft.is_empty() {
        Line::from(Span::styled(
            "  Nothing saved yet",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::raw("  "),
            Span::styled(app.draft.as_str(), Style::default().fg(Color::White)),
        ])
    };

    f.render_widget(
        Paragraph::new(vec![Line::from(""), line])
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Current draft ")
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
        area,
    );
}

fn render_edit_button(f: &mut Frame, app: &App, area: Rect) {
    if area.height == 0 {
        return;
    }
    components::render_button(f, area, EDIT_BUTTON, !app.is_sheet_open());
}

const IDLE_HINTS: &[KeyHint] = &[KeyHint::new("e", "edit"), KeyHint::new("Ctrl+C", "quit")];

const EDITING_HINTS: &[KeyHint] = &[
    KeyHint::new("Enter", "save"),
    KeyHint::new("Esc", "close"),
    KeyHint::new("Ctrl+C", "quit"),
];

const PROMPT_HINTS: &[KeyHint] = &[
    KeyHint::new("Enter", "apply"),
    KeyHint::new("Esc", "keep editing"),
    KeyHint::new("d", "discard"),
];

fn footer_hints(app: &App) -> &'static [KeyHint] {
    match &app.sheet {
        Some(sheet) if sheet.is_discard_prompt_visible() => PROMPT_HINTS,
        Some(_) => EDITING_HINTS,
        None => IDLE_HINTS,
    }
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    components::render_key_hints(f, area, footer_hints(app), app.sheet_config.discard_guard);
}
