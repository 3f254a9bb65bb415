use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const HINT_SEPARATOR: &str = " · ";
const PROMPT: &str = "> ";
const CURSOR: &str = "█";

/// Properties of the text field primitive.
///
/// The field keeps no state of its own: it draws `value` as given, and the
/// owner feeds key presses through `TextInput::apply_key` before the next draw.
pub struct TextFieldProps<'a> {
    pub value: &'a str,
    pub placeholder: &'a str,
    pub single_line: bool,
    pub focused: bool,
    pub cursor_position: Option<usize>,
}

impl<'a> TextFieldProps<'a> {
    pub fn new(value: &'a str, placeholder: &'a str) -> Self {
        Self {
            value,
            placeholder,
            single_line: true,
            focused: false,
            cursor_position: None,
        }
    }

    pub fn with_single_line(mut self, single_line: bool) -> Self {
        self.single_line = single_line;
        self
    }

    pub fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Sets cursor position (character index)
    pub fn with_cursor_position(mut self, cursor_position: usize) -> Self {
        self.cursor_position = Some(cursor_position);
        self
    }
}

/// Whether the placeholder overlay is drawn for a value
pub fn shows_placeholder(value: &str) -> bool {
    value.is_empty()
}

/// Renders the text field primitive: prompt, value and cursor, with the
/// placeholder laid over the empty field.
pub fn render_text_field(frame: &mut Frame, area: Rect, props: TextFieldProps) {
    let cursor_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::SLOW_BLINK);
    let text_style = Style::default().fg(Color::White);

    if shows_placeholder(props.value) {
        let mut spans = vec![Span::styled(PROMPT, Style::default().fg(Color::DarkGray))];
        if props.focused {
            spans.push(Span::styled(CURSOR, cursor_style));
        }
        spans.push(Span::styled(
            props.placeholder,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
        return;
    }

    let length = props.value.chars().count();
    let cursor_index = props.cursor_position.unwrap_or(length).min(length);

    if !props.single_line {
        let lines = multi_line_spans(props.value, cursor_index, props.focused, text_style, cursor_style);
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    let prefix_width = PROMPT.chars().count();
    let cursor_width = usize::from(props.focused);
    let available_width = (area.width as usize)
        .saturating_sub(prefix_width + cursor_width)
        .max(1);
    let (start, end) = visible_window(props.value, cursor_index, available_width);
    let visible_content = slice_by_chars(props.value, start, end);
    let relative_cursor = cursor_index
        .saturating_sub(start)
        .min(visible_content.chars().count());
    let before = slice_by_chars(&visible_content, 0, relative_cursor);
    let after = slice_by_chars(
        &visible_content,
        relative_cursor,
        visible_content.chars().count(),
    );

    let mut spans = vec![
        Span::styled(PROMPT, Style::default().fg(Color::Cyan)),
        Span::styled(before, text_style),
    ];
    if props.focused {
        spans.push(Span::styled(CURSOR, cursor_style));
    }
    spans.push(Span::styled(after, text_style));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn multi_line_spans(
    value: &str,
    cursor_index: usize,
    focused: bool,
    text_style: Style,
    cursor_style: Style,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans = vec![Span::styled(PROMPT, Style::default().fg(Color::Cyan))];
    let mut pending = String::new();

    for (index, character) in value.chars().enumerate() {
        if focused && index == cursor_index {
            spans.push(Span::styled(std::mem::take(&mut pending), text_style));
            spans.push(Span::styled(CURSOR, cursor_style));
        }
        if character == '\n' {
            spans.push(Span::styled(std::mem::take(&mut pending), text_style));
            lines.push(Line::from(std::mem::take(&mut spans)));
            spans.push(Span::raw("  "));
        } else {
            pending.push(character);
        }
    }
    spans.push(Span::styled(pending, text_style));
    if focused && cursor_index >= value.chars().count() {
        spans.push(Span::styled(CURSOR, cursor_style));
    }
    lines.push(Line::from(spans));
    lines
}

fn visible_window(content: &str, cursor: usize, width: usize) -> (usize, usize) {
    let length = content.chars().count();
    let cursor = cursor.min(length);
    if length <= width {
        return (0, length);
    }
    let mut start = cursor.saturating_sub(width.saturating_sub(1));
    if start + width > length {
        start = length.saturating_sub(width);
    }
    (start, start + width)
}

fn slice_by_chars(value: &str, start: usize, end: usize) -> String {
    value
        .chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}

/// Renders a single-row button; disabled buttons are dimmed
pub fn render_button(frame: &mut Frame, area: Rect, label: &str, enabled: bool) {
    let style = if enabled {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(label.to_string(), style)))
            .alignment(Alignment::Right),
        area,
    );
}

/// One key and what it does, as listed in the footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Footer with key hints on the left and the discard guard badge on the right.
pub fn render_key_hints(f: &mut Frame, area: Rect, hints: &[KeyHint], guard_on: bool) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut spans = vec![Span::raw(" ")];
    for (index, hint) in hints.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(HINT_SEPARATOR, Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            hint.key,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::Gray),
        ));
    }
    let badge = if guard_on {
        Span::styled(
            " guard on ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(" guard off ", Style::default().fg(Color::DarkGray))
    };

    let badge_width = (badge.width() as u16).min(inner.width);
    let [hints_area, badge_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(badge_width),
    ])
    .areas(inner);
    f.render_widget(Paragraph::new(Line::from(spans)), hints_area);
    f.render_widget(Paragraph::new(Line::from(badge)), badge_area);
}

/// Short-lived outcome label, right aligned
pub fn render_toast(f: &mut Frame, area: Rect, message: &str) {
    let label = Span::styled(
        format!(" {message} "),
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(
        Paragraph::new(Line::from(vec![label, Span::raw(" ")])).alignment(Alignment::Right),
        area,
    );
}
