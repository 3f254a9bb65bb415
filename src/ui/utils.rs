use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Minimum size of a centered modal, applied when the container allows it
const MIN_WIDTH: u16 = 30;
const MIN_HEIGHT: u16 = 10;

/// Creates a centered rectangle taking `percent_x` by `percent_y` of `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let percent_x = percent_x.min(100);
    let percent_y = percent_y.min(100);

    let middle = split_middle(Direction::Vertical, percent_y, r);
    let mut result = split_middle(Direction::Horizontal, percent_x, middle);

    if result.width < MIN_WIDTH && r.width >= MIN_WIDTH {
        result.width = MIN_WIDTH;
        result.x = r.x + (r.width.saturating_sub(result.width)) / 2;
    }
    if result.height < MIN_HEIGHT && r.height >= MIN_HEIGHT {
        result.height = MIN_HEIGHT;
        result.y = r.y + (r.height.saturating_sub(result.height)) / 2;
    }

    result
}

fn split_middle(direction: Direction, percent: u16, r: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(direction)
        .constraints([
            Constraint::Percentage((100 - percent) / 2),
            Constraint::Percentage(percent),
            Constraint::Percentage((100 - percent) / 2),
        ])
        .split(r);

    chunks
        .get(1)
        .copied()
        .unwrap_or_else(|| chunks.first().copied().unwrap_or(r))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_centered() {
        let area = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(50, 40, area);
        assert_eq!(rect.width, 50);
        assert_eq!(rect.height, 20);
        assert_eq!(rect.x, 25);
        assert_eq!(rect.y, 15);
    }

    #[test]
    fn test_centered_rect_respects_minimum_size() {
        let area = Rect::new(0, 0, 40, 20);
        let rect = centered_rect(10, 10, area);
        assert_eq!(rect.width, MIN_WIDTH);
        assert_eq!(rect.height, MIN_HEIGHT);
        assert_eq!(rect.x, 5);
        assert_eq!(rect.y, 5);
    }
}
