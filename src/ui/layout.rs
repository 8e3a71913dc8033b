//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::grid_pager::TitlePosition;

/// Primary screen layout: title strip, page content, optional page-control
/// row, and a bottom status bar.
pub struct AppLayout {
    pub title_area: Rect,
    pub content_area: Rect,
    pub dots_area: Option<Rect>,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect, title_height: u16, position: TitlePosition, dots: bool) -> Self {
        let dots_height = u16::from(dots);
        let constraints = match position {
            TitlePosition::Top => [
                Constraint::Length(title_height),
                Constraint::Min(1),
                Constraint::Length(dots_height),
                Constraint::Length(1),
            ],
            TitlePosition::Bottom => [
                Constraint::Min(1),
                Constraint::Length(dots_height),
                Constraint::Length(title_height),
                Constraint::Length(1),
            ],
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let (title_area, content_area, dots_area) = match position {
            TitlePosition::Top => (chunks[0], chunks[1], chunks[2]),
            TitlePosition::Bottom => (chunks[2], chunks[0], chunks[1]),
        };

        Self {
            title_area,
            content_area,
            dots_area: dots.then_some(dots_area),
            status_area: chunks[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_on_top() {
        let l = AppLayout::from_area(Rect::new(0, 0, 40, 20), 2, TitlePosition::Top, false);
        assert_eq!(l.title_area, Rect::new(0, 0, 40, 2));
        assert_eq!(l.content_area, Rect::new(0, 2, 40, 17));
        assert_eq!(l.dots_area, None);
        assert_eq!(l.status_area, Rect::new(0, 19, 40, 1));
    }

    #[test]
    fn title_at_bottom_with_dots() {
        let l = AppLayout::from_area(Rect::new(0, 0, 40, 20), 2, TitlePosition::Bottom, true);
        assert_eq!(l.content_area, Rect::new(0, 0, 40, 16));
        assert_eq!(l.dots_area, Some(Rect::new(0, 16, 40, 1)));
        assert_eq!(l.title_area, Rect::new(0, 17, 40, 2));
        assert_eq!(l.status_area, Rect::new(0, 19, 40, 1));
    }
}
