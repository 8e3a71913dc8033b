//! Renders the visible cells of a [`GridCoordinator`] as coloured tiles.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::grid_pager::GridCoordinator;

use super::theme::{to_color, Theme};

pub struct GridWidget<'a> {
    grid: &'a GridCoordinator,
}

impl<'a> GridWidget<'a> {
    pub fn new(grid: &'a GridCoordinator) -> Self {
        Self { grid }
    }
}

impl Widget for GridWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let offset = self.grid.offset();
        let (left, top) = (f64::from(area.x), f64::from(area.y));
        let (right, bottom) = (f64::from(area.right()), f64::from(area.bottom()));

        for (attrs, cell) in self.grid.visible_cells() {
            let frame = attrs.frame;
            let x0 = (left + frame.x - offset).round().max(left);
            let x1 = (left + frame.max_x() - offset).round().min(right);
            let y0 = (top + frame.y).round().max(top);
            let y1 = (top + frame.max_y()).round().min(bottom);
            if x0 >= x1 || y0 >= y1 {
                continue;
            }
            let (x0, x1, y0, y1) = (x0 as u16, x1 as u16, y0 as u16, y1 as u16);

            let tile = Rect::new(x0, y0, x1 - x0, y1 - y0);
            buf.set_style(tile, Style::default().bg(to_color(cell.color)));

            // Label centred on the tile's middle row, clipped to the tile.
            let label_width = cell.label.width() as u16;
            let x = x0 + (tile.width.saturating_sub(label_width)) / 2;
            let y = y0 + tile.height / 2;
            buf.set_stringn(
                x,
                y,
                &cell.label,
                usize::from(x1 - x),
                Theme::cell_text_style().bg(to_color(cell.color)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::*;
    use crate::core::color::Rgb;
    use crate::core::geometry::Insets;
    use crate::core::grid_layout::{GridConfig, IndexPath};
    use crate::core::grid_pager::{GridCell, GridDataSource, TitlePosition};
    use crate::core::tab_strip::TitleStyle;

    struct Letters;

    impl GridDataSource for Letters {
        fn section_count(&self) -> usize {
            1
        }

        fn item_count(&self, _section: usize) -> usize {
            3
        }

        fn cell(&self, index: IndexPath) -> GridCell {
            GridCell {
                label: ["a", "b", "c"][index.item].to_string(),
                color: Rgb::from_u8(0, 0, 200),
            }
        }
    }

    #[test]
    fn tiles_are_painted_at_their_frames() {
        let config = GridConfig {
            cols: 2,
            rows: 2,
            insets: Insets::uniform(1.0),
            inter_item_spacing: 1.0,
            line_spacing: 1.0,
        };
        let mut grid = GridCoordinator::new(
            vec!["only"],
            TitleStyle::default(),
            config,
            TitlePosition::Top,
            11.0,
            7.0,
        )
        .unwrap();
        grid.register_data_source(Letters).unwrap();

        let mut buf = Buffer::empty(Rect::new(0, 0, 11, 7));
        GridWidget::new(&grid).render(buf.area, &mut buf);

        // Tiles are 4×2: (1,1) (6,1) (1,4); the fourth slot is empty.
        assert_eq!(buf[(0, 1)].bg, Color::Reset);
        assert_eq!(buf[(1, 1)].bg, Color::Rgb(0, 0, 200));
        assert_eq!(buf[(4, 2)].bg, Color::Rgb(0, 0, 200));
        assert_eq!(buf[(5, 1)].bg, Color::Reset);
        assert_eq!(buf[(6, 4)].bg, Color::Reset);
        assert_eq!(buf[(2, 2)].symbol(), "a");
        assert_eq!(buf[(7, 2)].symbol(), "b");
        assert_eq!(buf[(2, 5)].symbol(), "c");
    }
}
