//! Page-control dots under the grid.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::core::grid_pager::PageControl;

use super::theme::Theme;

const DOT: &str = "●";

pub struct PageControlWidget {
    control: PageControl,
}

impl PageControlWidget {
    pub fn new(control: PageControl) -> Self {
        Self { control }
    }
}

impl Widget for PageControlWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let count = self.control.number_of_pages;
        if count == 0 || area.width == 0 || area.height == 0 {
            return;
        }
        // Dots are separated by one blank column.
        let needed = (count * 2 - 1).min(usize::from(area.width));
        let start = area.x + (area.width - needed as u16) / 2;
        for i in 0..count {
            let column = i * 2;
            if column >= needed {
                break;
            }
            let x = start + column as u16;
            let style = if i == self.control.current_page {
                Theme::current_dot_style()
            } else {
                Theme::dot_style()
            };
            buf[(x, area.y)].set_symbol(DOT).set_style(style);
        }
    }
}
