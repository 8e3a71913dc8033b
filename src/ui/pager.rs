//! Renders the pages of a [`ContentPager`] side by side, shifted by the
//! current scroll offset.
//!
//! Each page on screen is painted into an offscreen buffer of the full page
//! size and then copied column by column, so a page that is half off the
//! viewport is clipped rather than squeezed.

use ratatui::{buffer::Buffer, layout::Rect, widgets::StatefulWidget};

use crate::core::pager::ContentPager;

pub struct PagerWidget;

impl StatefulWidget for PagerWidget {
    type State = ContentPager;

    fn render(self, area: Rect, buf: &mut Buffer, pager: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = pager.page_width();
        let offset = pager.offset();
        let page_area = Rect::new(0, 0, area.width, area.height);

        for page in pager.visible_pages() {
            let shift = (page as f64 * width - offset).round() as i32;
            let Some(content) = pager.cell_for_page(page) else {
                continue;
            };
            let mut scratch = Buffer::empty(page_area);
            content.render(page_area, &mut scratch);
            blit(&scratch, shift, area, buf);
        }
    }
}

/// Copy `src` into `dst` with its left edge `shift` columns from `area.x`,
/// dropping whatever falls outside `area`.
fn blit(src: &Buffer, shift: i32, area: Rect, dst: &mut Buffer) {
    for col in 0..src.area.width {
        let x = i32::from(col) + shift;
        if x < 0 || x >= i32::from(area.width) {
            continue;
        }
        let dst_x = area.x + x as u16;
        for row in 0..src.area.height.min(area.height) {
            if let Some(cell) = dst.cell_mut((dst_x, area.y + row)) {
                *cell = src[(col, row)].clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::page::PageContent;
    use crate::core::pager::GestureScope;

    struct Fill(char);

    impl PageContent for Fill {
        fn render(&mut self, area: Rect, buf: &mut Buffer) {
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    buf[(x, y)].set_char(self.0);
                }
            }
        }
    }

    fn pager() -> ContentPager {
        let pages: Vec<Box<dyn PageContent>> =
            vec![Box::new(Fill('A')), Box::new(Fill('B')), Box::new(Fill('C'))];
        ContentPager::new(pages, 10.0)
    }

    fn row(buf: &Buffer) -> String {
        (0..buf.area.width).map(|x| buf[(x, buf.area.y)].symbol()).collect()
    }

    #[test]
    fn resting_pager_shows_one_page() {
        let mut p = pager();
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 3));
        PagerWidget.render(buf.area, &mut buf, &mut p);
        assert_eq!(row(&buf), "AAAAAAAAAA");
        assert!(p.is_attached(0));
        assert!(!p.is_attached(1));
    }

    #[test]
    fn mid_drag_shows_two_pages_split() {
        let mut p = pager();
        let mut scope = GestureScope::default();
        p.begin_drag(&mut scope);
        p.drag_to(4.0, &scope);

        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 3));
        PagerWidget.render(buf.area, &mut buf, &mut p);
        assert_eq!(row(&buf), "AAAAAABBBB");
        assert!(p.is_attached(1));
        assert!(!p.is_attached(2));
    }

    #[test]
    fn respects_an_offset_area() {
        let mut p = pager();
        let mut buf = Buffer::empty(Rect::new(0, 0, 14, 2));
        PagerWidget.render(Rect::new(2, 1, 10, 1), &mut buf, &mut p);
        assert_eq!(buf[(1, 1)].symbol(), " ");
        assert_eq!(buf[(2, 1)].symbol(), "A");
        assert_eq!(buf[(11, 1)].symbol(), "A");
        assert_eq!(buf[(12, 1)].symbol(), " ");
        assert_eq!(buf[(2, 0)].symbol(), " ");
    }
}
