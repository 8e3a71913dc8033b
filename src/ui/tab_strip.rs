//! Renders a [`TabStrip`] as a label row with an optional underline below.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::tab_strip::{TabLabel, TabStrip};

use super::theme::to_color;

/// Glyph used for the selection underline.
const UNDERLINE_GLYPH: &str = "━";

/// The strip widget, created fresh each frame from the model.
pub struct TabStripWidget<'a> {
    strip: &'a TabStrip,
}

impl<'a> TabStripWidget<'a> {
    pub fn new(strip: &'a TabStrip) -> Self {
        Self { strip }
    }

    /// Terminals cannot scale glyphs, so a label more than halfway to the
    /// selected scale is drawn bold instead.
    fn label_style(&self, label: &TabLabel) -> Style {
        let style = self.strip.style();
        let mut out = Style::default().fg(to_color(label.color));
        let midpoint = (1.0 + style.scale_factor) * 0.5;
        if style.bold || (style.scale_enabled && label.scale >= midpoint) {
            out = out.add_modifier(Modifier::BOLD);
        }
        out
    }
}

impl Widget for TabStripWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let scroll = self.strip.scroll_offset();
        let left = f64::from(area.x);
        let right = f64::from(area.right());

        // ── labels ──
        for label in self.strip.labels() {
            let slot_start = left + label.x - scroll;
            let slot_end = slot_start + label.width;
            if slot_end <= left || slot_start >= right {
                continue;
            }
            let clip_start = slot_start.max(left).round();
            let clip_end = slot_end.min(right).round();

            let text_width = label.text.width() as f64;
            let mut col = (slot_start + ((label.width - text_width) * 0.5).max(0.0)).floor();
            let style = self.label_style(label);

            for ch in label.text.chars() {
                let w = ch.width().unwrap_or(0) as f64;
                if w == 0.0 {
                    continue;
                }
                if col >= clip_start && col + w <= clip_end {
                    if let Some(cell) = buf.cell_mut((col as u16, area.y)) {
                        cell.set_char(ch).set_style(style);
                    }
                }
                col += w;
            }
        }

        // ── underline ──
        let style = self.strip.style();
        if !style.show_underline || area.height < 2 {
            return;
        }
        let underline = self.strip.underline();
        let start = (left + underline.x - scroll).round().max(left);
        let end = (left + underline.x + underline.width - scroll).round().min(right);
        let fg = Style::default().fg(to_color(style.underline_color));
        let rows = style.underline_height.min(area.height - 1);
        for dy in 0..rows {
            let y = area.bottom() - rows + dy;
            let mut x = start;
            while x < end {
                if let Some(cell) = buf.cell_mut((x as u16, y)) {
                    cell.set_symbol(UNDERLINE_GLYPH).set_style(fg);
                }
                x += 1.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::*;
    use crate::core::tab_strip::TitleStyle;

    fn render(strip: &TabStrip, width: u16) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, width, 2));
        TabStripWidget::new(strip).render(buf.area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn labels_are_centred_in_their_slots() {
        let strip = TabStrip::new(["One", "Two", "Three", "Four"], TitleStyle::default(), 40.0);
        let buf = render(&strip, 40);
        assert_eq!(row(&buf, 0), "   One       Two      Three      Four   ");
        assert_eq!(buf[(3, 0)].fg, Color::Rgb(255, 0, 0));
        assert_eq!(buf[(13, 0)].fg, Color::Rgb(170, 170, 170));
    }

    #[test]
    fn underline_follows_the_selection() {
        let style = TitleStyle {
            show_underline: true,
            ..TitleStyle::default()
        };
        let mut strip = TabStrip::new(["a", "b", "c", "d"], style, 40.0);
        strip.set_progress(0.5, 0, 1).unwrap();
        let buf = render(&strip, 40);
        let underline = row(&buf, 1);
        assert_eq!(underline, format!("{}{}{}", " ".repeat(5), "━".repeat(10), " ".repeat(25)));
        assert_eq!(buf[(5, 1)].fg, Color::Rgb(128, 0, 128));
    }

    #[test]
    fn scaled_label_renders_bold() {
        let style = TitleStyle {
            scale_enabled: true,
            ..TitleStyle::default()
        };
        let strip = TabStrip::new(["ab", "cd"], style, 20.0);
        let buf = render(&strip, 20);
        assert!(buf[(4, 0)].modifier.contains(Modifier::BOLD));
        assert!(!buf[(14, 0)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn scrolled_labels_are_clipped() {
        let style = TitleStyle {
            scroll_enabled: true,
            ..TitleStyle::default()
        };
        let mut strip = TabStrip::new(["alpha", "beta", "gamma", "delta"], style, 12.0);
        strip.settle(3).unwrap();
        for _ in 0..200 {
            strip.tick(std::time::Duration::from_millis(16));
        }
        let buf = render(&strip, 12);
        assert!(row(&buf, 0).contains("delta"));
        assert!(!row(&buf, 0).contains("alpha"));
    }
}
