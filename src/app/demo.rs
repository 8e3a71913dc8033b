//! Content hosted by the demo: bordered text pages that report their
//! lifecycle, and a sectioned grid of coloured glyph tiles.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use tab_pager::ui::theme::{to_color, Theme};
use tab_pager::{
    AppearanceEvent, GridCell, GridDataSource, IndexPath, PageContent, PagerObserver, Rgb,
};

/// Most recent lifecycle messages, newest last.
pub type ActivityLog = Rc<RefCell<VecDeque<String>>>;

const LOG_CAPACITY: usize = 64;

pub fn push_activity(log: &ActivityLog, message: String) {
    tracing::debug!("{message}");
    let mut log = log.borrow_mut();
    if log.len() == LOG_CAPACITY {
        log.pop_front();
    }
    log.push_back(message);
}

/// Accent colours cycled across pages and grid sections.
const PALETTE: [Rgb; 6] = [
    Rgb::new(231.0, 76.0, 60.0),
    Rgb::new(46.0, 204.0, 113.0),
    Rgb::new(52.0, 152.0, 219.0),
    Rgb::new(241.0, 196.0, 15.0),
    Rgb::new(155.0, 89.0, 182.0),
    Rgb::new(26.0, 188.0, 156.0),
];

// ───────────────────────────────────────── text pages ────────

pub struct DemoPage {
    title: String,
    accent: Rgb,
    log: ActivityLog,
    appearances: usize,
}

impl DemoPage {
    pub fn new(title: impl Into<String>, index: usize, log: ActivityLog) -> Self {
        Self {
            title: title.into(),
            accent: PALETTE[index % PALETTE.len()],
            log,
            appearances: 0,
        }
    }
}

impl PageContent for DemoPage {
    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let accent = Style::default().fg(to_color(self.accent));
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(Theme::page_title_style())
            .borders(Borders::ALL)
            .border_style(accent);

        let text = vec![
            Line::from(Span::styled(self.title.clone(), accent)),
            Line::default(),
            Line::from(Span::styled(
                format!("Shown {} time(s).", self.appearances),
                Theme::page_text_style(),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Drag sideways to swipe, or click a title above.",
                Theme::hint_style(),
            )),
        ];
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn did_attach(&mut self) {
        push_activity(&self.log, format!("{}: attached", self.title));
    }

    fn on_appearance(&mut self, event: AppearanceEvent) {
        if event == AppearanceEvent::DidAppear {
            self.appearances += 1;
        }
        push_activity(&self.log, format!("{}: {event:?}", self.title));
    }
}

pub fn demo_pages(titles: &[String], log: &ActivityLog) -> Vec<Box<dyn PageContent>> {
    titles
        .iter()
        .enumerate()
        .map(|(i, t)| Box::new(DemoPage::new(t.clone(), i, Rc::clone(log))) as Box<dyn PageContent>)
        .collect()
}

/// Writes coordinator notifications into the activity log.
pub struct ActivityObserver {
    log: ActivityLog,
}

impl ActivityObserver {
    pub fn new(log: &ActivityLog) -> Self {
        Self {
            log: Rc::clone(log),
        }
    }
}

impl PagerObserver for ActivityObserver {
    fn on_scroll_progress(&mut self, source: usize, target: usize, progress: f64) {
        tracing::trace!(source, target, progress, "scroll progress");
    }

    fn on_scroll_settled(&mut self, index: usize) {
        push_activity(&self.log, format!("settled on page {index}"));
    }

    fn on_tab_tapped(&mut self, from: usize, to: usize) {
        push_activity(&self.log, format!("tab {from} -> {to}"));
    }
}

// ───────────────────────────────────────── grid ──────────────

pub const GRID_TITLES: [&str; 4] = ["首页", "直播", "娱乐", "新闻"];

/// Glyphs shown on the tiles, one set per section.
const GLYPHS: [&[&str]; 4] = [
    &["★", "☀", "☂", "☃", "☕", "♞", "♫", "✈", "✉", "✿"],
    &["▶", "◉", "◎", "◆", "◇"],
    &["♠", "♣", "♥", "♦", "⚄"],
    &["✎", "✔", "✚", "✦", "❄"],
];

/// Four sections: ten items in the first, five in each of the others.
pub struct GlyphGrid {
    sections: Vec<usize>,
}

impl Default for GlyphGrid {
    fn default() -> Self {
        Self {
            sections: vec![10, 5, 5, 5],
        }
    }
}

impl GridDataSource for GlyphGrid {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn item_count(&self, section: usize) -> usize {
        self.sections.get(section).copied().unwrap_or(0)
    }

    fn cell(&self, index: IndexPath) -> GridCell {
        let glyphs = GLYPHS[index.section % GLYPHS.len()];
        GridCell {
            label: glyphs[index.item % glyphs.len()].to_string(),
            color: PALETTE[(index.section + index.item) % PALETTE.len()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_log_is_bounded() {
        let log = ActivityLog::default();
        for i in 0..LOG_CAPACITY + 5 {
            push_activity(&log, format!("m{i}"));
        }
        let log = log.borrow();
        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log.front().map(String::as_str), Some("m5"));
    }

    #[test]
    fn pages_report_their_lifecycle() {
        let log = ActivityLog::default();
        let mut page = DemoPage::new("Home", 0, Rc::clone(&log));
        page.did_attach();
        page.on_appearance(AppearanceEvent::WillAppear);
        page.on_appearance(AppearanceEvent::DidAppear);
        assert_eq!(page.appearances, 1);
        let lines: Vec<String> = log.borrow().iter().cloned().collect();
        assert_eq!(lines, vec!["Home: attached", "Home: WillAppear", "Home: DidAppear"]);
    }

    #[test]
    fn page_renders_its_title() {
        let log = ActivityLog::default();
        let mut page = DemoPage::new("Home", 0, log);
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 6));
        page.render(buf.area, &mut buf);
        let top: String = (0..30).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(top.contains(" Home "));
    }

    #[test]
    fn observer_logs_taps_and_settles() {
        let log = ActivityLog::default();
        let mut observer = ActivityObserver::new(&log);
        observer.on_scroll_progress(0, 1, 0.5);
        observer.on_tab_tapped(0, 2);
        observer.on_scroll_settled(2);
        let lines: Vec<String> = log.borrow().iter().cloned().collect();
        assert_eq!(lines, vec!["tab 0 -> 2", "settled on page 2"]);
    }

    #[test]
    fn glyph_grid_matches_titles() {
        let grid = GlyphGrid::default();
        assert_eq!(grid.section_count(), GRID_TITLES.len());
        assert_eq!(grid.cell(IndexPath::new(0, 0)).label, "★");
        assert_eq!(grid.cell(IndexPath::new(3, 4)).label, "❄");
    }
}
